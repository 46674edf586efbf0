/// Escape marker used with `LIKE ... ESCAPE '\'`.
pub const LIKE_ESCAPE: char = '\\';
pub const MATCH_ALL_PATTERN: &str = "%";

/// ASCII letters that the matcher's fold also reaches from a non-ASCII
/// target char (`İ` folds to `i`, the Kelvin sign to `k`). SQLite keeps
/// those targets as-is, so these letters must not be literals.
pub(super) const ASCII_FOLD_TARGETS: [char; 2] = ['i', 'k'];

/// Builds a SQL `LIKE` pattern admitting every target that contains `query`
/// as a case-insensitive subsequence.
///
/// The pattern is meant to be applied to `LOWER(column)`. `"ab"` becomes
/// `"%a%b%"`. The filter is over-inclusive; scoring drops the false
/// positives afterwards.
///
/// SQLite only folds ASCII in `LOWER`/`LIKE`, so a non-ASCII query char
/// that has case becomes `_` (any single char) instead of a literal, as do
/// `i` and `k`, which the matcher also reaches from non-ASCII targets.
#[must_use]
pub fn build_like_pattern(query: &str) -> String {
    if query.is_empty() {
        return MATCH_ALL_PATTERN.to_string();
    }

    let mut pattern = String::with_capacity(query.len() * 3 + 1);
    pattern.push('%');
    for ch in query.chars() {
        push_literal(&mut pattern, ch);
        pattern.push('%');
    }
    pattern
}

fn push_literal(pattern: &mut String, ch: char) {
    if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
        pattern.push(LIKE_ESCAPE);
        pattern.push(ch);
    } else if ch.is_ascii() {
        let lower = ch.to_ascii_lowercase();
        if ASCII_FOLD_TARGETS.contains(&lower) {
            pattern.push('_');
        } else {
            pattern.push(lower);
        }
    } else if has_case_mapping(ch) {
        pattern.push('_');
    } else {
        pattern.push(ch);
    }
}

/// Covers title-case letters such as `ǅ`, which are neither lower nor upper.
fn has_case_mapping(ch: char) -> bool {
    ch.is_lowercase()
        || ch.is_uppercase()
        || ch.to_lowercase().ne(std::iter::once(ch))
        || ch.to_uppercase().ne(std::iter::once(ch))
}
