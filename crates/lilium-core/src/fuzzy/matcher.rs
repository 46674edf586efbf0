use serde::Serialize;

pub const SCORE_CONSECUTIVE: i64 = 16;
pub const SCORE_WORD_BOUNDARY: i64 = 32;
pub const SCORE_FIRST_CHAR: i64 = 16;
pub const SCORE_GAP_PENALTY: i64 = -3;

const WORD_BOUNDARY_CHARS: [char; 5] = ['/', '_', '-', '.', ' '];

/// Score and matched character indices for one query/target pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuzzyMatch {
    pub score: i64,
    /// Char indices into the target, strictly increasing, one per query char.
    pub positions: Vec<usize>,
}

/// Matches `query` against `target` and records where each query char landed.
///
/// An empty query matches everything with score 0. Returns `None` when the
/// query is not a case-insensitive subsequence of the target.
#[must_use]
pub fn fuzzy_match(query: &str, target: &str) -> Option<FuzzyMatch> {
    let mut positions = Vec::new();
    let score = scan(query, target, |index| positions.push(index))?;
    Some(FuzzyMatch { score, positions })
}

/// Same scan as [`fuzzy_match`] without collecting positions.
#[must_use]
pub fn fuzzy_score(query: &str, target: &str) -> Option<i64> {
    scan(query, target, |_| {})
}

fn scan(query: &str, target: &str, mut on_match: impl FnMut(usize)) -> Option<i64> {
    if query.is_empty() {
        return Some(0);
    }
    if query.chars().count() > target.chars().count() {
        return None;
    }

    let mut cursor = target.chars().enumerate();
    let mut before_cursor: Option<char> = None;
    let mut prev_match: Option<usize> = None;
    let mut score = 0i64;

    for (query_index, query_char) in query.chars().enumerate() {
        let wanted = fold_char(query_char);
        let index = loop {
            let (index, target_char) = cursor.next()?;
            let previous = before_cursor.replace(target_char);
            if fold_char(target_char) != wanted {
                continue;
            }

            if query_index == 0 && index == 0 {
                score += SCORE_FIRST_CHAR;
            }
            if is_word_boundary(previous, target_char) {
                score += SCORE_WORD_BOUNDARY;
            }
            if let Some(prev) = prev_match {
                let gap = index - prev - 1;
                if gap == 0 {
                    score += SCORE_CONSECUTIVE;
                } else {
                    score += usize_to_i64_saturating(gap).saturating_mul(SCORE_GAP_PENALTY);
                }
            }
            break index;
        };

        on_match(index);
        prev_match = Some(index);
    }

    Some(score)
}

/// `previous` is `None` only at index 0.
fn is_word_boundary(previous: Option<char>, current: char) -> bool {
    let Some(previous) = previous else {
        return true;
    };
    if WORD_BOUNDARY_CHARS.contains(&previous) {
        return true;
    }
    previous.is_lowercase() && current.is_uppercase()
}

pub(super) fn fold_char(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

fn usize_to_i64_saturating(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
