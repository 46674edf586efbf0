use std::cmp::Ordering;

use super::matcher::fuzzy_score;

pub const DEFAULT_RANK_LIMIT: usize = 50;

/// Scores `items` against `query` and returns at most `limit` matches.
///
/// An empty query is the browse case: the first `limit` items come back in
/// input order, each with score 0. Otherwise non-matches are dropped and the
/// rest are ordered by score descending, then by key ascending.
pub fn rank_matches<T, I, K>(query: &str, items: I, key: K, limit: usize) -> Vec<(T, i64)>
where
    I: IntoIterator<Item = T>,
    K: Fn(&T) -> &str,
{
    if query.is_empty() {
        return items.into_iter().take(limit).map(|item| (item, 0)).collect();
    }

    let mut scored = items
        .into_iter()
        .filter_map(|item| fuzzy_score(query, key(&item)).map(|score| (item, score)))
        .collect::<Vec<_>>();

    scored.sort_by(|a, b| rank_ordering(a, b, &key));
    scored.truncate(limit);
    scored
}

fn rank_ordering<T, K>(a: &(T, i64), b: &(T, i64), key: &K) -> Ordering
where
    K: Fn(&T) -> &str,
{
    b.1.cmp(&a.1).then_with(|| key(&a.0).cmp(key(&b.0)))
}
