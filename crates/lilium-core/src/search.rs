use tracing::debug;

use crate::error::Result;
use crate::fuzzy::{build_like_pattern, rank_matches};
use crate::models::{NoteResult, SearchOptions, SearchOutcome};

pub const DEFAULT_CANDIDATE_LIMIT: usize = 500;

/// Storage side of a note search.
///
/// Implementations return up to `limit` notes whose lower-cased `full_path`
/// satisfies the `LIKE` `pattern` (escape char `\`), ordered by `full_path`.
pub trait CandidateSource {
    fn fetch_candidates(&self, pattern: &str, limit: usize) -> Result<Vec<NoteResult>>;
}

/// Searches notes by path with a storage prefilter followed by fuzzy ranking.
///
/// A blank query short-circuits to [`SearchOutcome::Idle`] without touching
/// storage. Storage errors are returned as-is.
pub fn search_notes(
    source: &impl CandidateSource,
    query: &str,
    options: SearchOptions,
) -> Result<SearchOutcome> {
    if query.trim().is_empty() {
        return Ok(SearchOutcome::Idle);
    }

    let pattern = build_like_pattern(query);
    let candidates = source.fetch_candidates(&pattern, options.candidate_limit)?;
    let candidate_count = candidates.len();

    let ranked = rank_matches(
        query,
        candidates,
        |note: &NoteResult| note.full_path.as_str(),
        options.limit,
    );
    debug!(
        query,
        candidates = candidate_count,
        ranked = ranked.len(),
        "ranked note search"
    );

    Ok(SearchOutcome::Ranked(
        ranked.into_iter().map(|(note, _score)| note).collect(),
    ))
}
