//! Fuzzy subsequence matching for path-like strings.
//!
//! A query matches a target when every query character appears in the
//! target in order. Matches are scored with a single greedy left-to-right
//! scan that rewards word boundaries (after `/ _ - .`, space, or a camelCase
//! transition) and consecutive runs, and penalizes skipped characters.
//!
//! Case folding is per character and Latin-oriented: each character is
//! replaced by the first character of its lower-case mapping so target
//! indices never shift.

mod matcher;
mod pattern;
mod rank;

pub use matcher::{
    FuzzyMatch, SCORE_CONSECUTIVE, SCORE_FIRST_CHAR, SCORE_GAP_PENALTY, SCORE_WORD_BOUNDARY,
    fuzzy_match, fuzzy_score,
};
pub use pattern::{LIKE_ESCAPE, MATCH_ALL_PATTERN, build_like_pattern};
pub use rank::{DEFAULT_RANK_LIMIT, rank_matches};
