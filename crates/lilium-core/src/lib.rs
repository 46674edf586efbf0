// Public fallible APIs in this crate share one concrete error contract (`LiliumError`).
// Repeating per-function `# Errors` boilerplate obscures behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod config;
pub mod control;
pub mod error;
pub mod fuzzy;
pub mod models;
pub mod search;
pub mod store;

pub use config::{ControlConfig, SearchConfig};
pub use error::{LiliumError, Result};
pub use fuzzy::{FuzzyMatch, build_like_pattern, fuzzy_match, fuzzy_score, rank_matches};
pub use models::{LinkStyle, NoteResult, SearchOptions, SearchOutcome};
pub use search::{CandidateSource, search_notes};
pub use store::SqliteNoteStore;
