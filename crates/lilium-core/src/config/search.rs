use crate::error::Result;
use crate::fuzzy::DEFAULT_RANK_LIMIT;
use crate::models::SearchOptions;
use crate::search::DEFAULT_CANDIDATE_LIMIT;

use super::env::{parse_limit_var, read_non_empty_env};

const ENV_RESULT_LIMIT: &str = "LILIUM_RESULT_LIMIT";
const ENV_CANDIDATE_LIMIT: &str = "LILIUM_CANDIDATE_LIMIT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub result_limit: usize,
    pub candidate_limit: usize,
}

impl SearchConfig {
    /// Resolves search options, letting explicit limits win.
    ///
    /// Only the limits left as `None` are read from the environment, so a
    /// malformed variable cannot fail a call that overrides it.
    pub fn options_from_env(
        limit: Option<usize>,
        candidate_limit: Option<usize>,
    ) -> Result<SearchOptions> {
        Self::resolve(limit, candidate_limit, read_non_empty_env).map(|config| config.options())
    }

    fn resolve(
        limit: Option<usize>,
        candidate_limit: Option<usize>,
        read_env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let result_limit = match limit {
            Some(value) => value,
            None => parse_limit_var(
                ENV_RESULT_LIMIT,
                read_env(ENV_RESULT_LIMIT).as_deref(),
                DEFAULT_RANK_LIMIT,
                0,
            )?,
        };
        let candidate_limit = match candidate_limit {
            Some(value) => value,
            None => parse_limit_var(
                ENV_CANDIDATE_LIMIT,
                read_env(ENV_CANDIDATE_LIMIT).as_deref(),
                DEFAULT_CANDIDATE_LIMIT,
                1,
            )?,
        };
        Ok(Self {
            result_limit,
            candidate_limit,
        })
    }

    #[must_use]
    pub const fn options(&self) -> SearchOptions {
        SearchOptions {
            limit: self.result_limit,
            candidate_limit: self.candidate_limit,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_limit: DEFAULT_RANK_LIMIT,
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }
}
