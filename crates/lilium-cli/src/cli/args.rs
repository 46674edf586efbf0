use std::path::PathBuf;

use clap::{Args, ValueEnum};
use lilium_core::LinkStyle;

use super::parsers::{parse_limit_arg, parse_min_one_usize};

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(allow_hyphen_values = true)]
    pub query: String,
    /// Maximum ranked results (overrides `LILIUM_RESULT_LIMIT`).
    #[arg(long, allow_negative_numbers = true, value_parser = parse_limit_arg)]
    pub limit: Option<usize>,
    /// Maximum rows pulled by the database prefilter.
    #[arg(long, allow_negative_numbers = true, value_parser = parse_min_one_usize)]
    pub candidate_limit: Option<usize>,
    /// Print one markdown link per line instead of JSON.
    #[arg(long, value_enum)]
    pub link: Option<LinkArg>,
    /// Include fuzzy score and matched positions for each result.
    #[arg(long, default_value_t = false, conflicts_with = "link")]
    pub explain: bool,
}

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Database file to (re)create with the sample notes.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkArg {
    Id,
    Path,
}

impl From<LinkArg> for LinkStyle {
    fn from(value: LinkArg) -> Self {
        match value {
            LinkArg::Id => Self::Id,
            LinkArg::Path => Self::Path,
        }
    }
}
