use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;
mod parsers;


pub use args::{LinkArg, SearchArgs, SeedArgs};

#[derive(Debug, Parser)]
#[command(name = "lilium")]
#[command(about = "Fuzzy note search and markdown link palette", version)]
pub struct Cli {
    /// Notes database used by `search`, `list` and `serve`.
    #[arg(long, global = true, default_value = "notes.db")]
    pub db: PathBuf,

    /// Control socket path. Defaults to `LILIUM_SOCKET` or a per-user temp path.
    #[arg(long, global = true)]
    pub socket: Option<PathBuf>,

    /// Print failures as a JSON payload on stderr.
    #[arg(long, global = true, default_value_t = false)]
    pub json_errors: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Search(SearchArgs),
    List,
    Seed(SeedArgs),
    Serve,
    Toggle,
    Show,
    Hide,
    Stop,
    Status,
}

impl Commands {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Search(_) => "search",
            Self::List => "list",
            Self::Seed(_) => "seed",
            Self::Serve => "serve",
            Self::Toggle => "toggle",
            Self::Show => "show",
            Self::Hide => "hide",
            Self::Stop => "stop",
            Self::Status => "status",
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Search(args) => Some(args.query.as_str()),
            _ => None,
        }
    }
}
