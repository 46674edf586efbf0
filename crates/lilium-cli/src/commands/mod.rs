use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use lilium_core::control::ControlCommand;
use lilium_core::models::SearchOptions;
use lilium_core::store::seed_sample_notes;
use lilium_core::{
    ControlConfig, LiliumError, NoteResult, SearchConfig, SearchOutcome, SqliteNoteStore,
    fuzzy_match, search_notes,
};
use serde::Serialize;
use tracing::info;

use crate::cli::{Cli, Commands, SearchArgs};

mod control;
mod serve;


const SEED_USER_ID: &str = "local";

pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Search(args) => {
            let options = SearchConfig::options_from_env(args.limit, args.candidate_limit)
                .context("invalid search limit environment")?;
            run_search(&cli.db, &args, options)
        }
        Commands::List => {
            let store = open_store(&cli.db)?;
            print_json(&store.list_notes()?)
        }
        Commands::Seed(args) => run_seed(&args.path),
        Commands::Serve => {
            let (socket, timeout) = control_endpoint(cli.socket)?;
            serve::run_serve(&cli.db, &socket, timeout)
        }
        Commands::Toggle => send_control(cli.socket, ControlCommand::Toggle),
        Commands::Show => send_control(cli.socket, ControlCommand::Show),
        Commands::Hide => send_control(cli.socket, ControlCommand::Hide),
        Commands::Stop => send_control(cli.socket, ControlCommand::Stop),
        Commands::Status => {
            let (socket, timeout) = control_endpoint(cli.socket)?;
            control::status(&socket, timeout)
        }
    }
}

/// Socket path and timeout; `--socket` wins over `LILIUM_SOCKET`.
fn control_endpoint(socket: Option<PathBuf>) -> Result<(PathBuf, Duration)> {
    let config = ControlConfig::from_env().context("invalid control channel environment")?;
    Ok((socket.unwrap_or(config.socket_path), config.timeout))
}

fn send_control(socket: Option<PathBuf>, command: ControlCommand) -> Result<()> {
    let (socket, timeout) = control_endpoint(socket)?;
    control::send(&socket, command, timeout)
}

pub(crate) fn report_error(
    err: &anyhow::Error,
    json_errors: bool,
    operation: &str,
    query: Option<String>,
) {
    if !json_errors {
        eprintln!("error: {err:#}");
        return;
    }
    let payload = match err.downcast_ref::<LiliumError>() {
        Some(lilium) => lilium.to_payload(operation, query),
        None => LiliumError::Internal(format!("{err:#}")).to_payload(operation, query),
    };
    match serde_json::to_string(&payload) {
        Ok(line) => eprintln!("{line}"),
        Err(_) => eprintln!("error: {err:#}"),
    }
}

fn open_store(db: &Path) -> Result<SqliteNoteStore> {
    SqliteNoteStore::open_read_only(db)
        .with_context(|| format!("failed to open notes database {}", db.display()))
}

#[derive(Debug, Serialize)]
struct ExplainedNote<'a> {
    #[serde(flatten)]
    note: &'a NoteResult,
    score: Option<i64>,
    positions: Vec<usize>,
}

fn explain<'a>(query: &str, note: &'a NoteResult) -> ExplainedNote<'a> {
    let matched = fuzzy_match(query, &note.full_path);
    ExplainedNote {
        note,
        score: matched.as_ref().map(|m| m.score),
        positions: matched.map(|m| m.positions).unwrap_or_default(),
    }
}

fn run_search(db: &Path, args: &SearchArgs, options: SearchOptions) -> Result<()> {
    let store = open_store(db)?;
    let outcome = search_notes(&store, &args.query, options)
        .with_context(|| format!("search failed for query '{}'", args.query))?;
    let notes = match outcome {
        SearchOutcome::Idle => {
            eprintln!("empty query: nothing to rank");
            Vec::new()
        }
        SearchOutcome::Ranked(notes) => notes,
    };

    if let Some(link) = args.link {
        let mut stdout = io::stdout().lock();
        for note in &notes {
            writeln!(stdout, "{}", note.markdown_link(link.into()))?;
        }
        return Ok(());
    }
    if args.explain {
        let explained = notes
            .iter()
            .map(|note| explain(&args.query, note))
            .collect::<Vec<_>>();
        return print_json(&explained);
    }
    print_json(&notes)
}

#[derive(Debug, Serialize)]
struct SeedOutput<'a> {
    path: &'a Path,
    folders: usize,
    notes: usize,
}

fn run_seed(path: &Path) -> Result<()> {
    if path.is_dir() {
        anyhow::bail!("{} is a directory", path.display());
    }
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
    }
    let store = SqliteNoteStore::create(path)
        .with_context(|| format!("failed to create notes database {}", path.display()))?;
    let report = seed_sample_notes(&store, SEED_USER_ID).context("failed to seed sample notes")?;
    info!(path = %path.display(), notes = report.notes, "seeded sample notes");
    print_json(&SeedOutput {
        path,
        folders: report.folders,
        notes: report.notes,
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
