use std::collections::HashMap;

use serde::Serialize;

use crate::error::{LiliumError, Result};

use super::{NewNote, SqliteNoteStore};

const SAMPLE_FOLDERS: [(&str, Option<&str>); 7] = [
    ("projects", None),
    ("journal", None),
    ("reference", None),
    ("python", Some("projects")),
    ("rust", Some("projects")),
    ("2024", Some("journal")),
    ("2025", Some("journal")),
];

// (title, abstract, content, folder)
const SAMPLE_NOTES: [(&str, &str, &str, Option<&str>); 12] = [
    ("readme", "Project readme", "# Readme\n\nThis is a test.", None),
    ("todo", "Things to do", "- [ ] Task 1\n- [ ] Task 2", None),
    ("palette", "Palette project notes", "# Palette\n\nLink palette app.", Some("python")),
    ("fastapi-app", "FastAPI project", "# FastAPI App\n\nREST API.", Some("python")),
    ("cli-tool", "Rust CLI tool", "# CLI Tool\n\nCommand line tool in Rust.", Some("rust")),
    ("01-15", "January 15 journal", "Today I worked on...", Some("2024")),
    ("01-16", "January 16 journal", "Continued working...", Some("2024")),
    ("12-01", "December 1 journal", "Starting the month...", Some("2025")),
    ("12-04", "December 4 journal", "Building palette app...", Some("2025")),
    (
        "vim-shortcuts",
        "Vim shortcuts reference",
        "# Vim Shortcuts\n\n- `:w` save\n- `:q` quit",
        Some("reference"),
    ),
    (
        "git-commands",
        "Git commands reference",
        "# Git Commands\n\n- `git status`\n- `git add`",
        Some("reference"),
    ),
    ("sql-reference", "SQL reference", "# SQL\n\n- SELECT\n- INSERT", Some("reference")),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub folders: usize,
    pub notes: usize,
}

/// Fills `store` with the small development corpus used by the palette demo.
pub fn seed_sample_notes(store: &SqliteNoteStore, user_id: &str) -> Result<SeedReport> {
    let mut folder_ids = HashMap::<&str, String>::new();
    for (title, parent) in SAMPLE_FOLDERS {
        let parent_id = parent.map(|name| lookup(&folder_ids, name)).transpose()?;
        let id = store.insert_folder(title, parent_id, user_id)?;
        folder_ids.insert(title, id);
    }

    let mut notes = Vec::with_capacity(SAMPLE_NOTES.len());
    for (title, summary, content, folder) in SAMPLE_NOTES {
        notes.push(NewNote {
            title,
            summary: Some(summary),
            content,
            syntax: "md",
            folder_id: folder.map(|name| lookup(&folder_ids, name)).transpose()?,
            user_id,
        });
    }
    let inserted = store.insert_notes(&notes)?;

    Ok(SeedReport {
        folders: folder_ids.len(),
        notes: inserted.len(),
    })
}

fn lookup<'a>(folder_ids: &'a HashMap<&str, String>, name: &str) -> Result<&'a str> {
    folder_ids
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| LiliumError::Internal(format!("sample folder {name} seeded out of order")))
}
