use std::path::Path;
#[cfg(unix)]
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{Connection, OpenFlags, params};
use tracing::debug;
use uuid::Uuid;

use crate::error::{LiliumError, Result};
use crate::models::NoteResult;
use crate::search::CandidateSource;

mod migration;
mod seed;

pub use seed::{SeedReport, seed_sample_notes};

pub(crate) const NOTE_PATH_VIEW: &str = "v_note_id_path_mapping";

/// Notes database exposing the `v_note_id_path_mapping` path view.
#[derive(Clone)]
pub struct SqliteNoteStore {
    conn: Arc<Mutex<Connection>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewNote<'a> {
    pub title: &'a str,
    pub summary: Option<&'a str>,
    pub content: &'a str,
    pub syntax: &'a str,
    pub folder_id: Option<&'a str>,
    pub user_id: &'a str,
}

impl std::fmt::Debug for SqliteNoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteNoteStore").finish_non_exhaustive()
    }
}

impl SqliteNoteStore {
    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| LiliumError::mutex_poisoned("sqlite"))?;
        f(&conn)
    }

    fn with_tx<T>(&self, f: impl FnOnce(&rusqlite::Transaction<'_>) -> Result<T>) -> Result<T> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| LiliumError::mutex_poisoned("sqlite"))?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        drop(conn);
        Ok(value)
    }

    /// Opens an existing notes database for searching.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LiliumError::NotFound(format!(
                "notes database {}",
                path.display()
            )));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.ensure_path_view()?;
        Ok(store)
    }

    /// Opens (or creates) a writable notes database and applies the schema.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        #[cfg(unix)]
        harden_sqlite_permissions(path)?;
        Ok(store)
    }

    pub fn insert_folder(
        &self,
        title: &str,
        parent_id: Option<&str>,
        user_id: &str,
    ) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        let now = Utc::now().to_rfc3339();
        self.with_conn(|conn| {
            conn.execute(
                r"
                INSERT INTO folders(id, title, parent_id, user_id, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                ",
                params![id, title, parent_id, user_id, now],
            )?;
            Ok(())
        })?;
        Ok(id)
    }

    pub fn insert_notes(&self, notes: &[NewNote<'_>]) -> Result<Vec<String>> {
        let now = Utc::now().to_rfc3339();
        self.with_tx(|tx| {
            let mut ids = Vec::with_capacity(notes.len());
            for note in notes {
                let id = Uuid::new_v4().simple().to_string();
                tx.execute(
                    r"
                    INSERT INTO notes(
                        id, title, abstract, content, syntax, parent_id, user_id, created_at, updated_at
                    )
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
                    ",
                    params![
                        id,
                        note.title,
                        note.summary,
                        note.content,
                        note.syntax,
                        note.folder_id,
                        note.user_id,
                        now
                    ],
                )?;
                ids.push(id);
            }
            Ok(ids)
        })
    }

    pub fn list_notes(&self) -> Result<Vec<NoteResult>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r"
                SELECT id, title, full_path
                FROM v_note_id_path_mapping
                ORDER BY full_path
                ",
            )?;
            let rows = stmt.query_map([], read_note_row)?;

            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
    }

    pub fn count_notes(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM v_note_id_path_mapping",
                [],
                |row| row.get::<_, i64>(0),
            )?;
            Ok(i64_to_usize_saturating(count))
        })
    }
}

impl CandidateSource for SqliteNoteStore {
    /// Rows whose lower-cased path satisfies `pattern`, ordered by path.
    fn fetch_candidates(&self, pattern: &str, limit: usize) -> Result<Vec<NoteResult>> {
        let candidates = self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(
                r"
                SELECT id, title, full_path
                FROM v_note_id_path_mapping
                WHERE LOWER(full_path) LIKE ?1 ESCAPE '\'
                ORDER BY full_path
                LIMIT ?2
                ",
            )?;
            let rows = stmt.query_map(
                params![pattern, usize_to_i64_saturating(limit)],
                read_note_row,
            )?;

            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })?;
        debug!(pattern, limit, fetched = candidates.len(), "fetched note candidates");
        Ok(candidates)
    }
}

fn read_note_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<NoteResult> {
    Ok(NoteResult {
        id: row.get(0)?,
        title: row.get(1)?,
        full_path: row.get(2)?,
    })
}

fn usize_to_i64_saturating(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn i64_to_usize_saturating(value: i64) -> usize {
    if value <= 0 {
        0
    } else {
        usize::try_from(value).unwrap_or(usize::MAX)
    }
}

#[cfg(unix)]
fn harden_sqlite_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    for suffix in ["", "-wal", "-shm"] {
        let mut os = path.as_os_str().to_os_string();
        os.push(suffix);
        let candidate = PathBuf::from(os);
        if candidate.exists() {
            std::fs::set_permissions(candidate, std::fs::Permissions::from_mode(0o600))?;
        }
    }
    Ok(())
}
