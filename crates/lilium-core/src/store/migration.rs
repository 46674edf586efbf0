use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{LiliumError, Result};

use super::{NOTE_PATH_VIEW, SqliteNoteStore};

const NOTE_SCHEMA_SQL: &str = r"
    PRAGMA foreign_keys = ON;
    CREATE TABLE IF NOT EXISTS folders (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        parent_id TEXT,
        user_id TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        FOREIGN KEY (parent_id) REFERENCES folders(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS notes (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        abstract TEXT,
        content TEXT NOT NULL,
        syntax TEXT NOT NULL DEFAULT 'md',
        parent_id TEXT,
        user_id TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        FOREIGN KEY (parent_id) REFERENCES folders(id) ON DELETE CASCADE
    );

    CREATE INDEX IF NOT EXISTS idx_notes_parent_id ON notes(parent_id);
    CREATE INDEX IF NOT EXISTS idx_folders_parent_id ON folders(parent_id);

    CREATE VIEW IF NOT EXISTS v_note_id_path_mapping AS
    WITH RECURSIVE folder_path AS (
        SELECT id, title, parent_id, user_id, title AS path
        FROM folders
        WHERE parent_id IS NULL

        UNION ALL

        SELECT f.id, f.title, f.parent_id, f.user_id, fp.path || '/' || f.title AS path
        FROM folders f
        INNER JOIN folder_path fp ON f.parent_id = fp.id
    )
    SELECT
        n.id,
        n.title,
        n.syntax,
        n.user_id,
        CASE
            WHEN n.parent_id IS NULL THEN n.title || '.' || n.syntax
            ELSE fp.path || '/' || n.title || '.' || n.syntax
        END AS full_path
    FROM notes n
    LEFT JOIN folder_path fp ON n.parent_id = fp.id;
";

impl SqliteNoteStore {
    pub(super) fn migrate(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(NOTE_SCHEMA_SQL)?;
            Ok(())
        })
    }

    pub(super) fn ensure_path_view(&self) -> Result<()> {
        self.with_conn(|conn| {
            if has_view(conn, NOTE_PATH_VIEW)? {
                Ok(())
            } else {
                Err(LiliumError::Validation(format!(
                    "unsupported notes database: view {NOTE_PATH_VIEW} is missing"
                )))
            }
        })
    }
}

fn has_view(conn: &Connection, view: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'view' AND name = ?1 LIMIT 1",
            params![view],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    Ok(exists)
}
