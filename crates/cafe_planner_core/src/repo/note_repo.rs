//! Quick-note collection over the `notes` table.
//!
//! # Invariants
//! - `get_all` is ordered by `created_at ASC, id ASC`.
//! - `put` on an existing id replaces the row; the service layer never edits
//!   notes, import and seeding are the only callers that do.

use crate::model::note::{Note, NoteId};
use crate::model::theme::Theme;
use crate::repo::{
    ensure_connection_ready, parse_uuid, CollectionRepository, RepoError, RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLLECTION: &str = "notes";

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    content,
    created_at,
    theme
FROM notes";

/// SQLite-backed note collection.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, COLLECTION, &["id", "content", "created_at", "theme"])?;
        Ok(Self { conn })
    }
}

impl CollectionRepository for SqliteNoteRepository<'_> {
    type Item = Note;

    fn get_all(&self) -> RepoResult<Vec<Note>> {
        load_notes(self.conn)
    }

    fn get(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let raw = stmt
            .query_row([id.to_string()], RawNote::from_row)
            .optional()?;
        raw.map(RawNote::into_note).transpose()
    }

    fn put(&self, item: &Note) -> RepoResult<()> {
        item.validate()?;
        upsert_note(self.conn, item)
    }

    fn delete(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                collection: COLLECTION,
                id,
            });
        }
        Ok(())
    }

    fn bulk_seed(&self, items: &[Note]) -> RepoResult<()> {
        for item in items {
            item.validate()?;
        }
        let tx = self.conn.unchecked_transaction()?;
        for item in items {
            upsert_note(&tx, item)?;
        }
        tx.commit()?;
        Ok(())
    }
}

pub(crate) fn load_notes(conn: &Connection) -> RepoResult<Vec<Note>> {
    let mut stmt = conn.prepare(&format!(
        "{NOTE_SELECT_SQL} ORDER BY created_at ASC, id ASC;"
    ))?;
    let raw_rows = stmt
        .query_map([], RawNote::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    raw_rows.into_iter().map(RawNote::into_note).collect()
}

pub(crate) fn upsert_note(conn: &Connection, note: &Note) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO notes (id, content, created_at, theme)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
            content = excluded.content,
            created_at = excluded.created_at,
            theme = excluded.theme;",
        params![
            note.id.to_string(),
            note.content.as_str(),
            note.created_at,
            note.theme.as_str(),
        ],
    )?;
    Ok(())
}

struct RawNote {
    id: String,
    content: String,
    created_at: i64,
    theme: String,
}

impl RawNote {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            content: row.get("content")?,
            created_at: row.get("created_at")?,
            theme: row.get("theme")?,
        })
    }

    fn into_note(self) -> RepoResult<Note> {
        let theme = Theme::parse(&self.theme).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid theme `{}` in notes.theme", self.theme))
        })?;
        let note = Note {
            id: parse_uuid(&self.id, "notes.id")?,
            content: self.content,
            created_at: self.created_at,
            theme,
        };
        note.validate()?;
        Ok(note)
    }
}
