//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist private notes addressed by unique slug.
//! - Translate slug `UNIQUE` violations into `RepoError::SlugTaken`.
//!
//! # Invariants
//! - `update_note` never rewrites `author_uuid`.
//! - Owner lists are ordered by insertion (`rowid ASC`).

use crate::model::note::{Note, NoteId};
use crate::model::user::UserId;
use crate::repo::{ensure_tables, is_unique_violation, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT uuid, title, text, slug, author_uuid FROM notes";

/// Repository interface for note persistence.
pub trait NoteRepository {
    /// Persists one note; a taken slug fails with `SlugTaken`.
    fn create_note(&self, note: &Note) -> RepoResult<NoteId>;
    fn get_note_by_slug(&self, slug: &str) -> RepoResult<Option<Note>>;
    /// Whether any note other than `except` already uses `slug`.
    fn slug_exists(&self, slug: &str, except: Option<NoteId>) -> RepoResult<bool>;
    /// Replaces title, text and slug of an existing note.
    fn update_note(&self, note: &Note) -> RepoResult<()>;
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
    fn list_notes_by_author(&self, author: UserId) -> RepoResult<Vec<Note>>;
    fn count_notes(&self) -> RepoResult<u64>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["notes", "users"])?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        note.validate()?;

        self.conn
            .execute(
                "INSERT INTO notes (uuid, title, text, slug, author_uuid)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    note.id.to_string(),
                    note.title.as_str(),
                    note.text.as_str(),
                    note.slug.as_str(),
                    note.author.to_string(),
                ],
            )
            .map_err(|err| slug_error(err, &note.slug))?;

        Ok(note.id)
    }

    fn get_note_by_slug(&self, slug: &str) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE slug = ?1;"))?;
        let mut rows = stmt.query([slug])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn slug_exists(&self, slug: &str, except: Option<NoteId>) -> RepoResult<bool> {
        let except = except.map(|id| id.to_string());
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM notes
                WHERE slug = ?1
                  AND (?2 IS NULL OR uuid <> ?2)
            );",
            params![slug, except],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn update_note(&self, note: &Note) -> RepoResult<()> {
        note.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE notes
                 SET
                    title = ?2,
                    text = ?3,
                    slug = ?4,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE uuid = ?1;",
                params![
                    note.id.to_string(),
                    note.title.as_str(),
                    note.text.as_str(),
                    note.slug.as_str(),
                ],
            )
            .map_err(|err| slug_error(err, &note.slug))?;

        if changed == 0 {
            return Err(RepoError::NotFound(note.id));
        }
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn list_notes_by_author(&self, author: UserId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL} WHERE author_uuid = ?1 ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([author.to_string()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn count_notes(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

fn slug_error(err: rusqlite::Error, slug: &str) -> RepoError {
    if is_unique_violation(&err) {
        RepoError::SlugTaken(slug.to_string())
    } else {
        err.into()
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let uuid_text: String = row.get("uuid")?;
    let author_text: String = row.get("author_uuid")?;

    Ok(Note {
        id: parse_uuid(&uuid_text, "notes.uuid")?,
        title: row.get("title")?,
        text: row.get("text")?,
        slug: row.get("slug")?,
        author: parse_uuid(&author_text, "notes.author_uuid")?,
    })
}
