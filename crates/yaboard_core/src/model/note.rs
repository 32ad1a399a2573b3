//! Private note record.
//!
//! # Invariants
//! - `slug` is unique across all notes and URL-safe.
//! - `author` is fixed at creation; edits only touch title/text/slug.

use crate::model::user::UserId;
use crate::model::{require_max_chars, require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type NoteId = Uuid;

pub const NOTE_TITLE_MAX_CHARS: usize = 100;
pub const NOTE_SLUG_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author: UserId,
}

impl Note {
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        slug: impl Into<String>,
        author: UserId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            text: text.into(),
            slug: slug.into(),
            author,
        }
    }

    /// Validates user-editable fields.
    ///
    /// # Errors
    /// - Empty title/text/slug.
    /// - Title or slug longer than 100 characters.
    /// - Slug with characters outside `[-a-zA-Z0-9_]`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_max_chars("title", &self.title, NOTE_TITLE_MAX_CHARS)?;
        require_text("text", &self.text)?;
        validate_slug(&self.slug, NOTE_SLUG_MAX_CHARS)
    }
}

/// Checks slug charset and that it fits in `max_chars`.
pub fn validate_slug(slug: &str, max_chars: usize) -> Result<(), ValidationError> {
    require_text("slug", slug)?;
    require_max_chars("slug", slug, max_chars)?;
    let valid = slug
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if !valid {
        return Err(ValidationError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_slug, Note};
    use crate::model::ValidationError;
    use uuid::Uuid;

    #[test]
    fn accepts_mixed_case_slug_with_underscore() {
        assert!(validate_slug("Slug_text", 100).is_ok());
        assert!(validate_slug("note-slug", 100).is_ok());
    }

    #[test]
    fn rejects_slug_with_spaces_or_cyrillic() {
        assert_eq!(
            validate_slug("bad slug", 100),
            Err(ValidationError::InvalidSlug("bad slug".to_string()))
        );
        assert!(validate_slug("заметка", 100).is_err());
    }

    #[test]
    fn rejects_slug_over_given_limit() {
        assert_eq!(
            validate_slug(&"a".repeat(21), 20),
            Err(ValidationError::TooLong {
                field: "slug",
                max: 20
            })
        );
        assert!(validate_slug(&"a".repeat(20), 20).is_ok());
    }

    #[test]
    fn rejects_overlong_title() {
        let note = Note::new("x".repeat(101), "text", "slug", Uuid::new_v4());
        assert_eq!(
            note.validate(),
            Err(ValidationError::TooLong {
                field: "title",
                max: 100
            })
        );
    }
}
