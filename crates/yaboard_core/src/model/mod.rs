//! Domain model for the news board and the private notes book.
//!
//! # Responsibility
//! - Define the records persisted by core (users, news, comments, notes).
//! - Define the requesting identity (`Principal`) passed into every use-case.
//!
//! # Invariants
//! - Every persisted record is identified by a stable UUID.
//! - Owned records (`Comment`, `Note`) never change owner after creation.
//! - Field-level validation lives next to the record it guards.

pub mod news;
pub mod note;
pub mod principal;
pub mod user;

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field-level validation failure for user-submitted record data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is empty after trimming.
    EmptyField(&'static str),
    /// Field exceeds its maximum length in characters.
    TooLong { field: &'static str, max: usize },
    /// Slug contains characters outside `[-a-zA-Z0-9_]`.
    InvalidSlug(String),
    /// Date year outside `0..=9999`; stored `YYYY-MM-DD` text would no longer
    /// sort chronologically.
    DateOutOfRange(NaiveDate),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "field `{field}` must not be empty"),
            Self::TooLong { field, max } => {
                write!(f, "field `{field}` must be at most {max} characters")
            }
            Self::InvalidSlug(value) => write!(
                f,
                "slug `{value}` may only contain latin letters, digits, hyphens and underscores"
            ),
            Self::DateOutOfRange(date) => {
                write!(f, "date `{date}` must fall within years 0000 to 9999")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn require_max_chars(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
