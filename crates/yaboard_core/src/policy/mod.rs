//! Pure decision rules shared by the news and notes use-cases.
//!
//! # Responsibility
//! - Ownership gate for edit/delete of owned records.
//! - Listing rules (which records, in which order).
//! - Content rules for submitted text.
//!
//! # Invariants
//! - Every function here is a pure function of its arguments; nothing reads
//!   storage or global state.

pub mod content;
pub mod gate;
pub mod listing;
