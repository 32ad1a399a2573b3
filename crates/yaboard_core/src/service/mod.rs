//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate policy decisions and repository calls into use-case APIs.
//! - Keep routing/session layers decoupled from storage details.
//!
//! # Invariants
//! - Every use-case takes the requesting `Principal` explicitly.

pub mod error;
pub mod news_service;
pub mod note_service;
