//! Core domain logic for the yaboard news board and notes book.
//! This crate is the single source of truth for access and listing rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod policy;
pub mod repo;
pub mod route;
pub mod service;
pub mod slug;

pub use config::{load_from_file, load_from_str, BoardConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::news::{Comment, CommentId, NewsId, NewsItem};
pub use model::note::{Note, NoteId};
pub use model::principal::Principal;
pub use model::user::{User, UserId};
pub use model::ValidationError;
pub use policy::content::{ContentPolicy, ProhibitedWord, PROHIBITED_CONTENT_WARNING};
pub use policy::gate::{authorize, Action, Decision};
pub use policy::listing::ListingPolicy;
pub use repo::news_repo::{NewsRepository, SqliteNewsRepository};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use route::{route_access, Route};
pub use service::error::{Mutation, ServiceError, ServiceResult};
pub use service::news_service::{NewsDetail, NewsService};
pub use service::note_service::{NoteForm, NoteInput, NoteService};
pub use slug::slugify;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
