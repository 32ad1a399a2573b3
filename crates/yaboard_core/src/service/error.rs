//! Use-case error and success envelopes shared by services.

use crate::model::ValidationError;
use crate::policy::content::ProhibitedWord;
use crate::repo::RepoError;
use crate::route::Route;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for news/notes use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Anonymous principal on a protected action. Redirect to
    /// `login_redirect`.
    AuthRequired { login_redirect: String },
    /// Record missing, or owned by someone else.
    NotFound,
    /// Supplied or derived slug is already used by another note.
    SlugConflict(String),
    /// Submitted text contains a denylisted word.
    ProhibitedContent(ProhibitedWord),
    /// Field-level validation failure.
    Invalid(ValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl ServiceError {
    pub(crate) fn auth_required(requested: &Route) -> Self {
        Self::AuthRequired {
            login_redirect: requested.login_redirect(),
        }
    }

    /// Stable machine-readable code for logs and API envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthRequired { .. } => "auth_required",
            Self::NotFound => "not_found",
            Self::SlugConflict(_) => "slug_conflict",
            Self::ProhibitedContent(_) => "prohibited_content",
            Self::Invalid(_) => "invalid_input",
            Self::Repo(_) => "repo_error",
            Self::InconsistentState(_) => "inconsistent_state",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthRequired { login_redirect } => {
                write!(f, "authentication required; redirect to {login_redirect}")
            }
            Self::NotFound => write!(f, "not found"),
            Self::SlugConflict(slug) => write!(
                f,
                "{slug} - такой slug уже существует, придумайте уникальное значение!"
            ),
            Self::ProhibitedContent(err) => write!(f, "{err}"),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ProhibitedContent(err) => Some(err),
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(_) => Self::NotFound,
            RepoError::SlugTaken(slug) => Self::SlugConflict(slug),
            RepoError::Validation(err) => Self::Invalid(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<ProhibitedWord> for ServiceError {
    fn from(value: ProhibitedWord) -> Self {
        Self::ProhibitedContent(value)
    }
}

/// Successful create/edit: the stored record and where to send the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation<T> {
    pub record: T,
    pub redirect: Route,
}
