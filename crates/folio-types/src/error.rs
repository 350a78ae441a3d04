use thiserror::Error;

/// Errors from repository operations (used by trait definitions in folio-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors related to chat operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat session not found")]
    SessionNotFound,

    #[error("chat message not found")]
    MessageNotFound,

    #[error("invalid chat request: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Errors related to the portfolio catalog (projects, skills, gigs).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{kind} '{slug}' not found")]
    NotFound { kind: &'static str, slug: String },

    #[error("invalid catalog data: {0}")]
    Invalid(String),

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Errors related to user accounts and bearer tokens.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("invalid bearer token")]
    InvalidToken,

    #[error("email '{0}' is already registered")]
    EmailTaken(String),

    #[error("invalid account data: {0}")]
    Invalid(String),

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Errors related to analytics event recording.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("unknown event type: '{0}'")]
    UnknownEventType(String),

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Errors related to hire requests.
#[derive(Debug, Error)]
pub enum HireError {
    #[error("gig '{0}' not found")]
    GigNotFound(String),

    #[error("invalid hire request: {0}")]
    Invalid(String),

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Errors from the retention sweep.
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("retention window of {0} days is out of range")]
    RetentionOutOfRange(u32),

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}
