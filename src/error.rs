//! Error types for the library console

use thiserror::Error;

/// Broad error categories, used by the console to decide between a warning
/// line and aborting the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    StateConflict,
    Store,
    Internal,
}

/// Failures raised by a [`TableStore`](crate::store::TableStore) implementation
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a 4xx status (constraint violation, bad filter, ...)
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Store server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Malformed row: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the store was unreachable or failed on its side
    pub fn is_outage(&self) -> bool {
        matches!(self, StoreError::Transport(_) | StoreError::Server { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid search field '{0}' (expected title, author or category)")]
    InvalidField(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Book ID {0} is not available")]
    OutOfStock(i64),

    #[error("{0}")]
    HasBorrowHistory(String),

    #[error("Borrow record {0} has already been returned")]
    AlreadyReturned(i64),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::InvalidField(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::OutOfStock(_)
            | AppError::HasBorrowHistory(_)
            | AppError::AlreadyReturned(_)
            | AppError::Conflict(_) => ErrorKind::StateConflict,
            AppError::Store(_) => ErrorKind::Store,
            AppError::Config(_) | AppError::Io(_) => ErrorKind::Internal,
        }
    }

    /// Errors that end the session instead of being reported as a warning
    pub fn is_fatal(&self) -> bool {
        match self.kind() {
            ErrorKind::Internal => true,
            ErrorKind::Store => matches!(self, AppError::Store(e) if e.is_outage()),
            _ => false,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
