//! Error types for wedding-site.

use thiserror::Error;

/// Errors raised while loading the site or generating calendars.
#[derive(Error, Debug)]
pub enum WeddingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    /// A wall-clock time skipped by a DST transition
    #[error("Invalid local time: {0}")]
    LocalTime(String),
}

/// Result type alias for wedding-site operations.
pub type WeddingResult<T> = Result<T, WeddingError>;
