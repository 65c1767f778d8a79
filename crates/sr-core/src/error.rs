//! # AppError
//!
//! Centralized error handling for the Stockroom workspace.
//! Lookups that find nothing return `Option::None`; only the cases below are errors.

use thiserror::Error;

/// The primary error type for all sr-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Sign-up with an email that is already registered
    #[error("a user with email {0} already exists")]
    DuplicateEmail(String),

    /// Sign-in with an email no user has
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A mutation named an entity that does not exist (e.g. Room, Post)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Caller contract violated (e.g. blank title)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Action needs a signed-in user
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource already exists (e.g. duplicate room name)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Bootstrap failure (e.g. unreadable configuration)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for Stockroom logic.
pub type Result<T> = std::result::Result<T, AppError>;
