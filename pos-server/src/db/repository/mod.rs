//! Repository Module
//!
//! CRUD operations over the SQLite tables, one module per entity. All
//! functions are free functions over `&SqlitePool` returning [`RepoResult`].
//! Queries are runtime-checked (`sqlx::query_as`), ordered by `id` wherever a
//! first-match rule applies, so candidate selection is deterministic.

pub mod category;
pub mod client;
pub mod order;
pub mod price;

use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return RepoError::Duplicate(db.message().to_string());
            }
            if db.is_foreign_key_violation() {
                return RepoError::Validation(format!(
                    "Foreign key constraint failed: {}",
                    db.message()
                ));
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::with_message(ErrorCode::ValidationFailed, msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
