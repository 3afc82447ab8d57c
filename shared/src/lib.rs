//! Shared types for the laundry POS backend
//!
//! Common types used by the server and its tests: entity models,
//! the unified error system and response envelope, and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
