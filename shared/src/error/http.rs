//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    ///
    /// Uniqueness and range conflicts surface as 400, not 409: the API
    /// contract treats them as validation failures of the request body.
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found (path lookups)
            Self::NotFound
            | Self::OrderNotFound
            | Self::CategoryNotFound
            | Self::PriceNotFound
            | Self::ClientNotFound => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request: validation failures, uniqueness conflicts,
            // and reference-validation misses on write paths
            Self::Unknown
            | Self::ValidationFailed
            | Self::AlreadyExists
            | Self::InvalidRequest
            | Self::OrderClientMissing
            | Self::OrderCategoryMissing
            | Self::CategoryNameExists
            | Self::PriceRangeOverlap
            | Self::CustomPriceExists
            | Self::CustomAmountRequired
            | Self::InvalidContactNumber => StatusCode::BAD_REQUEST,
        }
    }
}
