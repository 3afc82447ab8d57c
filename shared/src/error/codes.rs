//! Unified error codes for the laundry POS backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 6xxx: Pricing and category errors
//! - 7xxx: Client errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and stable wire compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Referenced client does not exist
    OrderClientMissing = 4002,
    /// Referenced category does not exist
    OrderCategoryMissing = 4003,

    // ==================== 6xxx: Pricing / Category ====================
    /// Category not found
    CategoryNotFound = 6001,
    /// Category name already taken
    CategoryNameExists = 6002,
    /// No price rule matched
    PriceNotFound = 6101,
    /// Weight range overlaps an existing rule
    PriceRangeOverlap = 6102,
    /// A custom price rule already exists for the category
    CustomPriceExists = 6103,
    /// custom_amount missing for a custom-type request
    CustomAmountRequired = 6104,

    // ==================== 7xxx: Client ====================
    /// Client not found
    ClientNotFound = 7001,
    /// Contact number is not exactly 11 digits
    InvalidContactNumber = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Numeric value of this error code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::OrderNotFound => "Order not found",
            Self::OrderClientMissing => "Client not found",
            Self::OrderCategoryMissing => "Category not found",

            Self::CategoryNotFound => "Category not found",
            Self::CategoryNameExists => "Category name already exists",
            Self::PriceNotFound => "No matching price found",
            Self::PriceRangeOverlap => "Weight range overlaps an existing price",
            Self::CustomPriceExists => "Custom price already exists for this category",
            Self::CustomAmountRequired => "custom_amount is required for custom type",

            Self::ClientNotFound => "Client not found",
            Self::InvalidContactNumber => "Contact number must be exactly 11 digits",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }

    /// Category classification for this code
    pub fn category(&self) -> super::ErrorCategory {
        super::ErrorCategory::from_code(self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unrecognized u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,

            4001 => Self::OrderNotFound,
            4002 => Self::OrderClientMissing,
            4003 => Self::OrderCategoryMissing,

            6001 => Self::CategoryNotFound,
            6002 => Self::CategoryNameExists,
            6101 => Self::PriceNotFound,
            6102 => Self::PriceRangeOverlap,
            6103 => Self::CustomPriceExists,
            6104 => Self::CustomAmountRequired,

            7001 => Self::ClientNotFound,
            7002 => Self::InvalidContactNumber,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
