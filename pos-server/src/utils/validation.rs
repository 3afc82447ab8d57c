//! Input validation helpers
//!
//! Centralized text length constants and validation functions. SQLite TEXT
//! has no built-in length enforcement, so limits are checked at the input
//! boundary.

use shared::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Category names
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// Client names
pub const MAX_CLIENT_NAME_LEN: usize = 100;

/// Client addresses
pub const MAX_ADDRESS_LEN: usize = 255;

/// Service type labels on price rules
pub const MAX_SERVICE_TYPE_LEN: usize = 100;

/// Order notes
pub const MAX_NOTE_LEN: usize = 500;

/// Contact numbers: exactly this many digits after normalization
pub const CONTACT_NUMBER_LEN: usize = 11;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Normalize a contact number: strip everything but ASCII digits and require
/// exactly [`CONTACT_NUMBER_LEN`] of them.
pub fn normalize_contact_number(raw: &str) -> Result<String, AppError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != CONTACT_NUMBER_LEN {
        return Err(AppError::with_message(
            ErrorCode::InvalidContactNumber,
            "Contact number must be exactly 11 digits",
        ));
    }
    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Wash&Fold", "name", MAX_CATEGORY_NAME_LEN).is_ok());
        assert!(validate_required_text("", "name", MAX_CATEGORY_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_CATEGORY_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(51), "name", MAX_CATEGORY_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("ok".into()), "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("x".repeat(501)), "notes", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_normalize_contact_number() {
        assert_eq!(normalize_contact_number("09171234567").unwrap(), "09171234567");
        // Separators are stripped before the digit count is checked
        assert_eq!(normalize_contact_number("0917-123-4567").unwrap(), "09171234567");
        assert_eq!(normalize_contact_number(" 0917 123 4567 ").unwrap(), "09171234567");

        assert!(normalize_contact_number("0917123456").is_err()); // 10 digits
        assert!(normalize_contact_number("091712345678").is_err()); // 12 digits
        assert!(normalize_contact_number("no digits").is_err());
    }

    #[test]
    fn test_normalize_error_code() {
        let err = normalize_contact_number("123").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidContactNumber);
    }
}
