//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits match the declarative `validator` rules on the shared DTOs; the
//! helpers additionally reject whitespace-only values, which length rules
//! let through.

use crate::utils::AppError;

// ========== Text length limits ==========

/// Task titles, user and department names
pub const MAX_NAME_LEN: usize = 200;

/// Task descriptions, notification contents
pub const MAX_TEXT_LEN: usize = 2000;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ========== Validation helpers ==========

/// Validate that a required string is non-empty (after trim) and within
/// the length limit.
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
