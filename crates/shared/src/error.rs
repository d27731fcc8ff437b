//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every recoverable failure crosses the service boundary as one of these
/// kinds; internal detail (lock poisoning, storage state) never does.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or unbalanced input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Precondition invalidated by a concurrent actor.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Operation would drive a wallet balance negative.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Internal error (storage failure).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::InsufficientFunds(_) => "INSUFFICIENT_FUNDS",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the caller may retry the operation unchanged.
    ///
    /// Conflicts are retryable by definition; validation and funds errors
    /// will fail again until the input or the balance changes.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_) | Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Validation(String::new()).code(), "VALIDATION_ERROR");
        assert_eq!(AppError::NotFound(String::new()).code(), "NOT_FOUND");
        assert_eq!(AppError::Conflict(String::new()).code(), "CONFLICT");
        assert_eq!(
            AppError::InsufficientFunds(String::new()).code(),
            "INSUFFICIENT_FUNDS"
        );
        assert_eq!(AppError::Internal(String::new()).code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(AppError::NotFound("msg".into()).to_string(), "Not found: msg");
        assert_eq!(AppError::Conflict("msg".into()).to_string(), "Conflict: msg");
        assert_eq!(
            AppError::InsufficientFunds("msg".into()).to_string(),
            "Insufficient funds: msg"
        );
        assert_eq!(
            AppError::Internal("msg".into()).to_string(),
            "Internal error: msg"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(AppError::Conflict(String::new()).is_retryable());
        assert!(AppError::Internal(String::new()).is_retryable());
        assert!(!AppError::Validation(String::new()).is_retryable());
        assert!(!AppError::InsufficientFunds(String::new()).is_retryable());
        assert!(!AppError::NotFound(String::new()).is_retryable());
    }
}
