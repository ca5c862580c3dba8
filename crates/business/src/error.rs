//! Business layer errors

use atm_core::CoreError;
use thiserror::Error;

/// Errors raised by the directory and the session controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusinessError {
    // === Authentication errors ===
    /// Unknown user id and wrong PIN are deliberately the same error
    #[error("Invalid User ID or PIN")]
    AuthenticationFailed,

    #[error("No user is logged in")]
    NotAuthenticated,

    // === Transfer errors ===
    #[error("Recipient user not found: {0}")]
    RecipientNotFound(String),

    #[error("Cannot transfer to your own account")]
    SelfTransfer,

    // === Setup errors ===
    #[error("Duplicate user id: {0}")]
    DuplicateUser(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === Wrapped errors ===
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for business operations
pub type BusinessResult<T> = Result<T, BusinessError>;

impl BusinessError {
    /// Check whether the bound account could not cover the amount
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, BusinessError::Core(err) if err.is_insufficient_funds())
    }

    /// Check whether the amount was rejected before touching any account
    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, BusinessError::Core(err) if err.is_invalid_amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_core_error_wrapping() {
        let err: BusinessError = CoreError::insufficient_funds(dec!(100), dec!(50)).into();
        assert!(err.is_insufficient_funds());
        assert!(!err.is_invalid_amount());
        assert_eq!(
            err.to_string(),
            "Insufficient funds: requested 100, available 50"
        );

        let err: BusinessError = CoreError::InvalidAmount(dec!(-1)).into();
        assert!(err.is_invalid_amount());
    }

    #[test]
    fn test_auth_error_does_not_leak_reason() {
        assert_eq!(
            BusinessError::AuthenticationFailed.to_string(),
            "Invalid User ID or PIN"
        );
        assert!(!BusinessError::RecipientNotFound("x".into()).is_insufficient_funds());
    }
}
