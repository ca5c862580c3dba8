//! # Error Module
//!
//! Domain errors for ledger operations, using thiserror.

use rust_decimal::Decimal;
use thiserror::Error;

/// Core ledger errors.
///
/// None of these are fatal: the caller reports them and the account is
/// left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // === Amount errors ===
    #[error("Amount must be positive: {0}")]
    InvalidAmount(Decimal),

    #[error("Not a valid amount: {0:?}")]
    UnparsableAmount(String),

    /// The credited balance would not fit in a `Decimal`
    #[error("Amount too large: {0}")]
    AmountTooLarge(Decimal),

    // === Balance errors ===
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Cannot transfer to the same account")]
    SameAccountTransfer,
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn insufficient_funds(requested: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            requested,
            available,
        }
    }

    /// Check whether this is an insufficient funds error
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, CoreError::InsufficientFunds { .. })
    }

    /// Check whether the amount itself was rejected (unparsable or non-positive)
    pub fn is_invalid_amount(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidAmount(_) | CoreError::UnparsableAmount(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = CoreError::insufficient_funds(dec!(2000), dec!(1500));
        assert_eq!(
            err.to_string(),
            "Insufficient funds: requested 2000, available 1500"
        );

        let err = CoreError::InvalidAmount(dec!(-5));
        assert_eq!(err.to_string(), "Amount must be positive: -5");

        let err = CoreError::AmountTooLarge(dec!(5));
        assert_eq!(err.to_string(), "Amount too large: 5");

        let err = CoreError::UnparsableAmount("abc".to_string());
        assert_eq!(err.to_string(), "Not a valid amount: \"abc\"");
    }

    #[test]
    fn test_error_checks() {
        assert!(CoreError::insufficient_funds(dec!(10), dec!(5)).is_insufficient_funds());
        assert!(!CoreError::SameAccountTransfer.is_insufficient_funds());

        assert!(CoreError::InvalidAmount(dec!(0)).is_invalid_amount());
        assert!(CoreError::UnparsableAmount("x".to_string()).is_invalid_amount());
        assert!(!CoreError::SameAccountTransfer.is_invalid_amount());
    }
}
