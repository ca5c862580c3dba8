//! # Money Module
//!
//! Amount parsing and display. Amounts are `rust_decimal::Decimal` end to
//! end; the ATM deals in a single currency (USD) with cents precision for
//! display only.

use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Decimal places used when displaying an amount
pub const DISPLAY_DECIMALS: u32 = 2;

/// Parse an amount typed at the console.
///
/// Surrounding whitespace and a leading `$` are accepted. The sign is not
/// checked here; `Account` rejects non-positive amounts.
///
/// # Examples
/// ```
/// use atm_core::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount(" $250.75 ").unwrap(), Decimal::new(25075, 2));
/// assert!(parse_amount("ten").is_err());
/// ```
pub fn parse_amount(input: &str) -> CoreResult<Decimal> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();

    Decimal::from_str(digits).map_err(|_| CoreError::UnparsableAmount(trimmed.to_string()))
}

/// Format an amount as dollars with two decimals (`$1500.00`).
pub fn format_usd(amount: Decimal) -> String {
    let mut display = amount.round_dp(DISPLAY_DECIMALS);
    display.rescale(DISPLAY_DECIMALS);
    format!("${}", display)
}
