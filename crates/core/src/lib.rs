//! # ATM Core
//!
//! Ledger types used across the ATM simulator:
//! - `Account`: balance plus append-only history
//! - `LedgerEntry` / `EntryKind`: one completed balance-affecting operation
//! - `money`: amount parsing and `$` formatting

pub mod account;
pub mod entry;
pub mod error;
pub mod money;

pub use account::Account;
pub use entry::{EntryKind, LedgerEntry};
pub use error::{CoreError, CoreResult};
pub use money::{format_usd, parse_amount};
