//! # Entry Module
//!
//! `LedgerEntry` and `EntryKind`: the append-only records an `Account`
//! keeps for every completed balance-affecting operation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a completed ledger operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Cash paid in at the machine
    Deposit,
    /// Cash paid out at the machine
    Withdraw,
    /// Debit side of a transfer to another account
    TransferOut,
    /// Credit side of a transfer from another account
    TransferIn,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Deposit => "deposit",
            EntryKind::Withdraw => "withdraw",
            EntryKind::TransferOut => "transfer_out",
            EntryKind::TransferIn => "transfer_in",
        }
    }

    /// Whether this kind increases the balance
    pub fn is_credit(&self) -> bool {
        matches!(self, EntryKind::Deposit | EntryKind::TransferIn)
    }

    /// Apply the kind's sign to an amount (+ for credits, - for debits)
    pub fn signed(&self, amount: Decimal) -> Decimal {
        if self.is_credit() {
            amount
        } else {
            -amount
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One completed operation on an account.
///
/// Entries are immutable: fields are private and only `Account` creates them,
/// after the balance change they describe has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    kind: EntryKind,
    /// Always > 0
    amount: Decimal,
    timestamp: DateTime<Utc>,
    /// Other side of a transfer (user id); None for deposit/withdraw
    #[serde(default, skip_serializing_if = "Option::is_none")]
    counterparty: Option<String>,
}

impl LedgerEntry {
    pub(crate) fn new(kind: EntryKind, amount: Decimal) -> Self {
        Self {
            kind,
            amount,
            timestamp: Utc::now(),
            counterparty: None,
        }
    }

    pub(crate) fn with_counterparty(mut self, counterparty: &str) -> Self {
        self.counterparty = Some(counterparty.to_string());
        self
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Amount with the kind's sign applied
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn counterparty(&self) -> Option<&str> {
        self.counterparty.as_deref()
    }

    /// Human-readable label used in the transaction history
    /// ("Deposit", "Withdraw", "Transfer to user2", "Transfer from user1").
    pub fn label(&self) -> String {
        match (self.kind, self.counterparty()) {
            (EntryKind::Deposit, _) => "Deposit".to_string(),
            (EntryKind::Withdraw, _) => "Withdraw".to_string(),
            (EntryKind::TransferOut, Some(to)) => format!("Transfer to {}", to),
            (EntryKind::TransferOut, None) => "Transfer out".to_string(),
            (EntryKind::TransferIn, Some(from)) => format!("Transfer from {}", from),
            (EntryKind::TransferIn, None) => "Transfer in".to_string(),
        }
    }
}

/// `<timestamp> - <label>: $<amount>`
impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.label(),
            crate::money::format_usd(self.amount)
        )
    }
}
