//! # Account Module
//!
//! An `Account` holds a non-negative balance and the append-only history of
//! every operation applied to it. Every mutation validates first and only
//! then touches state, so a failed call leaves the account untouched.

use crate::entry::{EntryKind, LedgerEntry};
use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's account at the ATM.
///
/// Invariant: `balance == opening_balance + sum(signed entry amounts)`.
/// See [`Account::reconciles`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// User id of the owner, used as the counterparty label on transfers
    owner: String,
    opening_balance: Decimal,
    balance: Decimal,
    history: Vec<LedgerEntry>,
}

impl Account {
    /// Open an account with an initial balance.
    ///
    /// Negative opening balances are rejected.
    pub fn open(owner: impl Into<String>, opening_balance: Decimal) -> CoreResult<Self> {
        if opening_balance < Decimal::ZERO {
            return Err(CoreError::InvalidAmount(opening_balance));
        }
        Ok(Self {
            owner: owner.into(),
            opening_balance,
            balance: opening_balance,
            history: Vec::new(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    /// Entries in insertion order
    pub fn history(&self) -> &[LedgerEntry] {
        &self.history
    }

    /// Deposit `amount`, appending a Deposit entry.
    pub fn deposit(&mut self, amount: Decimal) -> CoreResult<&LedgerEntry> {
        ensure_positive(amount)?;
        self.balance = self.credited(amount)?;
        Ok(self.record(LedgerEntry::new(EntryKind::Deposit, amount)))
    }

    /// Withdraw `amount`, appending a Withdraw entry.
    ///
    /// Fails with `InsufficientFunds` when `amount > balance`.
    pub fn withdraw(&mut self, amount: Decimal) -> CoreResult<&LedgerEntry> {
        ensure_positive(amount)?;
        self.ensure_covers(amount)?;
        self.balance -= amount;
        Ok(self.record(LedgerEntry::new(EntryKind::Withdraw, amount)))
    }

    /// Move `amount` from this account to `to`.
    ///
    /// Appends TransferOut here and TransferIn on `to`. Both accounts are
    /// unchanged on failure, including when `to` cannot hold the amount. Since `to` is a distinct `&mut`, self-transfer
    /// can only be attempted with two accounts sharing an owner, which is
    /// rejected as `SameAccountTransfer`.
    pub fn transfer(&mut self, to: &mut Account, amount: Decimal) -> CoreResult<()> {
        ensure_positive(amount)?;
        if self.owner == to.owner {
            return Err(CoreError::SameAccountTransfer);
        }
        self.ensure_covers(amount)?;
        let credited = to.credited(amount)?;

        self.balance -= amount;
        to.balance = credited;

        let out = LedgerEntry::new(EntryKind::TransferOut, amount).with_counterparty(&to.owner);
        let incoming = LedgerEntry::new(EntryKind::TransferIn, amount).with_counterparty(&self.owner);
        self.record(out);
        to.record(incoming);
        Ok(())
    }

    /// Check the bookkeeping invariant against the history.
    pub fn reconciles(&self) -> bool {
        let net: Decimal = self.history.iter().map(LedgerEntry::signed_amount).sum();
        self.opening_balance + net == self.balance && self.balance >= Decimal::ZERO
    }

    fn ensure_covers(&self, amount: Decimal) -> CoreResult<()> {
        if amount > self.balance {
            Err(CoreError::insufficient_funds(amount, self.balance))
        } else {
            Ok(())
        }
    }

    fn credited(&self, amount: Decimal) -> CoreResult<Decimal> {
        self.balance
            .checked_add(amount)
            .ok_or(CoreError::AmountTooLarge(amount))
    }

    fn record(&mut self, entry: LedgerEntry) -> &LedgerEntry {
        self.history.push(entry);
        debug_assert!(self.reconciles());
        &self.history[self.history.len() - 1]
    }
}

fn ensure_positive(amount: Decimal) -> CoreResult<()> {
    if amount <= Decimal::ZERO {
        Err(CoreError::InvalidAmount(amount))
    } else {
        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {} (balance: {}, entries: {})",
            self.owner,
            crate::money::format_usd(self.balance),
            self.history.len()
        )
    }
}
