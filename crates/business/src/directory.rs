//! Directory - registry of users, their PINs and accounts
//!
//! Built once at start-up from `AtmConfig`; no registration after that.

use crate::config::AtmConfig;
use crate::error::{BusinessError, BusinessResult};
use atm_core::Account;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;

/// A user known to the ATM. Owns its account exclusively.
pub struct UserRecord {
    user_id: String,
    pin: String,
    account: Account,
}

impl UserRecord {
    pub fn new(user_id: &str, pin: &str, opening_balance: Decimal) -> BusinessResult<Self> {
        Ok(Self {
            user_id: user_id.to_string(),
            pin: pin.to_string(),
            account: Account::open(user_id, opening_balance)?,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn account_mut(&mut self) -> &mut Account {
        &mut self.account
    }

    /// Exact, case-sensitive comparison
    fn pin_matches(&self, pin: &str) -> bool {
        self.pin == pin
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("user_id", &self.user_id)
            .field("pin", &"****")
            .field("account", &self.account)
            .finish()
    }
}

/// Map from user id to `UserRecord`, keys unique.
#[derive(Debug, Default)]
pub struct Directory {
    users: HashMap<String, UserRecord>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the directory from the configured seed users
    pub fn from_config(config: &AtmConfig) -> BusinessResult<Self> {
        config.validate()?;
        let mut directory = Self::new();
        for seed in &config.users {
            directory.insert(UserRecord::new(&seed.user_id, &seed.pin, seed.balance)?)?;
        }
        tracing::debug!(users = directory.len(), "Directory built from config");
        Ok(directory)
    }

    /// Add a user; fails if the id is already taken
    pub fn insert(&mut self, record: UserRecord) -> BusinessResult<()> {
        if self.users.contains_key(record.user_id()) {
            return Err(BusinessError::DuplicateUser(record.user_id.clone()));
        }
        self.users.insert(record.user_id.clone(), record);
        Ok(())
    }

    /// Return the user only if the id exists and the PIN matches exactly.
    ///
    /// Unknown id and wrong PIN both yield `AuthenticationFailed`.
    pub fn authenticate(&self, user_id: &str, pin: &str) -> BusinessResult<&UserRecord> {
        self.users
            .get(user_id)
            .filter(|record| record.pin_matches(pin))
            .ok_or(BusinessError::AuthenticationFailed)
    }

    pub fn lookup(&self, user_id: &str) -> Option<&UserRecord> {
        self.users.get(user_id)
    }

    pub fn lookup_mut(&mut self, user_id: &str) -> Option<&mut UserRecord> {
        self.users.get_mut(user_id)
    }

    /// Transfer between two users' accounts.
    ///
    /// The sender must exist (the session guarantees it); an unknown
    /// recipient is `RecipientNotFound`, the same id twice is `SelfTransfer`.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> BusinessResult<()> {
        if from == to {
            return Err(BusinessError::SelfTransfer);
        }

        let mut sender = None;
        let mut recipient = None;
        for (id, record) in self.users.iter_mut() {
            if id == from {
                sender = Some(&mut record.account);
            } else if id == to {
                recipient = Some(&mut record.account);
            }
        }

        let recipient = recipient.ok_or_else(|| BusinessError::RecipientNotFound(to.to_string()))?;
        let sender = sender.ok_or(BusinessError::NotAuthenticated)?;
        sender.transfer(recipient, amount)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// User ids, sorted
    pub fn user_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.users.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
