//! Session controller - tracks the logged-in user and routes operations
//!
//! Two states: `Unauthenticated` (initial) and `Authenticated` (bound to one
//! user). Account operations are pass-throughs to the bound user's account
//! and fail with `NotAuthenticated` when nobody is logged in.

use crate::directory::{Directory, UserRecord};
use crate::error::{BusinessError, BusinessResult};
use atm_core::{Account, LedgerEntry};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Current authentication state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated {
        user_id: String,
        /// Correlates log lines of one login
        session_id: Uuid,
        since: DateTime<Utc>,
    },
}

impl SessionState {
    pub fn user_id(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated { user_id, .. } => Some(user_id),
            SessionState::Unauthenticated => None,
        }
    }
}

/// Owns the directory and the session state for the lifetime of the process.
#[derive(Debug)]
pub struct SessionController {
    directory: Directory,
    state: SessionState,
}

impl SessionController {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory,
            state: SessionState::Unauthenticated,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// The logged-in user, if any
    pub fn current_user(&self) -> Option<&UserRecord> {
        self.state
            .user_id()
            .and_then(|user_id| self.directory.lookup(user_id))
    }

    /// Authenticate and bind the session to the user.
    ///
    /// An existing session is ended first. On failure the controller is left
    /// unauthenticated.
    pub fn login(&mut self, user_id: &str, pin: &str) -> BusinessResult<&UserRecord> {
        self.logout();

        if let Err(err) = self.directory.authenticate(user_id, pin) {
            tracing::warn!(user_id, "Authentication failed");
            return Err(err);
        }

        let session_id = Uuid::new_v4();
        tracing::info!(user_id, %session_id, "Logged in");
        self.state = SessionState::Authenticated {
            user_id: user_id.to_string(),
            session_id,
            since: Utc::now(),
        };

        self.current_user().ok_or(BusinessError::NotAuthenticated)
    }

    /// End the session. Returns the user id that was logged out, if any.
    pub fn logout(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            SessionState::Authenticated {
                user_id,
                session_id,
                since,
            } => {
                let seconds = (Utc::now() - since).num_seconds();
                tracing::info!(%user_id, %session_id, seconds, "Logged out");
                Some(user_id)
            }
            SessionState::Unauthenticated => None,
        }
    }

    /// Balance of the bound account
    pub fn balance(&self) -> BusinessResult<Decimal> {
        Ok(self.account()?.balance())
    }

    /// History of the bound account, in insertion order
    pub fn history(&self) -> BusinessResult<&[LedgerEntry]> {
        Ok(self.account()?.history())
    }

    /// Deposit into the bound account. Returns the new balance.
    pub fn deposit(&mut self, amount: Decimal) -> BusinessResult<Decimal> {
        self.account_mut()?.deposit(amount)?;
        let balance = self.balance()?;
        tracing::info!(user_id = ?self.state.user_id(), %amount, %balance, "Deposit");
        Ok(balance)
    }

    /// Withdraw from the bound account. Returns the new balance.
    pub fn withdraw(&mut self, amount: Decimal) -> BusinessResult<Decimal> {
        let outcome = self.account_mut()?.withdraw(amount).map(|_| ());
        if let Err(err) = outcome {
            tracing::debug!(user_id = ?self.state.user_id(), %amount, error = %err, "Withdraw rejected");
            return Err(err.into());
        }
        let balance = self.balance()?;
        tracing::info!(user_id = ?self.state.user_id(), %amount, %balance, "Withdraw");
        Ok(balance)
    }

    /// Transfer from the bound account to `recipient`. Returns the new balance.
    ///
    /// The recipient is resolved through the directory; unknown ids are
    /// reported as `RecipientNotFound` before anything is checked on the
    /// sender's side.
    pub fn transfer(&mut self, recipient: &str, amount: Decimal) -> BusinessResult<Decimal> {
        let sender = self
            .state
            .user_id()
            .ok_or(BusinessError::NotAuthenticated)?
            .to_string();

        if let Err(err) = self.directory.transfer(&sender, recipient, amount) {
            tracing::debug!(user_id = %sender, recipient, %amount, error = %err, "Transfer rejected");
            return Err(err);
        }

        let balance = self.balance()?;
        tracing::info!(user_id = %sender, recipient, %amount, %balance, "Transfer");
        Ok(balance)
    }

    fn account(&self) -> BusinessResult<&Account> {
        self.current_user()
            .map(UserRecord::account)
            .ok_or(BusinessError::NotAuthenticated)
    }

    fn account_mut(&mut self) -> BusinessResult<&mut Account> {
        let user_id = self.state.user_id().ok_or(BusinessError::NotAuthenticated)?;
        self.directory
            .lookup_mut(user_id)
            .map(UserRecord::account_mut)
            .ok_or(BusinessError::NotAuthenticated)
    }
}
