//! ATM configuration - seed users for the in-memory directory
//!
//! Defaults reproduce the two demo users. A JSON file can replace them:
//!
//! ```json
//! { "users": [ { "user_id": "alice", "pin": "0000", "balance": "250.00" } ] }
//! ```

use crate::error::{BusinessError, BusinessResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One user created at start-up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub user_id: String,
    pub pin: String,
    /// Opening balance, must be >= 0
    #[serde(default)]
    pub balance: Decimal,
}

impl SeedUser {
    pub fn new(user_id: &str, pin: &str, balance: Decimal) -> Self {
        Self {
            user_id: user_id.to_string(),
            pin: pin.to_string(),
            balance,
        }
    }
}

/// Configuration for the ATM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtmConfig {
    /// Users loaded into the directory at start-up
    #[serde(default = "default_users")]
    pub users: Vec<SeedUser>,
}

fn default_users() -> Vec<SeedUser> {
    vec![
        SeedUser::new("user1", "1234", Decimal::new(1000, 0)),
        SeedUser::new("user2", "5678", Decimal::new(2000, 0)),
    ]
}

impl Default for AtmConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
        }
    }
}

impl AtmConfig {
    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(json: &str) -> BusinessResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BusinessError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> BusinessResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BusinessError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// Reject empty ids/PINs, negative balances and duplicate ids
    pub fn validate(&self) -> BusinessResult<()> {
        let mut seen = HashSet::new();
        for user in &self.users {
            if user.user_id.trim().is_empty() {
                return Err(BusinessError::InvalidConfig("empty user_id".to_string()));
            }
            if user.pin.is_empty() {
                return Err(BusinessError::InvalidConfig(format!(
                    "empty pin for {}",
                    user.user_id
                )));
            }
            if user.balance < Decimal::ZERO {
                return Err(BusinessError::InvalidConfig(format!(
                    "negative balance for {}: {}",
                    user.user_id, user.balance
                )));
            }
            if !seen.insert(user.user_id.as_str()) {
                return Err(BusinessError::DuplicateUser(user.user_id.clone()));
            }
        }
        Ok(())
    }
}
