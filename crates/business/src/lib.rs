//! # ATM Business
//!
//! Business logic layer - user directory, authentication and the session
//! controller that routes menu actions to the logged-in user's account.

pub mod config;
pub mod directory;
pub mod error;
pub mod session;

pub use config::{AtmConfig, SeedUser};
pub use directory::{Directory, UserRecord};
pub use error::{BusinessError, BusinessResult};
pub use session::{SessionController, SessionState};
