//! Console errors

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Menu selection outside 1-5 or not a number
    #[error("Invalid choice: {0:?}")]
    InvalidChoice(String),

    #[error("Console I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
