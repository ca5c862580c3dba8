//! # ATM CLI
//!
//! Line-oriented console front-end. `Console` is generic over `BufRead` and
//! `Write` so the binary runs it on stdin/stdout and tests run it on
//! scripted input.

pub mod console;
pub mod error;
pub mod menu;

pub use console::Console;
pub use error::ConsoleError;
pub use menu::MenuChoice;
