//! Main menu options

use crate::error::ConsoleError;
use std::fmt;

/// One of the five numbered menu options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    History,
    Withdraw,
    Deposit,
    Transfer,
    Quit,
}

impl MenuChoice {
    /// Options in display order (1-5)
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::History,
        MenuChoice::Withdraw,
        MenuChoice::Deposit,
        MenuChoice::Transfer,
        MenuChoice::Quit,
    ];

    pub fn number(&self) -> u8 {
        match self {
            MenuChoice::History => 1,
            MenuChoice::Withdraw => 2,
            MenuChoice::Deposit => 3,
            MenuChoice::Transfer => 4,
            MenuChoice::Quit => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::History => "Transaction History",
            MenuChoice::Withdraw => "Withdraw",
            MenuChoice::Deposit => "Deposit",
            MenuChoice::Transfer => "Transfer",
            MenuChoice::Quit => "Quit",
        }
    }

    /// Parse the number typed at the menu prompt
    pub fn parse(input: &str) -> Result<Self, ConsoleError> {
        let trimmed = input.trim();
        trimmed
            .parse::<u8>()
            .ok()
            .and_then(|n| Self::ALL.into_iter().find(|choice| choice.number() == n))
            .ok_or_else(|| ConsoleError::InvalidChoice(trimmed.to_string()))
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_choices() {
        assert_eq!(MenuChoice::parse("1").unwrap(), MenuChoice::History);
        assert_eq!(MenuChoice::parse("2").unwrap(), MenuChoice::Withdraw);
        assert_eq!(MenuChoice::parse(" 3 ").unwrap(), MenuChoice::Deposit);
        assert_eq!(MenuChoice::parse("4\n").unwrap(), MenuChoice::Transfer);
        assert_eq!(MenuChoice::parse("5").unwrap(), MenuChoice::Quit);
    }

    #[test]
    fn test_parse_invalid_choices() {
        for input in ["0", "6", "-1", "", "two", "1.0", "300"] {
            assert!(
                matches!(MenuChoice::parse(input), Err(ConsoleError::InvalidChoice(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(MenuChoice::History.to_string(), "1. Transaction History");
        assert_eq!(MenuChoice::Quit.to_string(), "5. Quit");
    }
}
