//! Interactive console: login prompt, then the numbered menu until Quit.
//!
//! Business failures are printed and the loop continues. Only I/O errors
//! escape `run`; end of input ends the run cleanly. A line that is not
//! valid UTF-8 counts as a bad answer to whatever was asked.

use crate::error::{ConsoleError, ConsoleResult};
use crate::menu::MenuChoice;
use atm_business::{BusinessError, SessionController};
use atm_core::{format_usd, parse_amount, CoreError};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

/// Whether the caller should keep looping or stop (input exhausted)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// One line read at a prompt, line terminator stripped
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Text(String),
    /// Not valid UTF-8; holds the lossy rendering for logs
    Garbled(String),
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output sink (used by tests to inspect what was printed)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Authenticate, serve the menu, and start over after Quit.
    ///
    /// Returns when input runs out.
    pub fn run(&mut self, session: &mut SessionController) -> ConsoleResult<()> {
        loop {
            let Some(user_id) = self.prompt("Enter User ID: ")? else {
                return Ok(());
            };
            let Some(pin) = self.prompt("Enter PIN: ")? else {
                return Ok(());
            };

            let login = match (user_id, pin) {
                (Input::Text(user_id), Input::Text(pin)) => session.login(&user_id, &pin).map(|_| ()),
                _ => Err(BusinessError::AuthenticationFailed),
            };
            if let Err(err) = login {
                writeln!(self.output, "{}", user_message(&err))?;
                continue;
            }

            if self.menu(session)? == Flow::Exit {
                session.logout();
                return Ok(());
            }
        }
    }

    fn menu(&mut self, session: &mut SessionController) -> ConsoleResult<Flow> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Choose an option: ")? else {
                return Ok(Flow::Exit);
            };

            let choice = match line {
                Input::Text(line) => MenuChoice::parse(&line),
                Input::Garbled(lossy) => Err(ConsoleError::InvalidChoice(lossy)),
            };

            let flow = match choice {
                Ok(MenuChoice::History) => self.show_history(session)?,
                Ok(MenuChoice::Withdraw) => self.handle_withdraw(session)?,
                Ok(MenuChoice::Deposit) => self.handle_deposit(session)?,
                Ok(MenuChoice::Transfer) => self.handle_transfer(session)?,
                Ok(MenuChoice::Quit) => {
                    session.logout();
                    return Ok(Flow::Continue);
                }
                Err(err) => {
                    tracing::debug!(error = %err, "Menu input rejected");
                    writeln!(self.output, "Invalid choice.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    fn print_menu(&mut self) -> ConsoleResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "ATM Menu:")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}", choice)?;
        }
        Ok(())
    }

    fn show_history(&mut self, session: &SessionController) -> ConsoleResult<Flow> {
        let listing = session
            .history()
            .and_then(|history| session.balance().map(|balance| (history, balance)));
        let (history, balance) = match listing {
            Ok(listing) => listing,
            Err(err) => return self.report(&err),
        };

        if history.is_empty() {
            writeln!(self.output, "No transactions yet.")?;
        }
        for entry in history {
            writeln!(self.output, "{}", entry)?;
        }
        writeln!(self.output, "Current balance: {}", format_usd(balance))?;
        Ok(Flow::Continue)
    }

    fn handle_withdraw(&mut self, session: &mut SessionController) -> ConsoleResult<Flow> {
        let amount = match self.read_amount("Enter amount to withdraw: ")? {
            Some(Ok(amount)) => amount,
            Some(Err(err)) => return self.report(&err.into()),
            None => return Ok(Flow::Exit),
        };

        match session.withdraw(amount) {
            Ok(balance) => {
                writeln!(
                    self.output,
                    "Withdrew {}. New balance: {}",
                    format_usd(amount),
                    format_usd(balance)
                )?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report(&err),
        }
    }

    fn handle_deposit(&mut self, session: &mut SessionController) -> ConsoleResult<Flow> {
        let amount = match self.read_amount("Enter amount to deposit: ")? {
            Some(Ok(amount)) => amount,
            Some(Err(err)) => return self.report(&err.into()),
            None => return Ok(Flow::Exit),
        };

        match session.deposit(amount) {
            Ok(balance) => {
                writeln!(
                    self.output,
                    "Deposited {}. New balance: {}",
                    format_usd(amount),
                    format_usd(balance)
                )?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report(&err),
        }
    }

    fn handle_transfer(&mut self, session: &mut SessionController) -> ConsoleResult<Flow> {
        let Some(recipient) = self.prompt("Enter recipient User ID: ")? else {
            return Ok(Flow::Exit);
        };
        let amount = match self.read_amount("Enter amount to transfer: ")? {
            Some(Ok(amount)) => amount,
            Some(Err(err)) => return self.report(&err.into()),
            None => return Ok(Flow::Exit),
        };
        let recipient = match recipient {
            Input::Text(recipient) => recipient,
            Input::Garbled(lossy) => return self.report(&BusinessError::RecipientNotFound(lossy)),
        };

        match session.transfer(&recipient, amount) {
            Ok(balance) => {
                writeln!(
                    self.output,
                    "Transferred {} to {}. New balance: {}",
                    format_usd(amount),
                    recipient,
                    format_usd(balance)
                )?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report(&err),
        }
    }

    fn report(&mut self, err: &BusinessError) -> ConsoleResult<Flow> {
        writeln!(self.output, "{}", user_message(err))?;
        Ok(Flow::Continue)
    }

    /// `None` on end of input
    fn read_amount(&mut self, text: &str) -> ConsoleResult<Option<Result<Decimal, CoreError>>> {
        Ok(self.prompt(text)?.map(|input| match input {
            Input::Text(line) => parse_amount(&line),
            Input::Garbled(lossy) => Err(CoreError::UnparsableAmount(lossy)),
        }))
    }

    /// Print `text` without a newline and read one line.
    ///
    /// Returns `None` on end of input. The line terminator is stripped,
    /// nothing else: user ids and PINs are compared exactly.
    fn prompt(&mut self, text: &str) -> ConsoleResult<Option<Input>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }

        match String::from_utf8(buf) {
            Ok(line) => Ok(Some(Input::Text(line))),
            Err(err) => {
                let lossy = String::from_utf8_lossy(err.as_bytes()).into_owned();
                tracing::debug!(input = %lossy, "Input is not valid UTF-8");
                Ok(Some(Input::Garbled(lossy)))
            }
        }
    }
}

/// Text shown to the user for a failed operation
fn user_message(err: &BusinessError) -> String {
    match err {
        BusinessError::AuthenticationFailed => "Invalid User ID or PIN.".to_string(),
        BusinessError::NotAuthenticated => "Please log in first.".to_string(),
        BusinessError::RecipientNotFound(_) => "Recipient user not found.".to_string(),
        BusinessError::SelfTransfer | BusinessError::Core(CoreError::SameAccountTransfer) => {
            "Cannot transfer to your own account.".to_string()
        }
        BusinessError::Core(CoreError::InsufficientFunds { .. }) => "Insufficient funds.".to_string(),
        BusinessError::Core(CoreError::InvalidAmount(_)) => "Amount must be positive.".to_string(),
        BusinessError::Core(CoreError::UnparsableAmount(_)) => "Invalid amount.".to_string(),
        BusinessError::Core(CoreError::AmountTooLarge(_)) => {
            "Amount too large for this account.".to_string()
        }
        other => format!("{}.", other),
    }
}
