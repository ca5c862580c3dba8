//! Console tests - scripted stdin, assertions on what is printed

use atm_business::{AtmConfig, Directory, SessionController};
use atm_cli::Console;
use rust_decimal_macros::dec;

fn run_script(script: &str) -> (String, SessionController) {
    run_bytes(script.as_bytes())
}

fn run_bytes(script: &[u8]) -> (String, SessionController) {
    let mut session = SessionController::new(Directory::from_config(&AtmConfig::default()).unwrap());
    let mut console = Console::new(script, Vec::new());
    console.run(&mut session).unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();
    (output, session)
}

fn balance_of(session: &SessionController, user_id: &str) -> rust_decimal::Decimal {
    session
        .directory()
        .lookup(user_id)
        .unwrap()
        .account()
        .balance()
}

#[test]
fn test_bad_login_reprompts() {
    let (output, session) = run_script("user1\n0000\nghost\n1234\n");

    assert_eq!(output.matches("Invalid User ID or PIN.").count(), 2);
    assert_eq!(output.matches("Enter User ID: ").count(), 3);
    assert!(!output.contains("ATM Menu:"));
    assert!(!session.is_authenticated());
}

#[test]
fn test_menu_is_printed_after_login() {
    let (output, _) = run_script("user1\n1234\n5\n");

    assert!(output.contains(
        "\nATM Menu:\n1. Transaction History\n2. Withdraw\n3. Deposit\n4. Transfer\n5. Quit\nChoose an option: "
    ));
}

#[test]
fn test_seeded_scenario_through_console() {
    let script = "user1\n1234\n\
                  3\n500\n\
                  2\n2000\n\
                  4\nuser2\n1000\n\
                  1\n\
                  5\n";
    let (output, session) = run_script(script);

    assert!(output.contains("Deposited $500.00. New balance: $1500.00"));
    assert!(output.contains("Insufficient funds."));
    assert!(output.contains("Transferred $1000.00 to user2. New balance: $500.00"));
    assert!(output.contains(" - Deposit: $500.00\n"));
    assert!(output.contains(" - Transfer to user2: $1000.00\n"));
    assert!(output.contains("Current balance: $500.00"));

    // Quit returns to the login prompt, then input ends
    assert!(output.ends_with("Enter User ID: "));
    assert!(!session.is_authenticated());
    assert_eq!(balance_of(&session, "user1"), dec!(500));
    assert_eq!(balance_of(&session, "user2"), dec!(3000));
}

#[test]
fn test_history_lines_in_insertion_order() {
    let (output, _) = run_script("user2\n5678\n3\n10\n2\n5\n1\n5\n");

    let deposit = output.find(" - Deposit: $10.00").unwrap();
    let withdraw = output.find(" - Withdraw: $5.00").unwrap();
    assert!(deposit < withdraw);
    assert!(output.contains("Current balance: $2005.00"));
}

#[test]
fn test_empty_history() {
    let (output, _) = run_script("user1\n1234\n1\n5\n");
    assert!(output.contains("No transactions yet.\nCurrent balance: $1000.00"));
}

#[test]
fn test_invalid_choice_reshows_menu() {
    let (output, _) = run_script("user1\n1234\n9\nabc\n5\n");

    assert_eq!(output.matches("Invalid choice.").count(), 2);
    assert_eq!(output.matches("ATM Menu:").count(), 3);
}

#[test]
fn test_transfer_to_unknown_recipient() {
    let (output, session) = run_script("user1\n1234\n4\nnobody\n10\n5\n");

    assert!(output.contains("Recipient user not found."));
    assert_eq!(balance_of(&session, "user1"), dec!(1000));
}

#[test]
fn test_unknown_recipient_reported_before_insufficient_funds() {
    let (output, _) = run_script("user1\n1234\n4\nnobody\n99999\n5\n");

    assert!(output.contains("Recipient user not found."));
    assert!(!output.contains("Insufficient funds."));
}

#[test]
fn test_transfer_to_self() {
    let (output, session) = run_script("user1\n1234\n4\nuser1\n10\n5\n");

    assert!(output.contains("Cannot transfer to your own account."));
    assert!(session.directory().lookup("user1").unwrap().account().history().is_empty());
}

#[test]
fn test_bad_amounts() {
    let (output, session) = run_script("user1\n1234\n3\nlots\n3\n-5\n2\n0\n5\n");

    assert_eq!(output.matches("Invalid amount.").count(), 1);
    assert_eq!(output.matches("Amount must be positive.").count(), 2);
    assert_eq!(balance_of(&session, "user1"), dec!(1000));
}

#[test]
fn test_logout_then_other_user() {
    let (output, session) = run_script("user1\n1234\n5\nuser2\n5678\n1\n5\n");

    assert_eq!(output.matches("ATM Menu:").count(), 2);
    assert!(output.contains("Current balance: $2000.00"));
    assert!(!session.is_authenticated());
}

#[test]
fn test_eof_mid_session_ends_cleanly() {
    let (output, session) = run_script("user1\n1234\n3\n");

    assert!(output.ends_with("Enter amount to deposit: "));
    assert!(!session.is_authenticated());
    assert_eq!(balance_of(&session, "user1"), dec!(1000));
}

#[test]
fn test_windows_line_endings() {
    let (output, session) = run_script("user1\r\n1234\r\n3\r\n1.50\r\n5\r\n");

    assert!(output.contains("Deposited $1.50. New balance: $1001.50"));
    assert!(!session.is_authenticated());
}

#[test]
fn test_deposit_beyond_decimal_range() {
    let (output, session) = run_script("user1\n1234\n3\n79228162514264337593543950335\n1\n5\n");

    assert!(output.contains("Amount too large for this account."));
    assert!(output.contains("No transactions yet.\nCurrent balance: $1000.00"));
    assert_eq!(balance_of(&session, "user1"), dec!(1000));
}

#[test]
fn test_transfer_beyond_recipient_range() {
    // user2 deposits up to the top of the range, then user1 sends one more dollar
    let script = "user2\n5678\n3\n79228162514264337593543948335\n5\n\
                  user1\n1234\n4\nuser2\n1\n5\n";
    let (output, session) = run_script(script);

    assert!(output.contains("Amount too large for this account."));
    assert_eq!(balance_of(&session, "user1"), dec!(1000));
    assert_eq!(balance_of(&session, "user2"), rust_decimal::Decimal::MAX);
    assert!(session.directory().lookup("user1").unwrap().account().history().is_empty());
    assert_eq!(session.directory().lookup("user2").unwrap().account().history().len(), 1);
}

#[test]
fn test_invalid_utf8_is_a_bad_answer() {
    let script = b"\xff\n1234\n\
                   user1\n1234\n\
                   \xff\n\
                   3\n\xfe\n\
                   4\n\xff\xfe\n10\n\
                   5\n";
    let (output, session) = run_bytes(script);

    assert_eq!(output.matches("Invalid User ID or PIN.").count(), 1);
    assert_eq!(output.matches("Invalid choice.").count(), 1);
    assert_eq!(output.matches("Invalid amount.").count(), 1);
    assert_eq!(output.matches("Recipient user not found.").count(), 1);
    assert!(output.ends_with("Enter User ID: "));
    assert!(!session.is_authenticated());
    assert_eq!(balance_of(&session, "user1"), dec!(1000));
}
