//! The interactive menu loop. Generic over its input and output streams so a
//! whole session can be scripted in tests.

use std::io::{self, BufRead, Write};

use rust_decimal::Decimal;

use crate::features::Store;

const MENU: &str = "\
1. Create Account
2. Deposit
3. Withdraw
4. Check Balance
5. Exit
";

/// Runs the menu loop until the user picks Exit or input runs dry, then makes
/// one final save so the session always ends with the file written.
pub fn run(store: &mut Store, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<()> {
    loop {
        write!(output, "{MENU}Choose an option: ")?;
        output.flush()?;

        let Some(choice) = read_trimmed_line(input)? else {
            break;
        };

        match choice.as_str() {
            "1" => create_account(store, input, output)?,
            "2" => deposit(store, input, output)?,
            "3" => withdraw(store, input, output)?,
            "4" => check_balance(store, input, output)?,
            "5" => break,
            _ => writeln!(output, "Invalid choice. Please choose a valid option.")?,
        }
    }

    if let Err(e) = store.save() {
        error!("could not persist accounts on exit: {e}");
    }
    writeln!(output, "Exiting. Thank you!")
}

fn create_account(
    store: &mut Store,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    let Some(number) = prompt(input, output, "Enter account number: ")? else {
        return Ok(());
    };
    let Some(holder) = prompt(input, output, "Enter account holder name: ")? else {
        return Ok(());
    };
    let Some(balance) = prompt_amount(input, output, "Enter initial balance: $")? else {
        return Ok(());
    };

    match store.create_account(&number, &holder, balance) {
        Ok(()) => writeln!(output, "Account created successfully."),
        Err(e) => writeln!(output, "{e}"),
    }
}

fn deposit(
    store: &mut Store,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    let Some(number) = prompt(input, output, "Enter account number: ")? else {
        return Ok(());
    };
    let Some(amount) = prompt_amount(input, output, "Enter deposit amount: $")? else {
        return Ok(());
    };

    match store.deposit(&number, amount) {
        Ok(balance) => writeln!(output, "Deposit successful. New balance: ${balance}"),
        Err(e) => writeln!(output, "{e}"),
    }
}

fn withdraw(
    store: &mut Store,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    let Some(number) = prompt(input, output, "Enter account number: ")? else {
        return Ok(());
    };
    let Some(amount) = prompt_amount(input, output, "Enter withdrawal amount: $")? else {
        return Ok(());
    };

    match store.withdraw(&number, amount) {
        Ok(balance) => writeln!(output, "Withdrawal successful. New balance: ${balance}"),
        Err(e) => writeln!(output, "{e}"),
    }
}

fn check_balance(
    store: &mut Store,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<()> {
    let Some(number) = prompt(input, output, "Enter account number: ")? else {
        return Ok(());
    };

    match store.balance(&number) {
        Ok(balance) => writeln!(output, "Current balance: ${balance}"),
        Err(e) => writeln!(output, "{e}"),
    }
}

/// Prints a prompt and reads one trimmed line, `None` at end of input.
fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;
    read_trimmed_line(input)
}

/// Like [`prompt`], plus parsing the line as a decimal amount. A line that is
/// not a number aborts the current operation instead of mutating anything.
fn prompt_amount(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> io::Result<Option<Decimal>> {
    let Some(line) = prompt(input, output, label)? else {
        return Ok(None);
    };
    match line.parse::<Decimal>() {
        Ok(amount) => Ok(Some(amount)),
        Err(_) => {
            writeln!(output, "That is not a valid amount: {line}")?;
            Ok(None)
        }
    }
}

fn read_trimmed_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}
