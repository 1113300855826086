use std::io;
use std::process;
#[macro_use]
extern crate log;

mod features;
mod shell;

use features::Store;

/// The only durable state of the program, in the working directory.
const ACCOUNTS_FILE: &str = "accounts.csv";

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        error!("{e}");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let mut store = Store::open(ACCOUNTS_FILE);
    info!(
        "loaded {} account(s) from {ACCOUNTS_FILE}",
        store.accounts().count()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    shell::run(&mut store, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}
