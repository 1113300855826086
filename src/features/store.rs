use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

use super::account::{Account, AccountError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("An account already exists with number {0}")]
    AlreadyExists(String),

    #[error("No account found with number {0}")]
    NotFound(String),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("Failed to access the account file")]
    Io(#[from] io::Error),

    #[error("Failed to encode an account record")]
    Csv(#[from] csv::Error),
}

type StoreResult<T> = Result<T, StoreError>;

/// All accounts known to the ledger, keyed by account number, together with
/// the file they are persisted to.
///
/// The whole file is rewritten after every successful mutation, so the
/// persisted state tracks the in-memory map one operation at a time. There is
/// no partial-write protection; a failed rewrite is logged and the in-memory
/// state stays authoritative for the rest of the session.
#[derive(Debug)]
pub struct Store {
    accounts: BTreeMap<String, Account>,
    path: PathBuf,
}

impl Store {
    /// Builds the store from the persisted file. A missing or unreadable file
    /// means no prior accounts; a malformed line is skipped so one bad record
    /// cannot take the rest of the ledger down with it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let accounts = match File::open(&path) {
            Ok(file) => read_accounts(file),
            Err(e) => {
                warn!(
                    "could not read account file {}: {e}; starting with no accounts",
                    path.display()
                );
                BTreeMap::new()
            }
        };
        Self { accounts, path }
    }

    /// Rewrites the persisted file in full, one record per account, in
    /// account-number order.
    pub fn save(&self) -> StoreResult<()> {
        let file = File::create(&self.path)?;
        write_accounts(file, self.accounts.values())
    }

    pub fn create_account(
        &mut self,
        number: &str,
        holder: &str,
        balance: Decimal,
    ) -> StoreResult<()> {
        if self.accounts.contains_key(number) {
            return Err(StoreError::AlreadyExists(number.to_owned()));
        }

        self.accounts
            .insert(number.to_owned(), Account::new(number, holder, balance));
        self.persist();
        Ok(())
    }

    /// Credits an account and returns its new balance.
    pub fn deposit(&mut self, number: &str, amount: Decimal) -> StoreResult<Decimal> {
        let account = self.get_mut(number)?;
        account.deposit(amount);
        let balance = account.balance();
        self.persist();
        Ok(balance)
    }

    /// Debits an account and returns its new balance. The balance is left
    /// untouched when it cannot cover the requested amount.
    pub fn withdraw(&mut self, number: &str, amount: Decimal) -> StoreResult<Decimal> {
        let account = self.get_mut(number)?;
        account.withdraw(amount)?;
        let balance = account.balance();
        self.persist();
        Ok(balance)
    }

    pub fn balance(&self, number: &str) -> StoreResult<Decimal> {
        self.accounts
            .get(number)
            .map(Account::balance)
            .ok_or_else(|| StoreError::NotFound(number.to_owned()))
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    fn get_mut(&mut self, number: &str) -> StoreResult<&mut Account> {
        self.accounts
            .get_mut(number)
            .ok_or_else(|| StoreError::NotFound(number.to_owned()))
    }

    /// A save failure leaves the session usable; the in-memory map stays
    /// correct even though the file no longer reflects it.
    fn persist(&self) {
        if let Err(e) = self.save() {
            error!(
                "could not persist accounts to {}: {e}",
                self.path.display()
            );
        }
    }
}

fn read_accounts(reader: impl io::Read) -> BTreeMap<String, Account> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut accounts = BTreeMap::new();
    for record in rdr.deserialize() {
        match record {
            Ok(account) => {
                let account: Account = account;
                accounts.insert(account.number().to_owned(), account);
            }
            Err(e) => warn!("skipping malformed account record: {e}"),
        }
    }
    accounts
}

fn write_accounts<'a>(
    writer: impl io::Write,
    accounts: impl Iterator<Item = &'a Account>,
) -> StoreResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for account in accounts {
        wtr.serialize(account)?;
    }
    wtr.flush()?;
    Ok(())
}
