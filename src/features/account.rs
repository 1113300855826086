use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Insufficient funds. You cannot withdraw {requested}, only {available} is available")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
}

type AccountResult<T> = Result<T, AccountError>;

/// A single ledger entry: account number, holder name and current balance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    number: String,

    holder: String,

    /// Never negative; `withdraw` refuses any amount above the balance.
    balance: Decimal,
}

impl Account {
    pub fn new(number: impl Into<String>, holder: impl Into<String>, balance: Decimal) -> Self {
        Self {
            number: number.into(),
            holder: holder.into(),
            balance,
        }
    }

    /// Credits the account. Callers are expected to pass a positive amount.
    pub fn deposit(&mut self, amount: Decimal) {
        self.balance += amount;
    }

    /// Debits the account, failing without touching the balance when the
    /// requested amount exceeds it.
    pub fn withdraw(&mut self, amount: Decimal) -> AccountResult<()> {
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }

        self.balance -= amount;
        Ok(())
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test]
    fn deposits_accumulate() {
        let mut account = Account::new("A1", "Alice", dec!(100));
        account.deposit(dec!(50));
        account.deposit(dec!(25.5));
        assert_eq!(account.balance(), dec!(175.5));
    }

    #[test_case(dec!(100), dec!(200) ; "more than the balance")]
    #[test_case(dec!(0), dec!(0.01) ; "anything from an empty account")]
    fn overdraft_is_refused(balance: Decimal, requested: Decimal) {
        let mut account = Account::new("A1", "Alice", balance);
        assert!(matches!(
            account.withdraw(requested),
            Err(AccountError::InsufficientFunds { .. })
        ));
        assert_eq!(account.balance(), balance);
    }

    #[test]
    fn withdrawing_the_exact_balance_empties_the_account() {
        let mut account = Account::new("A1", "Alice", dec!(150));
        account.withdraw(dec!(150)).unwrap();
        assert_eq!(account.balance(), dec!(0));
    }

    #[test]
    fn partial_withdrawal_leaves_the_remainder() {
        let mut account = Account::new("A1", "Alice", dec!(150));
        account.withdraw(dec!(40.25)).unwrap();
        assert_eq!(account.balance(), dec!(109.75));
    }
}
