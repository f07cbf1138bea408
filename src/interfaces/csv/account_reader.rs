use crate::domain::account::{Account, AccountId, User};
use crate::error::{MoneyboxError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// An account to open before any operation runs.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct AccountSeed {
    pub id: AccountId,
    pub email: String,
    pub balance: Decimal,
}

impl AccountSeed {
    pub fn into_account(self) -> Result<Account> {
        Account::create(self.id, User::new(self.email)?, self.balance)
    }
}

/// Reads account seeds (`id, email, balance`) from a CSV source.
pub struct AccountReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AccountReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Yields one opened account per row. Rows that fail to parse or that
    /// break an account invariant are returned as errors.
    pub fn accounts(self) -> impl Iterator<Item = Result<Account>> {
        self.reader.into_deserialize().map(|result| {
            result
                .map_err(MoneyboxError::from)
                .and_then(AccountSeed::into_account)
        })
    }
}
