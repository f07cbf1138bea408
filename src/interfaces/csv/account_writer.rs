use crate::domain::account::Account;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct AccountRow<'a> {
    id: String,
    email: &'a str,
    balance: String,
    withdrawn: String,
    paid_in: String,
}

/// Writes final account states as CSV, sorted by holder email then id.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_accounts(&mut self, mut accounts: Vec<Account>) -> Result<()> {
        accounts.sort_by(|a, b| {
            a.user()
                .email()
                .cmp(b.user().email())
                .then_with(|| a.id().cmp(&b.id()))
        });

        for account in &accounts {
            self.writer.serialize(AccountRow {
                id: account.id().to_string(),
                email: account.user().email(),
                balance: account.balance().to_string(),
                withdrawn: account.withdrawn().to_string(),
                paid_in: account.paid_in().to_string(),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
