use crate::domain::account::{Account, AccountId};
use crate::domain::ports::AccountStore;
use crate::error::{MoneyboxError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing account states.
pub const CF_ACCOUNTS: &str = "accounts";

/// A persistent account store backed by RocksDB.
///
/// Accounts are keyed by the raw bytes of their id and stored as JSON.
/// `update_batch` goes through a single `WriteBatch`, so both legs of a
/// transfer land together or not at all.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_accounts])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn encode(account: &Account) -> Result<Vec<u8>> {
        serde_json::to_vec(account).map_err(|e| {
            MoneyboxError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })
    }

    fn decode(bytes: &[u8]) -> Result<Account> {
        serde_json::from_slice(bytes).map_err(|e| {
            MoneyboxError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Deserialization error: {}", e),
            )))
        })
    }

    fn missing_cf() -> MoneyboxError {
        MoneyboxError::InternalError(Box::new(std::io::Error::other(
            "Accounts column family not found",
        )))
    }
}

#[async_trait]
impl AccountStore for RocksDBStore {
    async fn get_by_id(&self, id: AccountId) -> Result<Account> {
        let cf = self.db.cf_handle(CF_ACCOUNTS).ok_or_else(Self::missing_cf)?;

        match self.db.get_cf(&cf, id.as_bytes())? {
            Some(bytes) => Self::decode(&bytes),
            None => Err(MoneyboxError::AccountNotFound(id)),
        }
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let cf = self.db.cf_handle(CF_ACCOUNTS).ok_or_else(Self::missing_cf)?;

        let value = Self::encode(account)?;
        self.db.put_cf(&cf, account.id().as_bytes(), value)?;

        Ok(())
    }

    async fn update_batch(&self, accounts: &[Account]) -> Result<()> {
        let cf = self.db.cf_handle(CF_ACCOUNTS).ok_or_else(Self::missing_cf)?;

        let mut batch = WriteBatch::default();
        for account in accounts {
            batch.put_cf(&cf, account.id().as_bytes(), Self::encode(account)?);
        }
        self.db.write(batch)?;

        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        let cf = self.db.cf_handle(CF_ACCOUNTS).ok_or_else(Self::missing_cf)?;

        let mut accounts = Vec::new();
        for item in self.db.iterator_cf(&cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            accounts.push(Self::decode(&value)?);
        }

        Ok(accounts)
    }
}
