use crate::domain::account::AccountId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoneyboxError {
    #[error("Insufficient funds to make transfer")]
    InsufficientFunds,
    #[error("Account pay in limit reached")]
    PayInLimitReached,
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),
    #[error("Notification error: {0}")]
    NotificationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, MoneyboxError>;
