use crate::domain::account::{Account, AccountId};
use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::ports::{AccountStore, NotificationService};
use crate::error::{MoneyboxError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// A thread-safe in-memory store for accounts.
///
/// Uses `Arc<RwLock<HashMap<AccountId, Account>>>` to allow shared access.
/// Reads hand out clones, so an operation only changes stored state through
/// `update` or `update_batch`.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn get_by_id(&self, id: AccountId) -> Result<Account> {
        let accounts = self.accounts.read().await;
        accounts
            .get(&id)
            .cloned()
            .ok_or(MoneyboxError::AccountNotFound(id))
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.id(), account.clone());
        Ok(())
    }

    /// Writes every account under a single lock, so readers never observe
    /// half of a batch.
    async fn update_batch(&self, batch: &[Account]) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        for account in batch {
            accounts.insert(account.id(), account.clone());
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().cloned().collect())
    }
}

/// Collects notifications instead of delivering them.
///
/// The CLI drains it to report what would have been sent; tests use it to
/// assert on exactly which notifications an operation produced.
#[derive(Default, Clone)]
pub struct InMemoryNotificationOutbox {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryNotificationOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notifications recorded so far, oldest first.
    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.lock().await.clone()
    }

    async fn record(&self, kind: NotificationKind, recipient: &str) {
        tracing::debug!(?kind, recipient, "notification queued");
        self.sent.lock().await.push(Notification {
            kind,
            recipient: recipient.to_string(),
        });
    }
}

#[async_trait]
impl NotificationService for InMemoryNotificationOutbox {
    async fn notify_funds_low(&self, email: &str) -> Result<()> {
        self.record(NotificationKind::FundsLow, email).await;
        Ok(())
    }

    async fn notify_approaching_pay_in_limit(&self, email: &str) -> Result<()> {
        self.record(NotificationKind::ApproachingPayInLimit, email).await;
        Ok(())
    }
}
