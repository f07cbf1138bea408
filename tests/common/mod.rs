#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use moneybox::domain::account::{Account, AccountId, User};
use moneybox::domain::ports::{AccountStore, NotificationService};
use moneybox::error::{MoneyboxError, Result};
use moneybox::infrastructure::in_memory::InMemoryAccountStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Opens an account in `store` and returns its id.
pub async fn open_account(store: &dyn AccountStore, email: &str, balance: Decimal) -> AccountId {
    let account = Account::create(AccountId::new(), User::new(email).unwrap(), balance).unwrap();
    store.update(&account).await.unwrap();
    account.id()
}

/// Wraps the in-memory store, counting and recording writes and optionally
/// failing them.
///
/// It keeps the default `update_batch`, so batches go through `update` one
/// account at a time.
#[derive(Default, Clone)]
pub struct SpyAccountStore {
    inner: InMemoryAccountStore,
    updates: Arc<AtomicUsize>,
    fail_updates: Arc<AtomicBool>,
    fail_nth_update: Arc<AtomicUsize>,
    written: Arc<Mutex<Vec<AccountId>>>,
}

impl SpyAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    /// Resets the write counter and the record of written ids.
    pub async fn reset_count(&self) {
        self.updates.store(0, Ordering::SeqCst);
        self.written.lock().await.clear();
    }

    /// Ids of the accounts successfully written, in write order.
    pub async fn written_ids(&self) -> Vec<AccountId> {
        self.written.lock().await.clone()
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Fails only the `n`th write counted since the last reset, 1-based.
    /// Zero disables it.
    pub fn fail_nth_update(&self, n: usize) {
        self.fail_nth_update.store(n, Ordering::SeqCst);
    }
}

#[async_trait]
impl AccountStore for SpyAccountStore {
    async fn get_by_id(&self, id: AccountId) -> Result<Account> {
        self.inner.get_by_id(id).await
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let nth = self.updates.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_updates.load(Ordering::SeqCst) || self.fail_nth_update.load(Ordering::SeqCst) == nth {
            return Err(MoneyboxError::InternalError(Box::new(std::io::Error::other(
                "store unavailable",
            ))));
        }
        self.inner.update(account).await?;
        self.written.lock().await.push(account.id());
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        self.inner.get_all().await
    }
}

/// A notification service whose every delivery fails.
pub struct UnreachableNotificationService;

#[async_trait]
impl NotificationService for UnreachableNotificationService {
    async fn notify_funds_low(&self, _email: &str) -> Result<()> {
        Err(MoneyboxError::NotificationError("mail server unreachable".to_string()))
    }

    async fn notify_approaching_pay_in_limit(&self, _email: &str) -> Result<()> {
        Err(MoneyboxError::NotificationError("mail server unreachable".to_string()))
    }
}

/// A notification service whose deliveries never complete.
pub struct StalledNotificationService;

#[async_trait]
impl NotificationService for StalledNotificationService {
    async fn notify_funds_low(&self, _email: &str) -> Result<()> {
        std::future::pending().await
    }

    async fn notify_approaching_pay_in_limit(&self, _email: &str) -> Result<()> {
        std::future::pending().await
    }
}
