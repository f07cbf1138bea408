use super::account::{Account, AccountId};
use crate::error::{MoneyboxError, Result};
use async_trait::async_trait;

/// Persistence contract for accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fails with `AccountNotFound` when no account has this id.
    async fn get_by_id(&self, id: AccountId) -> Result<Account>;

    /// Overwrites the stored state of the account, inserting it if new.
    async fn update(&self, account: &Account) -> Result<()>;

    /// Persists several accounts in the given order.
    ///
    /// Implementations that can write atomically should override this. The
    /// default updates one account after another and, when a write fails,
    /// restores the accounts already written to their prior state before
    /// returning the error. Accounts that did not exist before are left in
    /// place.
    async fn update_batch(&self, accounts: &[Account]) -> Result<()> {
        let mut previous = Vec::with_capacity(accounts.len());
        for account in accounts {
            match self.get_by_id(account.id()).await {
                Ok(prior) => previous.push(Some(prior)),
                Err(MoneyboxError::AccountNotFound(_)) => previous.push(None),
                Err(e) => return Err(e),
            }
        }

        for (written, account) in accounts.iter().enumerate() {
            if let Err(e) = self.update(account).await {
                for prior in previous[..written].iter().rev().flatten() {
                    if let Err(rollback) = self.update(prior).await {
                        tracing::error!(account_id = %prior.id(), error = %rollback, "batch rollback failed");
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Account>>;
}

/// Outbound alerts to account holders. Delivery is fire-and-forget.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn notify_funds_low(&self, email: &str) -> Result<()>;
    async fn notify_approaching_pay_in_limit(&self, email: &str) -> Result<()>;
}

pub type AccountStoreBox = Box<dyn AccountStore>;
pub type NotificationServiceBox = Box<dyn NotificationService>;
pub type AccountStoreFactory = Box<dyn Fn() -> AccountStoreBox + Send + Sync>;
