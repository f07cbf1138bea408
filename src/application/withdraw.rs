use super::{notify_funds_low, settle};
use crate::config::OperationSettings;
use crate::domain::account::{Account, AccountId, Amount};
use crate::domain::ports::{AccountStoreBox, NotificationServiceBox};
use crate::error::{MoneyboxError, Result};

/// Debits a single account.
pub struct WithdrawMoney {
    account_store: AccountStoreBox,
    notification_service: NotificationServiceBox,
    settings: OperationSettings,
}

impl WithdrawMoney {
    pub fn new(account_store: AccountStoreBox, notification_service: NotificationServiceBox) -> Self {
        Self::with_settings(account_store, notification_service, OperationSettings::default())
    }

    pub fn with_settings(
        account_store: AccountStoreBox,
        notification_service: NotificationServiceBox,
        settings: OperationSettings,
    ) -> Self {
        Self {
            account_store,
            notification_service,
            settings,
        }
    }

    /// Withdraws `amount` from the account.
    ///
    /// The low funds notification is decided on the balance before the
    /// withdrawal. A rejected withdrawal writes nothing and notifies no one.
    pub async fn execute(&self, account_id: AccountId, amount: Amount) -> Result<()> {
        let mut account = self.account_store.get_by_id(account_id).await?;

        if !account.can_withdraw(amount) {
            tracing::debug!(%account_id, amount = %amount.value(), "withdrawal rejected: insufficient funds");
            return Err(MoneyboxError::InsufficientFunds);
        }

        if account.is_funds_low() {
            notify_funds_low(self.notification_service.as_ref(), &account, self.settings.notification_timeout)
                .await;
        }

        let outcome = self.apply(&mut account, amount).await;
        settle(self.settings.on_persistence_failure, "withdrawal", outcome)?;

        tracing::info!(%account_id, amount = %amount.value(), "withdrawal completed");
        Ok(())
    }

    async fn apply(&self, account: &mut Account, amount: Amount) -> Result<()> {
        account.withdraw(amount)?;
        self.account_store.update(account).await
    }
}
