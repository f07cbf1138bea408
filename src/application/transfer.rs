use super::{notify_approaching_pay_in_limit, notify_funds_low, settle};
use crate::config::OperationSettings;
use crate::domain::account::{Account, AccountId, Amount};
use crate::domain::ports::{AccountStoreBox, NotificationServiceBox};
use crate::error::{MoneyboxError, Result};

/// Moves money from one account to another.
pub struct TransferMoney {
    account_store: AccountStoreBox,
    notification_service: NotificationServiceBox,
    settings: OperationSettings,
}

impl TransferMoney {
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

    /// Transfers `amount` from `from_id` to `to_id`.
    ///
    /// Guards run in a fixed order: the sender's balance first, then the
    /// recipient's pay in limit. Notifications are decided on the state before
    /// the transfer. Unless `defer_funds_low_notification` is set, the sender's
    /// low funds notification goes out before the recipient's guard runs and is
    /// not withdrawn if that guard then rejects the transfer.
    ///
    /// Both legs are persisted together with `AccountStore::update_batch`,
    /// sender first.
    pub async fn execute(&self, from_id: AccountId, to_id: AccountId, amount: Amount) -> Result<()> {
        if from_id == to_id {
            return Err(MoneyboxError::ValidationError(
                "Cannot transfer money to the same account".to_string(),
            ));
        }

        let from = self.account_store.get_by_id(from_id).await?;
        let to = self.account_store.get_by_id(to_id).await?;

        if !from.can_withdraw(amount) {
            tracing::debug!(%from_id, amount = %amount.value(), "transfer rejected: insufficient funds");
            return Err(MoneyboxError::InsufficientFunds);
        }

        let notifier = self.notification_service.as_ref();
        let timeout = self.settings.notification_timeout;

        let funds_low = from.is_funds_low();
        if funds_low && !self.settings.defer_funds_low_notification {
            notify_funds_low(notifier, &from, timeout).await;
        }

        if !to.can_deposit(amount) {
            tracing::debug!(%to_id, amount = %amount.value(), "transfer rejected: pay in limit reached");
            return Err(MoneyboxError::PayInLimitReached);
        }

        if funds_low && self.settings.defer_funds_low_notification {
            notify_funds_low(notifier, &from, timeout).await;
        }

        if to.is_approaching_pay_in_limit(amount) {
            notify_approaching_pay_in_limit(notifier, &to, timeout).await;
        }

        let outcome = self.apply(from, to, amount).await;
        settle(self.settings.on_persistence_failure, "transfer", outcome)?;

        tracing::info!(%from_id, %to_id, amount = %amount.value(), "transfer completed");
        Ok(())
    }

    async fn apply(&self, mut from: Account, mut to: Account, amount: Amount) -> Result<()> {
        from.withdraw(amount)?;
        to.deposit(amount)?;
        self.account_store.update_batch(&[from, to]).await
    }
}
