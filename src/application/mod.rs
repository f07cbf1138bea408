//! Application layer orchestrating the money operations.
//!
//! Each operation loads accounts through the `AccountStore` port, runs the
//! account guards, sends notifications through the `NotificationService` port
//! based on the state before any change, then mutates and persists. A
//! notification never holds up the mutation for longer than the configured
//! timeout.

pub mod processor;
pub mod transfer;
pub mod withdraw;

use crate::config::FailurePolicy;
use crate::domain::account::Account;
use crate::domain::ports::NotificationService;
use crate::error::Result;
use std::time::Duration;

/// Applies the failure policy to the outcome of a mutate-and-persist step.
fn settle(policy: FailurePolicy, operation: &str, outcome: Result<()>) -> Result<()> {
    match (outcome, policy) {
        (Ok(()), _) => Ok(()),
        (Err(e), FailurePolicy::Propagate) => Err(e),
        (Err(e), FailurePolicy::Swallow) => {
            tracing::error!(operation, error = %e, "discarding failure after guards passed");
            Ok(())
        }
    }
}

async fn notify_funds_low(service: &dyn NotificationService, account: &Account, timeout: Duration) {
    tracing::info!(account_id = %account.id(), "notifying account holder of low funds");
    let delivery = service.notify_funds_low(account.user().email());
    deliver(delivery, account, "funds low", timeout).await;
}

async fn notify_approaching_pay_in_limit(
    service: &dyn NotificationService,
    account: &Account,
    timeout: Duration,
) {
    tracing::info!(account_id = %account.id(), "notifying account holder of pay in limit");
    let delivery = service.notify_approaching_pay_in_limit(account.user().email());
    deliver(delivery, account, "pay in limit", timeout).await;
}

/// Waits at most `timeout` for a delivery; failures and stalls are logged and
/// dropped.
async fn deliver(
    delivery: impl Future<Output = Result<()>>,
    account: &Account,
    notification: &str,
    timeout: Duration,
) {
    match tokio::time::timeout(timeout, delivery).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::warn!(account_id = %account.id(), notification, error = %e, "notification failed");
        }
        Err(_) => {
            tracing::warn!(account_id = %account.id(), notification, ?timeout, "notification timed out");
        }
    }
}
