//! Runtime settings for the money operations.

use clap::ValueEnum;
use std::time::Duration;

/// How long an operation waits on a single notification before giving up on it.
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

/// What an operation does when mutating or persisting fails after its guards
/// have already passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FailurePolicy {
    /// Return the error to the caller. The store is left untouched.
    #[default]
    Propagate,
    /// Log the error and report success anyway.
    Swallow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSettings {
    pub on_persistence_failure: FailurePolicy,
    /// Hold the sender's funds-low notification back until the recipient's pay
    /// in limit check has passed. Off by default, so a transfer rejected by
    /// that check can still have warned the sender.
    pub defer_funds_low_notification: bool,
    /// Upper bound on a single notification delivery. A delivery still
    /// pending after this is abandoned and the operation carries on.
    pub notification_timeout: Duration,
}

impl Default for OperationSettings {
    fn default() -> Self {
        Self {
            on_persistence_failure: FailurePolicy::default(),
            defer_funds_low_notification: false,
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
        }
    }
}
