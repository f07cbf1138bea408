use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    FundsLow,
    ApproachingPayInLimit,
}

/// A notification addressed to an account holder.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub recipient: String,
}
