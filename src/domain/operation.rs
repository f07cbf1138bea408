use super::account::{AccountId, Amount};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Withdraw,
    Transfer,
}

/// One requested money movement. `to` is only meaningful for transfers.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Operation {
    pub r#type: OperationType,
    pub from: AccountId,
    pub to: Option<AccountId>,
    pub amount: Amount,
}
