use super::transfer::TransferMoney;
use super::withdraw::WithdrawMoney;
use crate::domain::operation::{Operation, OperationType};
use crate::error::{MoneyboxError, Result};

/// Routes decoded operations to the matching use case.
pub struct OperationProcessor {
    withdraw: WithdrawMoney,
    transfer: TransferMoney,
}

impl OperationProcessor {
    pub fn new(withdraw: WithdrawMoney, transfer: TransferMoney) -> Self {
        Self { withdraw, transfer }
    }

    pub async fn process(&self, operation: Operation) -> Result<()> {
        match operation.r#type {
            OperationType::Withdraw => {
                self.withdraw
                    .execute(operation.from, operation.amount)
                    .await
            }
            OperationType::Transfer => {
                let to = operation.to.ok_or_else(|| {
                    MoneyboxError::ValidationError("Transfer missing destination account".to_string())
                })?;
                self.transfer
                    .execute(operation.from, to, operation.amount)
                    .await
            }
        }
    }
}
