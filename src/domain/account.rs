use crate::error::{MoneyboxError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use uuid::Uuid;

/// Represents a monetary value held by an account.
///
/// This is a wrapper around `rust_decimal::Decimal` so that balances and
/// cumulative totals cannot be confused with raw numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Money(pub Decimal);

/// Represents a positive monetary amount for an operation.
///
/// Ensures that withdrawal and transfer amounts are always positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(MoneyboxError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = MoneyboxError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Money {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns `None` instead of panicking when the sum leaves `Decimal`'s range.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

fn out_of_range(field: &str) -> MoneyboxError {
    MoneyboxError::ValidationError(format!("{field} would exceed the representable range"))
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Opaque, immutable account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AccountId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The holder of an account. Only the contact address is needed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Result<Self> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(MoneyboxError::ValidationError(
                "Account owner must have a contact address".to_string(),
            ));
        }
        Ok(Self { email })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A bank account and the rules governing how its balance may change.
///
/// `balance` never drops below zero and `paid_in` never exceeds
/// [`Account::PAY_IN_LIMIT`]. Fields are private so the only way to change
/// them is through [`Account::withdraw`] and [`Account::deposit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AccountSnapshot")]
pub struct Account {
    id: AccountId,
    user: User,
    balance: Money,
    withdrawn: Money,
    paid_in: Money,
}

/// Persisted shape of an [`Account`]; deserialized accounts go through
/// [`Account::restore`] so stored data cannot bypass the invariants.
#[derive(Deserialize)]
struct AccountSnapshot {
    id: AccountId,
    user: User,
    balance: Money,
    withdrawn: Money,
    paid_in: Money,
}

impl TryFrom<AccountSnapshot> for Account {
    type Error = MoneyboxError;

    fn try_from(snapshot: AccountSnapshot) -> Result<Self> {
        Account::restore(
            snapshot.id,
            snapshot.user,
            snapshot.balance,
            snapshot.withdrawn,
            snapshot.paid_in,
        )
    }
}

impl Account {
    /// Maximum cumulative amount an account may ever receive.
    pub const PAY_IN_LIMIT: Money = Money(dec!(4000));
    /// Balances below this are considered low.
    pub const FUNDS_LOW_THRESHOLD: Money = Money(dec!(500));
    /// Remaining pay-in headroom below this triggers a warning.
    pub const PAY_IN_HEADROOM_THRESHOLD: Money = Money(dec!(500));

    /// Creates a fresh account with nothing withdrawn or paid in yet.
    pub fn create(id: AccountId, user: User, initial_balance: Decimal) -> Result<Self> {
        if initial_balance < Decimal::ZERO {
            return Err(MoneyboxError::ValidationError(
                "Balance cannot be negative".to_string(),
            ));
        }

        Ok(Self {
            id,
            user,
            balance: Money(initial_balance),
            withdrawn: Money::ZERO,
            paid_in: Money::ZERO,
        })
    }

    /// Rebuilds an account from previously persisted state, re-checking invariants.
    pub fn restore(
        id: AccountId,
        user: User,
        balance: Money,
        withdrawn: Money,
        paid_in: Money,
    ) -> Result<Self> {
        if balance < Money::ZERO {
            return Err(MoneyboxError::ValidationError(
                "Balance cannot be negative".to_string(),
            ));
        }
        if withdrawn < Money::ZERO || paid_in < Money::ZERO {
            return Err(MoneyboxError::ValidationError(
                "Cumulative totals cannot be negative".to_string(),
            ));
        }
        if paid_in > Self::PAY_IN_LIMIT {
            return Err(MoneyboxError::ValidationError(format!(
                "Paid in total {} exceeds the pay in limit",
                paid_in
            )));
        }

        Ok(Self {
            id,
            user,
            balance,
            withdrawn,
            paid_in,
        })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn withdrawn(&self) -> Money {
        self.withdrawn
    }

    pub fn paid_in(&self) -> Money {
        self.paid_in
    }

    pub fn can_withdraw(&self, amount: Amount) -> bool {
        self.balance - amount.into() >= Money::ZERO
    }

    pub fn can_deposit(&self, amount: Amount) -> bool {
        self.paid_in
            .checked_add(amount.into())
            .is_some_and(|total| total <= Self::PAY_IN_LIMIT)
    }

    /// Checked against the current balance, before any pending withdrawal.
    pub fn is_funds_low(&self) -> bool {
        self.balance < Self::FUNDS_LOW_THRESHOLD
    }

    /// True when depositing `amount` would leave less headroom than the threshold.
    pub fn is_approaching_pay_in_limit(&self, amount: Amount) -> bool {
        match self.paid_in.checked_add(amount.into()) {
            Some(total) => Self::PAY_IN_LIMIT - total < Self::PAY_IN_HEADROOM_THRESHOLD,
            None => true,
        }
    }

    /// Withdraws funds if the balance covers them.
    pub fn withdraw(&mut self, amount: Amount) -> Result<()> {
        if !self.can_withdraw(amount) {
            return Err(MoneyboxError::InsufficientFunds);
        }

        let balance = self
            .balance
            .checked_sub(amount.into())
            .ok_or_else(|| out_of_range("balance"))?;
        let withdrawn = self
            .withdrawn
            .checked_add(amount.into())
            .ok_or_else(|| out_of_range("withdrawn total"))?;

        self.balance = balance;
        self.withdrawn = withdrawn;
        Ok(())
    }

    /// Deposits funds if the pay in limit allows it.
    pub fn deposit(&mut self, amount: Amount) -> Result<()> {
        if !self.can_deposit(amount) {
            return Err(MoneyboxError::PayInLimitReached);
        }

        let balance = self
            .balance
            .checked_add(amount.into())
            .ok_or_else(|| out_of_range("balance"))?;
        let paid_in = self
            .paid_in
            .checked_add(amount.into())
            .ok_or_else(|| out_of_range("paid in total"))?;

        self.balance = balance;
        self.paid_in = paid_in;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(balance: Decimal) -> Account {
        Account::create(
            AccountId::new(),
            User::new("holder@example.com").unwrap(),
            balance,
        )
        .unwrap()
    }

    fn amount(value: Decimal) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(MoneyboxError::ValidationError(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(MoneyboxError::ValidationError(_))
        ));
    }

    #[test]
    fn test_money_arithmetic() {
        let m1 = Money::new(dec!(10.0));
        let m2 = Money::new(dec!(5.0));
        assert_eq!(m1.checked_add(m2), Some(Money::new(dec!(15.0))));
        assert_eq!(Money::new(Decimal::MAX).checked_add(m2), None);
        assert_eq!(m1 - m2, Money::new(dec!(5.0)));
        assert_eq!(Money::new(dec!(1.50)).to_string(), "1.5");
    }

    #[test]
    fn test_create_rejects_negative_balance() {
        let result = Account::create(
            AccountId::new(),
            User::new("holder@example.com").unwrap(),
            dec!(-0.01),
        );
        assert!(matches!(result, Err(MoneyboxError::ValidationError(_))));
    }

    #[test]
    fn test_create_requires_contact_address() {
        assert!(matches!(
            User::new("   "),
            Err(MoneyboxError::ValidationError(_))
        ));
    }

    #[test]
    fn test_create_starts_with_empty_totals() {
        let account = account(dec!(250));
        assert_eq!(account.balance(), Money::new(dec!(250)));
        assert_eq!(account.withdrawn(), Money::ZERO);
        assert_eq!(account.paid_in(), Money::ZERO);
        assert_eq!(account.user().email(), "holder@example.com");
    }

    #[test]
    fn test_restore_rejects_paid_in_over_limit() {
        let result = Account::restore(
            AccountId::new(),
            User::new("holder@example.com").unwrap(),
            Money::new(dec!(10)),
            Money::ZERO,
            Money::new(dec!(4000.01)),
        );
        assert!(matches!(result, Err(MoneyboxError::ValidationError(_))));
    }

    #[test]
    fn test_withdraw_success() {
        let mut account = account(dec!(100));
        account.withdraw(amount(dec!(40))).unwrap();
        assert_eq!(account.balance(), Money::new(dec!(60)));
        assert_eq!(account.withdrawn(), Money::new(dec!(40)));
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let mut account = account(dec!(100));
        assert!(account.can_withdraw(amount(dec!(100))));
        account.withdraw(amount(dec!(100))).unwrap();
        assert_eq!(account.balance(), Money::ZERO);
    }

    #[test]
    fn test_withdraw_insufficient_leaves_state_unchanged() {
        let mut account = account(dec!(100));
        let result = account.withdraw(amount(dec!(100.01)));
        assert!(matches!(result, Err(MoneyboxError::InsufficientFunds)));
        assert_eq!(account.balance(), Money::new(dec!(100)));
        assert_eq!(account.withdrawn(), Money::ZERO);
    }

    #[test]
    fn test_deposit_success() {
        let mut account = account(dec!(0));
        account.deposit(amount(dec!(4000))).unwrap();
        assert_eq!(account.balance(), Money::new(dec!(4000)));
        assert_eq!(account.paid_in(), Money::new(dec!(4000)));
    }

    #[test]
    fn test_deposit_over_limit_leaves_state_unchanged() {
        let mut account = account(dec!(10));
        account.deposit(amount(dec!(3000))).unwrap();

        let result = account.deposit(amount(dec!(1000.01)));
        assert!(matches!(result, Err(MoneyboxError::PayInLimitReached)));
        assert_eq!(account.balance(), Money::new(dec!(3010)));
        assert_eq!(account.paid_in(), Money::new(dec!(3000)));
    }

    #[test]
    fn test_deposit_past_decimal_range_is_rejected_without_effect() {
        let mut account = account(Decimal::MAX);

        let result = account.deposit(amount(dec!(1)));
        assert!(matches!(result, Err(MoneyboxError::ValidationError(_))));
        assert_eq!(account.balance(), Money::new(Decimal::MAX));
        assert_eq!(account.paid_in(), Money::ZERO);
    }

    #[test]
    fn test_pay_in_checks_do_not_overflow() {
        let account = account(dec!(0));
        let huge = amount(Decimal::MAX);

        assert!(!account.can_deposit(huge));
        assert!(account.is_approaching_pay_in_limit(huge));
    }

    #[test]
    fn test_funds_low_boundary() {
        assert!(!account(dec!(500)).is_funds_low());
        assert!(account(dec!(499.99)).is_funds_low());
        assert!(account(dec!(0)).is_funds_low());
    }

    #[test]
    fn test_approaching_pay_in_limit_boundaries() {
        let mut account = account(dec!(0));
        assert!(!account.is_approaching_pay_in_limit(amount(dec!(3500))));
        assert!(account.is_approaching_pay_in_limit(amount(dec!(3500.01))));

        account.deposit(amount(dec!(2100))).unwrap();
        assert!(account.is_approaching_pay_in_limit(amount(dec!(1900))));
    }

    #[test]
    fn test_withdrawals_do_not_restore_pay_in_headroom() {
        let mut account = account(dec!(0));
        account.deposit(amount(dec!(4000))).unwrap();
        account.withdraw(amount(dec!(4000))).unwrap();

        assert!(!account.can_deposit(amount(dec!(0.01))));
        assert_eq!(account.withdrawn(), Money::new(dec!(4000)));
    }

    #[test]
    fn test_deserialize_revalidates_invariants() {
        let mut account = account(dec!(10));
        account.deposit(amount(dec!(100))).unwrap();
        let json = serde_json::to_string(&account).unwrap();
        let restored: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, account);

        let tampered = json.replace("\"110\"", "\"-1\"");
        assert!(serde_json::from_str::<Account>(&tampered).is_err());
    }
}
