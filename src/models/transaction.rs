//! Transaction model
//!
//! A transaction always belongs to exactly one person and one category. Its
//! amount is strictly positive; the kind decides whether it counts as income
//! or expense in aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, PersonId, TransactionId};
use super::money::Money;

/// Maximum length of a transaction description
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Largest amount a single transaction may carry (one billion units).
///
/// Keeps every sum over fewer than ~92 million transactions inside `i64` cents.
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000_000);

/// Polarity of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "despesa" => Ok(Self::Expense),
            "income" | "receita" => Ok(Self::Income),
            other => Err(format!(
                "unknown kind '{}' (expected expense or income)",
                other
            )),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Owning person
    pub person_id: PersonId,

    /// Classifying category
    pub category_id: CategoryId,

    /// What the transaction was for
    pub description: String,

    /// Amount, always strictly positive
    pub amount: Money,

    /// Income or expense
    pub kind: TransactionKind,

    /// When the transaction was recorded; never changes afterwards
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction stamped with the current time
    pub fn new(
        person_id: PersonId,
        category_id: CategoryId,
        description: impl Into<String>,
        amount: Money,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            person_id,
            category_id,
            description: description.into(),
            amount,
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign of its kind: positive for income, negative for expense
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Validate the structural shape of the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_fields(&self.description, self.amount)
    }
}

/// Field-level checks shared by [`Transaction::validate`] and request
/// validation, which runs them before a transaction is built.
pub(crate) fn validate_fields(
    description: &str,
    amount: Money,
) -> Result<(), TransactionValidationError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(TransactionValidationError::EmptyDescription);
    }

    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(TransactionValidationError::DescriptionTooLong(len));
    }

    if !amount.is_positive() {
        return Err(TransactionValidationError::NonPositiveAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(TransactionValidationError::AmountTooLarge(amount));
    }

    Ok(())
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.created_at.format("%Y-%m-%d"),
            self.kind,
            self.description,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    DescriptionTooLong(usize),
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl TransactionValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyDescription | Self::DescriptionTooLong(_) => "description",
            Self::NonPositiveAmount(_) | Self::AmountTooLarge(_) => "amount",
        }
    }

    /// The violated constraint, phrased to follow the field name
    pub fn constraint(&self) -> String {
        match self {
            Self::EmptyDescription => "cannot be empty".to_string(),
            Self::DescriptionTooLong(len) => {
                format!("too long ({} chars, max {})", len, MAX_DESCRIPTION_LEN)
            }
            Self::NonPositiveAmount(amount) => {
                format!("must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                format!("must not exceed {} (got {})", MAX_AMOUNT, amount)
            }
        }
    }
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transaction {} {}", self.field(), self.constraint())
    }
}

impl std::error::Error for TransactionValidationError {}

impl From<TransactionValidationError> for crate::error::LedgerError {
    fn from(err: TransactionValidationError) -> Self {
        Self::validation(err.field(), err.constraint())
    }
}
