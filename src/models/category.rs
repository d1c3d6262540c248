//! Category model
//!
//! A category classifies transactions and declares, through its purpose,
//! which transaction kinds it accepts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;
use super::transaction::TransactionKind;

/// Maximum length of a category description
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Which transaction kinds a category accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPurpose {
    /// Expense transactions only
    Expense,
    /// Income transactions only
    Income,
    /// Both expense and income transactions
    Both,
}

impl CategoryPurpose {
    /// All purposes in display order
    pub fn all() -> &'static [Self] {
        &[Self::Expense, Self::Income, Self::Both]
    }

    /// Whether a category with this purpose should be listed when filtering
    /// by `filter`. `Both` categories are listed under every filter.
    pub fn is_listed_under(&self, filter: CategoryPurpose) -> bool {
        *self == filter || *self == Self::Both
    }
}

impl fmt::Display for CategoryPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
            Self::Both => write!(f, "Both"),
        }
    }
}

impl FromStr for CategoryPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "despesa" => Ok(Self::Expense),
            "income" | "receita" => Ok(Self::Income),
            "both" | "ambas" => Ok(Self::Both),
            other => Err(format!(
                "unknown purpose '{}' (expected expense, income or both)",
                other
            )),
        }
    }
}

impl From<TransactionKind> for CategoryPurpose {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Expense => Self::Expense,
            TransactionKind::Income => Self::Income,
        }
    }
}

/// A transaction category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category description
    pub description: String,

    /// Accepted transaction kinds
    pub purpose: CategoryPurpose,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(description: impl Into<String>, purpose: CategoryPurpose) -> Self {
        Self {
            id: CategoryId::new(),
            description: description.into(),
            purpose,
            created_at: Utc::now(),
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(CategoryValidationError::EmptyDescription);
        }

        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(CategoryValidationError::DescriptionTooLong(len));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyDescription,
    DescriptionTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Category description cannot be empty"),
            Self::DescriptionTooLong(len) => write!(
                f,
                "Category description too long ({} chars, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

impl From<CategoryValidationError> for crate::error::LedgerError {
    fn from(err: CategoryValidationError) -> Self {
        let constraint = match err {
            CategoryValidationError::EmptyDescription => "cannot be empty".to_string(),
            CategoryValidationError::DescriptionTooLong(len) => {
                format!("too long ({} chars, max {})", len, MAX_DESCRIPTION_LEN)
            }
        };
        Self::validation("description", constraint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Alimentação", CategoryPurpose::Expense);
        assert_eq!(category.description, "Alimentação");
        assert_eq!(category.purpose, CategoryPurpose::Expense);
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_category_validation() {
        let mut category = Category::new("", CategoryPurpose::Both);
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::EmptyDescription)
        );

        category.description = "x".repeat(101);
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::DescriptionTooLong(101))
        );

        category.description = "x".repeat(100);
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_purpose_parsing() {
        assert_eq!("expense".parse::<CategoryPurpose>(), Ok(CategoryPurpose::Expense));
        assert_eq!("Receita".parse::<CategoryPurpose>(), Ok(CategoryPurpose::Income));
        assert_eq!(" BOTH ".parse::<CategoryPurpose>(), Ok(CategoryPurpose::Both));
        assert!("savings".parse::<CategoryPurpose>().is_err());
    }

    #[test]
    fn test_purpose_filter_includes_both() {
        assert!(CategoryPurpose::Both.is_listed_under(CategoryPurpose::Income));
        assert!(CategoryPurpose::Income.is_listed_under(CategoryPurpose::Income));
        assert!(!CategoryPurpose::Expense.is_listed_under(CategoryPurpose::Income));
    }

    #[test]
    fn test_serialization() {
        let category = Category::new("Salário", CategoryPurpose::Income);
        let json = serde_json::to_string(&category).unwrap();
        assert!(json.contains("\"purpose\":\"income\""));

        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(category.id, deserialized.id);
        assert_eq!(category.purpose, deserialized.purpose);
    }
}
