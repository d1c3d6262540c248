//! Reports module for the household ledger
//!
//! Income/expense/balance rollups per person and per category. The
//! aggregation functions are pure; `generate` wraps them with a storage fetch.

pub mod category_summary;
pub mod person_summary;
pub mod totals;

use std::fmt;
use std::str::FromStr;

pub use category_summary::{summarize_by_category, CategorySummaryReport, CategorySummaryRow};
pub use person_summary::{summarize_by_person, PersonSummaryReport, PersonSummaryRow};
pub use totals::Totals;

/// Row order for summary reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummarySort {
    /// Order the entities were created in
    #[default]
    Insertion,
    /// Alphabetical by name or description, case-insensitive
    Name,
    /// Highest balance first
    Balance,
}

impl fmt::Display for SummarySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insertion => write!(f, "insertion"),
            Self::Name => write!(f, "name"),
            Self::Balance => write!(f, "balance"),
        }
    }
}

impl FromStr for SummarySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insertion" | "created" => Ok(Self::Insertion),
            "name" => Ok(Self::Name),
            "balance" => Ok(Self::Balance),
            other => Err(format!(
                "unknown sort '{}' (expected insertion, name or balance)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort() {
        assert_eq!("Balance".parse::<SummarySort>(), Ok(SummarySort::Balance));
        assert_eq!("name".parse::<SummarySort>(), Ok(SummarySort::Name));
        assert!("size".parse::<SummarySort>().is_err());
        assert_eq!(SummarySort::default(), SummarySort::Insertion);
    }
}
