//! Compatibility rules between people, categories and transaction kinds
//!
//! `can_post` is a total, side-effect free function of its inputs. Services
//! call it on every creation request even when a client already checked.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::person::DEFAULT_MINOR_AGE_THRESHOLD;
use crate::models::{Category, CategoryPurpose, Person, TransactionKind};

/// Reason given when a minor attempts to record income
pub const MINOR_INCOME_REASON: &str = "minors cannot record income";

/// Tunable parameters of the posting rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingPolicy {
    /// People younger than this may not record income
    pub minor_age_threshold: u32,
}

impl Default for PostingPolicy {
    fn default() -> Self {
        Self {
            minor_age_threshold: DEFAULT_MINOR_AGE_THRESHOLD,
        }
    }
}

/// Outcome of a posting check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostingDecision {
    Allow,
    Deny { reason: String },
}

impl PostingDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// The denial reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Deny { reason } => Some(reason),
        }
    }

    /// Turn a denial into a business rule error
    pub fn into_result(self) -> LedgerResult<()> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny { reason } => Err(LedgerError::BusinessRule(reason)),
        }
    }
}

/// Decide whether `kind` may be posted for `person` against `category`
/// using the default policy.
pub fn can_post(person: &Person, category: &Category, kind: TransactionKind) -> PostingDecision {
    can_post_with(&PostingPolicy::default(), person, category, kind)
}

/// Decide whether `kind` may be posted for `person` against `category`.
pub fn can_post_with(
    policy: &PostingPolicy,
    person: &Person,
    category: &Category,
    kind: TransactionKind,
) -> PostingDecision {
    if person.is_minor_under(policy.minor_age_threshold) && kind == TransactionKind::Income {
        return PostingDecision::Deny {
            reason: MINOR_INCOME_REASON.to_string(),
        };
    }

    if purpose_accepts(category.purpose, kind) {
        PostingDecision::Allow
    } else {
        PostingDecision::Deny {
            reason: format!(
                "category '{}' is not compatible with kind '{}'",
                category.description, kind
            ),
        }
    }
}

/// Whether a category purpose accepts a transaction kind
pub fn purpose_accepts(purpose: CategoryPurpose, kind: TransactionKind) -> bool {
    match purpose {
        CategoryPurpose::Expense => kind == TransactionKind::Expense,
        CategoryPurpose::Income => kind == TransactionKind::Income,
        CategoryPurpose::Both => true,
    }
}
