//! Core data models for the household ledger
//!
//! People and categories own transactions through one-directional id
//! references; nothing here holds a back pointer.

pub mod category;
pub mod ids;
pub mod money;
pub mod person;
pub mod transaction;

pub use category::{Category, CategoryPurpose};
pub use ids::{CategoryId, PersonId, TransactionId};
pub use money::Money;
pub use person::Person;
pub use transaction::{Transaction, TransactionKind};
