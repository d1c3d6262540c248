//! Service layer for the household ledger
//!
//! Services sit on top of the storage layer: they validate input, apply the
//! posting rules, persist through [`crate::storage::Storage`] and write the
//! audit trail.

pub mod category;
pub mod person;
pub mod transaction;

pub use category::CategoryService;
pub use person::{DeletedPerson, PersonService};
pub use transaction::{CreateTransactionInput, TransactionFilter, TransactionService, TransactionView};
