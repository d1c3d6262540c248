//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer. Handlers print
//! their results and return errors to `main` untouched.

pub mod category;
pub mod person;
pub mod report;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use person::{handle_person_command, PersonCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
