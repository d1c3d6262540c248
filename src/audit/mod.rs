//! Audit trail for the household ledger
//!
//! Every create and delete is appended to `audit.log` as a JSON line holding
//! a snapshot of the affected record. Transactions removed by a person's
//! cascade delete are logged individually, each carrying the cause.
//!
//! ```rust,ignore
//! use household_ledger::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::Person,
//!     person.id.to_string(),
//!     Some(person.name.clone()),
//!     &person,
//! );
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
