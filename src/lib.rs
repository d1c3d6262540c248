//! Household ledger - income and expenses per person and category
//!
//! Records transactions for a set of people, classifies them by category and
//! rolls them up into per-person and per-category summaries.
//!
//! # Architecture
//!
//! - `models`: people, categories, transactions, money and typed IDs
//! - `rules`: whether a transaction may be posted for a person and category
//! - `reports`: income/expense/balance aggregation
//! - `storage`: JSON file storage with cascade and restrict deletes
//! - `services`: business logic on top of storage
//! - `audit`: append-only audit log
//! - `config`: data directory and settings
//! - `cli` and `display`: command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use household_ledger::config::{LedgerPaths, Settings};
//! use household_ledger::services::PersonService;
//! use household_ledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let person = PersonService::new(&storage).create("Bruno", 30)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod rules;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
