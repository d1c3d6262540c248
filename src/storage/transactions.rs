//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json. The table
//! keeps per-person and per-category indexes behind the same lock as the
//! records, so the indexes can never disagree with the data.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryId, PersonId, Transaction, TransactionId};

use super::file_io::JsonFile;
use super::{read_lock, write_lock, Repository};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Newest first, ties broken by ID so listings are stable
fn newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    });
}

/// In-memory transaction table with reverse indexes
#[derive(Debug, Default)]
pub(crate) struct TransactionTable {
    data: HashMap<TransactionId, Transaction>,
    by_person: HashMap<PersonId, Vec<TransactionId>>,
    by_category: HashMap<CategoryId, Vec<TransactionId>>,
}

impl TransactionTable {
    pub(crate) fn insert(&mut self, txn: Transaction) {
        if let Some(previous) = self.data.get(&txn.id).cloned() {
            self.unindex(&previous);
        }
        self.by_person.entry(txn.person_id).or_default().push(txn.id);
        self.by_category
            .entry(txn.category_id)
            .or_default()
            .push(txn.id);
        self.data.insert(txn.id, txn);
    }

    pub(crate) fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let txn = self.data.remove(&id)?;
        self.unindex(&txn);
        Some(txn)
    }

    fn unindex(&mut self, txn: &Transaction) {
        if let Some(ids) = self.by_person.get_mut(&txn.person_id) {
            ids.retain(|id| *id != txn.id);
            if ids.is_empty() {
                self.by_person.remove(&txn.person_id);
            }
        }
        if let Some(ids) = self.by_category.get_mut(&txn.category_id) {
            ids.retain(|id| *id != txn.id);
            if ids.is_empty() {
                self.by_category.remove(&txn.category_id);
            }
        }
    }

    /// Remove every transaction owned by `person_id`
    pub(crate) fn remove_for_person(&mut self, person_id: PersonId) -> Vec<Transaction> {
        let ids = self.by_person.remove(&person_id).unwrap_or_default();
        let mut removed: Vec<_> = ids.into_iter().filter_map(|id| self.remove(id)).collect();
        newest_first(&mut removed);
        removed
    }

    pub(crate) fn count_for_category(&self, category_id: CategoryId) -> usize {
        self.by_category.get(&category_id).map_or(0, Vec::len)
    }

    fn collect(&self, ids: Option<&Vec<TransactionId>>) -> Vec<Transaction> {
        let mut transactions: Vec<_> = ids
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| self.data.get(id).cloned())
            .collect();
        newest_first(&mut transactions);
        transactions
    }

    fn all(&self) -> Vec<Transaction> {
        let mut transactions: Vec<_> = self.data.values().cloned().collect();
        newest_first(&mut transactions);
        transactions
    }
}

/// Repository for transaction persistence with indexing
pub struct TransactionRepository {
    file: JsonFile,
    table: RwLock<TransactionTable>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: JsonFile::new(path),
            table: RwLock::new(TransactionTable::default()),
        }
    }

    pub(super) fn table(&self) -> &RwLock<TransactionTable> {
        &self.table
    }

    pub(super) fn persist(&self, table: &TransactionTable) -> LedgerResult<()> {
        let file_data = TransactionData {
            transactions: table.all(),
        };
        self.file.write(&file_data)
    }

    /// Transactions owned by a person, newest first
    pub fn get_by_person(&self, person_id: PersonId) -> LedgerResult<Vec<Transaction>> {
        let table = read_lock(&self.table)?;
        Ok(table.collect(table.by_person.get(&person_id)))
    }

    /// Transactions classified under a category, newest first
    pub fn get_by_category(&self, category_id: CategoryId) -> LedgerResult<Vec<Transaction>> {
        let table = read_lock(&self.table)?;
        Ok(table.collect(table.by_category.get(&category_id)))
    }

    pub fn count_by_category(&self, category_id: CategoryId) -> LedgerResult<usize> {
        Ok(read_lock(&self.table)?.count_for_category(category_id))
    }
}

impl Repository for TransactionRepository {
    type Id = TransactionId;
    type Record = Transaction;
    const ENTITY: &'static str = "Transaction";

    fn load(&self) -> LedgerResult<()> {
        let file_data: TransactionData = self.file.read_or_default()?;

        let mut rebuilt = TransactionTable::default();
        for txn in file_data.transactions {
            if let Err(e) = txn.validate() {
                return Err(LedgerError::Storage(format!(
                    "Invalid transaction {} in {}: {}",
                    txn.id,
                    self.file.path().display(),
                    e
                )));
            }
            rebuilt.insert(txn);
        }

        *write_lock(&self.table)? = rebuilt;
        Ok(())
    }

    fn save(&self) -> LedgerResult<()> {
        let table = read_lock(&self.table)?;
        self.persist(&table)
    }

    fn insert(&self, txn: Transaction) -> LedgerResult<TransactionId> {
        let id = txn.id;
        write_lock(&self.table)?.insert(txn);
        Ok(id)
    }

    fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        Ok(read_lock(&self.table)?.data.get(&id).cloned())
    }

    /// All transactions, newest first
    fn get_all(&self) -> LedgerResult<Vec<Transaction>> {
        Ok(read_lock(&self.table)?.all())
    }

    fn count(&self) -> LedgerResult<usize> {
        Ok(read_lock(&self.table)?.data.len())
    }
}
