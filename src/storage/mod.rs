//! Storage layer for the household ledger
//!
//! Each entity lives in its own JSON file behind an in-memory table guarded by
//! an `RwLock`. Single-table access goes through the [`Repository`] trait;
//! operations that span tables (posting a transaction, cascade and restrict
//! deletes) live on [`Storage`] and take every lock they need up front, always
//! in the order people → categories → transactions.

pub mod categories;
pub mod file_io;
pub mod people;
pub mod transactions;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

pub use categories::CategoryRepository;
pub use file_io::JsonFile;
pub use people::PersonRepository;
pub use transactions::TransactionRepository;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryId, Person, PersonId, Transaction};

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> LedgerResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> LedgerResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
}

/// Common single-table operations shared by every repository
pub trait Repository {
    type Id: Copy + std::fmt::Display;
    type Record: Clone;

    /// Entity name used in "not found" errors
    const ENTITY: &'static str;

    /// Replace the in-memory table with the contents of the backing file
    fn load(&self) -> LedgerResult<()>;

    /// Write the in-memory table to the backing file
    fn save(&self) -> LedgerResult<()>;

    /// Add a record, returning its identifier
    fn insert(&self, record: Self::Record) -> LedgerResult<Self::Id>;

    fn get(&self, id: Self::Id) -> LedgerResult<Option<Self::Record>>;

    fn get_all(&self) -> LedgerResult<Vec<Self::Record>>;

    fn count(&self) -> LedgerResult<usize>;

    /// Like [`Repository::get`], but a missing record is an error
    fn require(&self, id: Self::Id) -> LedgerResult<Self::Record> {
        self.get(id)?.ok_or_else(|| LedgerError::NotFound {
            entity_type: Self::ENTITY,
            identifier: id.to_string(),
        })
    }

    /// All records matching `predicate`, in listing order
    fn find_all<P>(&self, predicate: P) -> LedgerResult<Vec<Self::Record>>
    where
        P: Fn(&Self::Record) -> bool,
    {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|record| predicate(record))
            .collect())
    }
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub people: PersonRepository,
    pub categories: CategoryRepository,
    pub transactions: TransactionRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a storage rooted at `paths`, creating directories as needed.
    ///
    /// Nothing is read until [`Storage::load_all`] is called.
    pub fn new(paths: LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            people: PersonRepository::new(paths.people_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> LedgerResult<()> {
        self.people.load()?;
        self.categories.load()?;
        self.transactions.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> LedgerResult<()> {
        self.people.save()?;
        self.categories.save()?;
        self.transactions.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Append entries to the audit log for a change that is already on disk.
    ///
    /// A failed audit write is reported through `tracing` and does not undo
    /// or fail the committed change.
    pub fn record_audit(&self, entries: &[AuditEntry]) {
        if let Err(e) = self.audit.log_batch(entries) {
            tracing::error!(
                error = %e,
                path = %self.audit.path().display(),
                entries = entries.len(),
                "failed to write audit log"
            );
        }
    }

    /// Record a create operation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.record_audit(&[AuditEntry::create(
            entity_type,
            entity_id,
            entity_name,
            entity,
        )]);
    }

    /// Record a delete operation in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.record_audit(&[AuditEntry::delete(
            entity_type,
            entity_id,
            entity_name,
            entity,
        )]);
    }

    /// Resolve both references of a new transaction and insert what `build`
    /// returns for them.
    ///
    /// The person and category tables stay read-locked until the transaction
    /// is on disk, so neither reference can be deleted in between. A missing
    /// reference is a business rule rejection rather than a lookup miss.
    pub fn post_transaction<F>(
        &self,
        person_id: PersonId,
        category_id: CategoryId,
        build: F,
    ) -> LedgerResult<Transaction>
    where
        F: FnOnce(&Person, &Category) -> LedgerResult<Transaction>,
    {
        let people = read_lock(self.people.table())?;
        let categories = read_lock(self.categories.table())?;
        let mut transactions = write_lock(self.transactions.table())?;

        let person = people
            .iter()
            .find(|p| p.id == person_id)
            .ok_or_else(|| LedgerError::unresolved_reference("Person", person_id.to_string()))?;
        let category = categories
            .iter()
            .find(|c| c.id == category_id)
            .ok_or_else(|| {
                LedgerError::unresolved_reference("Category", category_id.to_string())
            })?;

        let txn = build(person, category)?;
        if txn.person_id != person.id || txn.category_id != category.id {
            return Err(LedgerError::Storage(
                "Built transaction does not reference the resolved person and category".into(),
            ));
        }

        transactions.insert(txn.clone());
        if let Err(e) = self.transactions.persist(&transactions) {
            transactions.remove(txn.id);
            return Err(e);
        }

        Ok(txn)
    }

    /// Delete a person together with all of their transactions.
    ///
    /// The transactions file is written before the people file, so a failure
    /// between the two writes leaves a person without transactions and never
    /// transactions without a person. Returns the removed person and the
    /// transactions that went with it.
    pub fn delete_person(&self, id: PersonId) -> LedgerResult<(Person, Vec<Transaction>)> {
        let mut people = write_lock(self.people.table())?;
        let mut transactions = write_lock(self.transactions.table())?;

        let index = people
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LedgerError::person_not_found(id.to_string()))?;

        let removed = transactions.remove_for_person(id);
        if let Err(e) = self.transactions.persist(&transactions) {
            for txn in removed {
                transactions.insert(txn);
            }
            return Err(e);
        }

        let person = people.remove(index);
        if let Err(e) = self.people.persist(&people) {
            people.insert(index, person);
            return Err(e);
        }

        Ok((person, removed))
    }

    /// Delete a category that no transaction references.
    pub fn delete_category(&self, id: CategoryId) -> LedgerResult<Category> {
        let mut categories = write_lock(self.categories.table())?;
        let transactions = read_lock(self.transactions.table())?;

        let index = categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))?;

        let references = transactions.count_for_category(id);
        if references > 0 {
            return Err(LedgerError::BusinessRule(format!(
                "category '{}' is referenced by {} transaction(s) and cannot be deleted",
                categories[index].description, references
            )));
        }

        let category = categories.remove(index);
        if let Err(e) = self.categories.persist(&categories) {
            categories.insert(index, category);
            return Err(e);
        }

        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryPurpose, Money, TransactionKind};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn post(storage: &Storage, person: &Person, category: &Category, cents: i64) -> Transaction {
        storage
            .post_transaction(person.id, category.id, |p, c| {
                Ok(Transaction::new(
                    p.id,
                    c.id,
                    "Mercado",
                    Money::from_cents(cents),
                    TransactionKind::Expense,
                ))
            })
            .unwrap()
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_post_transaction_persists() {
        let (temp_dir, storage) = create_test_storage();
        let person = Person::new("Bruno", 30);
        let category = Category::new("Alimentação", CategoryPurpose::Expense);
        storage.people.insert(person.clone()).unwrap();
        storage.categories.insert(category.clone()).unwrap();

        let txn = post(&storage, &person, &category, 12050);

        let reloaded = Storage::new(LedgerPaths::with_base_dir(temp_dir.path().to_path_buf()))
            .unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.transactions.require(txn.id).unwrap().amount.cents(), 12050);
    }

    #[test]
    fn test_post_transaction_unknown_person_is_business_rule() {
        let (_temp_dir, storage) = create_test_storage();
        let category = Category::new("Alimentação", CategoryPurpose::Expense);
        storage.categories.insert(category.clone()).unwrap();

        let err = storage
            .post_transaction(PersonId::new(), category.id, |_, _| {
                panic!("build must not run for an unresolved person")
            })
            .unwrap_err();

        assert!(err.is_business_rule());
        assert!(err.to_string().contains("Person not found"));
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_post_transaction_build_error_inserts_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let person = Person::new("Ana", 16);
        let category = Category::new("Salário", CategoryPurpose::Income);
        storage.people.insert(person.clone()).unwrap();
        storage.categories.insert(category.clone()).unwrap();

        let err = storage
            .post_transaction(person.id, category.id, |_, _| {
                Err(LedgerError::BusinessRule("minors cannot record income".into()))
            })
            .unwrap_err();

        assert!(err.is_business_rule());
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_person_cascades() {
        let (_temp_dir, storage) = create_test_storage();
        let keep = Person::new("Carla", 40);
        let gone = Person::new("Bruno", 30);
        let category = Category::new("Alimentação", CategoryPurpose::Expense);
        storage.people.insert(keep.clone()).unwrap();
        storage.people.insert(gone.clone()).unwrap();
        storage.categories.insert(category.clone()).unwrap();

        post(&storage, &keep, &category, 100);
        post(&storage, &gone, &category, 200);
        post(&storage, &gone, &category, 300);
        let before = storage.transactions.count().unwrap();

        let (person, removed) = storage.delete_person(gone.id).unwrap();

        assert_eq!(person.name, "Bruno");
        assert_eq!(removed.len(), 2);
        assert!(removed.iter().all(|t| t.person_id == gone.id));
        assert_eq!(storage.transactions.count().unwrap(), before - 2);
        assert!(storage.people.get(gone.id).unwrap().is_none());
        assert!(storage.transactions.get_by_person(gone.id).unwrap().is_empty());
        assert_eq!(storage.transactions.get_by_person(keep.id).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing_person_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let err = storage.delete_person(PersonId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_referenced_category_is_restricted() {
        let (_temp_dir, storage) = create_test_storage();
        let person = Person::new("Bruno", 30);
        let category = Category::new("Alimentação", CategoryPurpose::Expense);
        storage.people.insert(person.clone()).unwrap();
        storage.categories.insert(category.clone()).unwrap();
        post(&storage, &person, &category, 100);

        let err = storage.delete_category(category.id).unwrap_err();

        assert!(err.is_business_rule());
        assert!(err.to_string().contains("referenced by 1 transaction(s)"));
        assert!(storage.categories.get(category.id).unwrap().is_some());
    }

    #[test]
    fn test_delete_unreferenced_category() {
        let (_temp_dir, storage) = create_test_storage();
        let category = Category::new("Lazer", CategoryPurpose::Both);
        storage.categories.insert(category.clone()).unwrap();

        let deleted = storage.delete_category(category.id).unwrap();

        assert_eq!(deleted.description, "Lazer");
        assert_eq!(storage.categories.count().unwrap(), 0);
    }

    #[test]
    fn test_concurrent_post_and_delete_leave_no_orphans() {
        let (temp_dir, storage) = create_test_storage();
        let keep = Person::new("Carla", 40);
        let gone = Person::new("Bruno", 30);
        let category = Category::new("Alimentação", CategoryPurpose::Expense);
        storage.people.insert(keep.clone()).unwrap();
        storage.people.insert(gone.clone()).unwrap();
        storage.categories.insert(category.clone()).unwrap();
        storage.save_all().unwrap();

        std::thread::scope(|scope| {
            for person in [&keep, &gone] {
                let storage = &storage;
                let category = &category;
                scope.spawn(move || {
                    for cents in 1..=100 {
                        let result = storage.post_transaction(person.id, category.id, |p, c| {
                            Ok(Transaction::new(
                                p.id,
                                c.id,
                                "Mercado",
                                Money::from_cents(cents),
                                TransactionKind::Expense,
                            ))
                        });
                        if let Err(e) = result {
                            assert!(e.is_business_rule(), "unexpected error: {}", e);
                        }
                    }
                });
            }

            scope.spawn(|| {
                while storage.transactions.get_by_person(gone.id).unwrap().is_empty() {
                    std::thread::yield_now();
                }
                storage.delete_person(gone.id).unwrap();
            });
        });

        let assert_no_orphans = |storage: &Storage| {
            assert!(storage.people.get(gone.id).unwrap().is_none());
            for txn in storage.transactions.get_all().unwrap() {
                assert!(storage.people.get(txn.person_id).unwrap().is_some());
            }
            assert_eq!(storage.transactions.get_by_person(keep.id).unwrap().len(), 100);
        };

        assert_no_orphans(&storage);

        let reloaded = Storage::new(LedgerPaths::with_base_dir(temp_dir.path().to_path_buf()))
            .unwrap();
        reloaded.load_all().unwrap();
        assert_no_orphans(&reloaded);
    }
}
