//! Person service
//!
//! Creation, lookup and cascade deletion of people.

use crate::audit::{AuditEntry, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Person, PersonId, Transaction};
use crate::storage::{Repository, Storage};

/// Service for person management
pub struct PersonService<'a> {
    storage: &'a Storage,
}

/// Result of deleting a person
#[derive(Debug, Clone)]
pub struct DeletedPerson {
    pub person: Person,
    /// Transactions removed along with the person, newest first
    pub transactions: Vec<Transaction>,
}

impl<'a> PersonService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new person
    pub fn create(&self, name: &str, age: u32) -> LedgerResult<Person> {
        let person = Person::new(name.trim(), age);
        person.validate()?;

        self.storage.people.insert(person.clone())?;
        self.storage.people.save()?;

        self.storage.log_create(
            EntityType::Person,
            person.id.to_string(),
            Some(person.name.clone()),
            &person,
        );

        tracing::info!(person = %person.id, age = person.age, "created person");
        Ok(person)
    }

    pub fn get(&self, id: PersonId) -> LedgerResult<Option<Person>> {
        self.storage.people.get(id)
    }

    /// Get a person by ID, failing with "not found" if absent
    pub fn require(&self, id: PersonId) -> LedgerResult<Person> {
        self.storage.people.require(id)
    }

    /// Find a person by name or ID string
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Person>> {
        self.storage.people.find(identifier)
    }

    /// Like [`PersonService::find`], but a miss is an error
    pub fn resolve(&self, identifier: &str) -> LedgerResult<Person> {
        self.find(identifier)?
            .ok_or_else(|| LedgerError::person_not_found(identifier))
    }

    /// All people in insertion order
    pub fn list(&self) -> LedgerResult<Vec<Person>> {
        self.storage.people.get_all()
    }

    /// Delete a person and every transaction they own
    pub fn delete(&self, id: PersonId) -> LedgerResult<DeletedPerson> {
        let (person, transactions) = self.storage.delete_person(id)?;

        let cause = format!("cascade from {}", person.id);
        let mut entries: Vec<AuditEntry> = transactions
            .iter()
            .map(|txn| {
                AuditEntry::delete(
                    EntityType::Transaction,
                    txn.id.to_string(),
                    Some(txn.description.clone()),
                    txn,
                )
                .caused_by(cause.clone())
            })
            .collect();
        entries.push(AuditEntry::delete(
            EntityType::Person,
            person.id.to_string(),
            Some(person.name.clone()),
            &person,
        ));
        self.storage.record_audit(&entries);

        tracing::info!(
            person = %person.id,
            removed_transactions = transactions.len(),
            "deleted person"
        );
        Ok(DeletedPerson {
            person,
            transactions,
        })
    }

    pub fn count(&self) -> LedgerResult<usize> {
        self.storage.people.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::LedgerPaths;
    use crate::models::{Category, CategoryPurpose, Money, TransactionKind};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_person() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PersonService::new(&storage);

        let person = service.create("  Bruno  ", 30).unwrap();

        assert_eq!(person.name, "Bruno");
        assert!(!person.is_minor());
        assert_eq!(service.count().unwrap(), 1);
        assert_eq!(storage.audit().entry_count().unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_invalid_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PersonService::new(&storage);

        let err = service.create("   ", 30).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: "name", .. }));

        let err = service.create("Ana", 0).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: "age", .. }));

        let err = service.create("Ana", 151).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(service.count().unwrap(), 0);
        assert!(!storage.audit().exists());
    }

    #[test]
    fn test_resolve_unknown_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PersonService::new(&storage);

        let err = service.resolve("Nobody").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_cascades_and_audits() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PersonService::new(&storage);
        let person = service.create("Bruno", 30).unwrap();
        let category = Category::new("Alimentação", CategoryPurpose::Expense);
        storage.categories.insert(category.clone()).unwrap();

        for cents in [100, 200] {
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
                .unwrap();
        }

        let deleted = service.delete(person.id).unwrap();

        assert_eq!(deleted.transactions.len(), 2);
        assert_eq!(storage.transactions.count().unwrap(), 0);
        assert!(service.get(person.id).unwrap().is_none());

        let entries = storage.audit().read_all().unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.operation, Operation::Delete);
        assert_eq!(last.entity_type, EntityType::Person);
        let cascaded = entries
            .iter()
            .filter(|e| e.entity_type == EntityType::Transaction && e.cause.is_some())
            .count();
        assert_eq!(cascaded, 2);
    }

    #[test]
    fn test_audit_failure_does_not_fail_committed_create() {
        let (temp_dir, storage) = create_test_storage();
        // A directory in place of the log file makes every append fail
        std::fs::create_dir_all(storage.audit().path()).unwrap();
        let service = PersonService::new(&storage);

        let person = service.create("Bruno", 30).unwrap();

        let reloaded = Storage::new(LedgerPaths::with_base_dir(temp_dir.path().to_path_buf()))
            .unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.people.require(person.id).unwrap().name, "Bruno");
    }
}
