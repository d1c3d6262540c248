//! Person repository for JSON storage
//!
//! Manages loading and saving people to people.json. People are kept in
//! insertion order, which is also the row order of per-person summaries.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerResult;
use crate::models::{Person, PersonId};

use super::file_io::JsonFile;
use super::{read_lock, write_lock, Repository};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PersonData {
    people: Vec<Person>,
}

/// Repository for person persistence
pub struct PersonRepository {
    file: JsonFile,
    data: RwLock<Vec<Person>>,
}

impl PersonRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: JsonFile::new(path),
            data: RwLock::new(Vec::new()),
        }
    }

    pub(super) fn table(&self) -> &RwLock<Vec<Person>> {
        &self.data
    }

    /// Write `people` to disk; callers hold the table lock
    pub(super) fn persist(&self, people: &[Person]) -> LedgerResult<()> {
        let file_data = PersonData {
            people: people.to_vec(),
        };
        self.file.write(&file_data)
    }

    /// Get a person by name (case-insensitive, surrounding whitespace ignored)
    pub fn get_by_name(&self, name: &str) -> LedgerResult<Option<Person>> {
        let data = read_lock(&self.data)?;
        let name = name.trim().to_lowercase();
        Ok(data.iter().find(|p| p.name.to_lowercase() == name).cloned())
    }

    /// Find a person by ID (full or short form) or by name
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Person>> {
        {
            let data = read_lock(&self.data)?;
            if let Some(person) = data.iter().find(|p| p.id.matches(identifier)) {
                return Ok(Some(person.clone()));
            }
        }
        self.get_by_name(identifier)
    }
}

impl Repository for PersonRepository {
    type Id = PersonId;
    type Record = Person;
    const ENTITY: &'static str = "Person";

    fn load(&self) -> LedgerResult<()> {
        let file_data: PersonData = self.file.read_or_default()?;
        let mut data = write_lock(&self.data)?;
        *data = file_data.people;
        Ok(())
    }

    fn save(&self) -> LedgerResult<()> {
        let data = read_lock(&self.data)?;
        self.persist(&data)
    }

    fn insert(&self, person: Person) -> LedgerResult<PersonId> {
        let mut data = write_lock(&self.data)?;
        let id = person.id;
        match data.iter_mut().find(|p| p.id == id) {
            Some(existing) => *existing = person,
            None => data.push(person),
        }
        Ok(id)
    }

    fn get(&self, id: PersonId) -> LedgerResult<Option<Person>> {
        let data = read_lock(&self.data)?;
        Ok(data.iter().find(|p| p.id == id).cloned())
    }

    fn get_all(&self) -> LedgerResult<Vec<Person>> {
        Ok(read_lock(&self.data)?.clone())
    }

    fn count(&self) -> LedgerResult<usize> {
        Ok(read_lock(&self.data)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PersonRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = PersonRepository::new(temp_dir.path().join("people.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_require() {
        let (_temp_dir, repo) = create_test_repo();
        let person = Person::new("Ana", 16);
        let id = repo.insert(person).unwrap();

        let retrieved = repo.require(id).unwrap();
        assert_eq!(retrieved.name, "Ana");
        assert!(retrieved.is_minor());
    }

    #[test]
    fn test_require_missing_is_not_found() {
        let (_temp_dir, repo) = create_test_repo();
        let err = repo.require(PersonId::new()).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().starts_with("Person not found"));
    }

    #[test]
    fn test_insertion_order_survives_reload() {
        let (temp_dir, repo) = create_test_repo();
        for name in ["Carla", "Ana", "Bruno"] {
            repo.insert(Person::new(name, 30)).unwrap();
        }
        repo.save().unwrap();

        let reloaded = PersonRepository::new(temp_dir.path().join("people.json"));
        reloaded.load().unwrap();
        let names: Vec<_> = reloaded
            .get_all()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Carla", "Ana", "Bruno"]);
    }

    #[test]
    fn test_find_by_name_or_short_id() {
        let (_temp_dir, repo) = create_test_repo();
        let person = Person::new("Bruno", 30);
        repo.insert(person.clone()).unwrap();

        assert_eq!(repo.find("bruno").unwrap().unwrap().id, person.id);
        assert_eq!(
            repo.find(&person.id.to_string()).unwrap().unwrap().id,
            person.id
        );
        assert!(repo.find("Nobody").unwrap().is_none());
    }

    #[test]
    fn test_find_all_filters_minors() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(Person::new("Ana", 16)).unwrap();
        repo.insert(Person::new("Bruno", 30)).unwrap();

        let minors = repo.find_all(|p| p.is_minor()).unwrap();
        assert_eq!(minors.len(), 1);
        assert_eq!(minors[0].name, "Ana");
    }
}
