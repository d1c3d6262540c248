//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerResult;
use crate::models::{Category, CategoryId, CategoryPurpose};

use super::file_io::JsonFile;
use super::{read_lock, write_lock, Repository};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    file: JsonFile,
    data: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: JsonFile::new(path),
            data: RwLock::new(Vec::new()),
        }
    }

    pub(super) fn table(&self) -> &RwLock<Vec<Category>> {
        &self.data
    }

    pub(super) fn persist(&self, categories: &[Category]) -> LedgerResult<()> {
        let file_data = CategoryData {
            categories: categories.to_vec(),
        };
        self.file.write(&file_data)
    }

    /// Categories usable under `purpose`; `Both` categories are always included
    pub fn get_by_purpose(&self, purpose: CategoryPurpose) -> LedgerResult<Vec<Category>> {
        self.find_all(|c| c.purpose.is_listed_under(purpose))
    }

    /// Get a category by description (case-insensitive)
    pub fn get_by_description(&self, description: &str) -> LedgerResult<Option<Category>> {
        let data = read_lock(&self.data)?;
        let description = description.trim().to_lowercase();
        Ok(data
            .iter()
            .find(|c| c.description.to_lowercase() == description)
            .cloned())
    }

    /// Find a category by ID (full or short form) or by description
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Category>> {
        {
            let data = read_lock(&self.data)?;
            if let Some(category) = data.iter().find(|c| c.id.matches(identifier)) {
                return Ok(Some(category.clone()));
            }
        }
        self.get_by_description(identifier)
    }
}

impl Repository for CategoryRepository {
    type Id = CategoryId;
    type Record = Category;
    const ENTITY: &'static str = "Category";

    fn load(&self) -> LedgerResult<()> {
        let file_data: CategoryData = self.file.read_or_default()?;
        *write_lock(&self.data)? = file_data.categories;
        Ok(())
    }

    fn save(&self) -> LedgerResult<()> {
        let data = read_lock(&self.data)?;
        self.persist(&data)
    }

    fn insert(&self, category: Category) -> LedgerResult<CategoryId> {
        let mut data = write_lock(&self.data)?;
        let id = category.id;
        match data.iter_mut().find(|c| c.id == id) {
            Some(existing) => *existing = category,
            None => data.push(category),
        }
        Ok(id)
    }

    fn get(&self, id: CategoryId) -> LedgerResult<Option<Category>> {
        let data = read_lock(&self.data)?;
        Ok(data.iter().find(|c| c.id == id).cloned())
    }

    fn get_all(&self) -> LedgerResult<Vec<Category>> {
        Ok(read_lock(&self.data)?.clone())
    }

    fn count(&self) -> LedgerResult<usize> {
        Ok(read_lock(&self.data)?.len())
    }
}
