//! Category service
//!
//! Creation, lookup and restricted deletion of categories.

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryId, CategoryPurpose};
use crate::storage::{Repository, Storage};

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, description: &str, purpose: CategoryPurpose) -> LedgerResult<Category> {
        let category = Category::new(description.trim(), purpose);
        category.validate()?;

        self.storage.categories.insert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.description.clone()),
            &category,
        );

        tracing::info!(category = %category.id, %purpose, "created category");
        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> LedgerResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by description or ID string
    pub fn find(&self, identifier: &str) -> LedgerResult<Option<Category>> {
        self.storage.categories.find(identifier)
    }

    /// Like [`CategoryService::find`], but a miss is an error
    pub fn resolve(&self, identifier: &str) -> LedgerResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| LedgerError::category_not_found(identifier))
    }

    /// All categories in insertion order
    pub fn list(&self) -> LedgerResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Categories usable for `purpose`, including those accepting both kinds
    pub fn list_by_purpose(&self, purpose: CategoryPurpose) -> LedgerResult<Vec<Category>> {
        self.storage.categories.get_by_purpose(purpose)
    }

    /// Delete a category no transaction refers to
    pub fn delete(&self, id: CategoryId) -> LedgerResult<Category> {
        let category = match self.storage.delete_category(id) {
            Ok(category) => category,
            Err(e) => {
                if e.is_business_rule() {
                    tracing::warn!(category = %id, error = %e, "category delete refused");
                }
                return Err(e);
            }
        };

        self.storage.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.description.clone()),
            &category,
        );

        tracing::info!(category = %category.id, "deleted category");
        Ok(category)
    }
}
