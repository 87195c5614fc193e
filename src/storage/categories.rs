//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::FinplanError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct CategoryData {
    pub categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), FinplanError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            FinplanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for category in file_data.categories {
            data.insert(category.id, category);
        }

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), FinplanError> {
        let categories = self.get_all()?;
        write_json_atomic(&self.path, &CategoryData { categories })
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, FinplanError> {
        let data = self.data.read().map_err(|e| {
            FinplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all categories in display order (seqNo, then name)
    pub fn get_all(&self) -> Result<Vec<Category>, FinplanError> {
        let data = self.data.read().map_err(|e| {
            FinplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| {
            a.sort_key()
                .cmp(&b.sort_key())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(categories)
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, FinplanError> {
        let data = self.data.read().map_err(|e| {
            FinplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name = name.trim();
        Ok(data
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), FinplanError> {
        let mut data = self.data.write().map_err(|e| {
            FinplanError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(category.id, category);
        Ok(())
    }

    /// The id a new category would get
    pub fn next_id(&self) -> Result<CategoryId, FinplanError> {
        let data = self.data.read().map_err(|e| {
            FinplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .keys()
            .max()
            .map(CategoryId::next)
            .unwrap_or(CategoryId::new(1)))
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, FinplanError> {
        let data = self.data.read().map_err(|e| {
            FinplanError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
