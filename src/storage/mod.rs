//! Storage layer for finplan
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus the key-value store used for small session-spanning records.

pub mod accounts;
pub mod categories;
pub mod file_io;
pub mod init;
pub mod kv;
pub mod months;

pub use accounts::AccountRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use months::MonthRepository;

use crate::config::paths::FinplanPaths;
use crate::error::FinplanError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinplanPaths,
    pub months: MonthRepository,
    pub categories: CategoryRepository,
    pub accounts: AccountRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FinplanPaths) -> Result<Self, FinplanError> {
        paths.ensure_directories()?;

        Ok(Self {
            months: MonthRepository::new(paths.months_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            accounts: AccountRepository::new(paths.accounts_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FinplanPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), FinplanError> {
        self.months.load()?;
        self.categories.load()?;
        self.accounts.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FinplanError> {
        self.months.save()?;
        self.categories.save()?;
        self.accounts.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
