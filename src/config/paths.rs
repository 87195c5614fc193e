//! Path management for finplan
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `FINPLAN_DATA_DIR` environment variable (if set)
//! 2. `$XDG_CONFIG_HOME/finplan`
//! 3. The platform config directory (`~/.config/finplan`, `%APPDATA%\finplan`, ...)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::FinplanError;

/// Manages all paths used by finplan
#[derive(Debug, Clone)]
pub struct FinplanPaths {
    /// Base directory for all finplan data
    base_dir: PathBuf,
}

impl FinplanPaths {
    /// Create a new FinplanPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FinplanError> {
        let base_dir = if let Ok(custom) = std::env::var("FINPLAN_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create FinplanPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the key-value store (cycle settings, session)
    pub fn store_file(&self) -> PathBuf {
        self.base_dir.join("store.json")
    }

    /// Get the path to months.json (months with their expenses)
    pub fn months_file(&self) -> PathBuf {
        self.data_dir().join("months.json")
    }

    /// Get the path to categories.json
    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    /// Get the path to accounts.json
    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FinplanError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinplanError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FinplanError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if finplan has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FinplanError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("finplan"));
    }

    let dirs = BaseDirs::new()
        .ok_or_else(|| FinplanError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("finplan"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinplanPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.store_file(), temp_dir.path().join("store.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinplanPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinplanPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.months_file(),
            temp_dir.path().join("data").join("months.json")
        );
    }
}
