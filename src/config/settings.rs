//! User settings for finplan
//!
//! Manages user preferences: currency display, which category drives the food
//! budget breakdown, and the default income offered for new month plans.

use serde::{Deserialize, Serialize};

use super::paths::FinplanPaths;
use crate::error::FinplanError;
use crate::models::Money;

/// User settings for finplan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Category whose expenses form the food budget (matched case-insensitively)
    #[serde(default = "default_budget_category")]
    pub budget_category: String,

    /// Income pre-filled when creating a month plan
    #[serde(default = "default_income")]
    pub default_income: Money,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_budget_category() -> String {
    "Food".to_string()
}

fn default_income() -> Money {
    Money::from_major(30_000)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            budget_category: default_budget_category(),
            default_income: default_income(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FinplanPaths) -> Result<Self, FinplanError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinplanError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinplanError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinplanPaths) -> Result<(), FinplanError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinplanError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinplanError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check whether a category name is the configured budget category
    pub fn is_budget_category(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(self.budget_category.trim())
    }
}
