//! Cycle settings service
//!
//! Reads and writes the food budget cycle record in the key-value store.

use tracing::{debug, warn};

use crate::error::{FinplanError, FinplanResult};
use crate::models::CycleSettings;
use crate::storage::KeyValueStore;

/// Key the cycle record is stored under
pub const CYCLE_SETTINGS_KEY: &str = "finance_plan_food_settings";

/// Service for the persisted budget cycle
pub struct CycleSettingsService<'a, S: KeyValueStore> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> CycleSettingsService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The stored cycle, or the calendar month when nothing usable is stored
    pub fn load(&self) -> FinplanResult<CycleSettings> {
        match self.store.get_json::<CycleSettings>(CYCLE_SETTINGS_KEY) {
            Ok(Some(settings)) => match settings.validate() {
                Ok(()) => {
                    debug!(%settings, "loaded cycle settings");
                    Ok(settings)
                }
                Err(e) => {
                    warn!(error = %e, "ignoring out-of-range cycle settings");
                    Ok(CycleSettings::default())
                }
            },
            Ok(None) => Ok(CycleSettings::default()),
            Err(FinplanError::Json(e)) => {
                warn!(error = %e, "ignoring unreadable cycle settings");
                Ok(CycleSettings::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Validate and store the cycle
    pub fn save(&self, settings: CycleSettings) -> FinplanResult<()> {
        settings
            .validate()
            .map_err(|e| FinplanError::Validation(e.to_string()))?;

        self.store.set_json(CYCLE_SETTINGS_KEY, &settings)?;
        debug!(%settings, "saved cycle settings");
        Ok(())
    }

    /// Change the start day, keeping the offset; `None` returns to the calendar month
    pub fn set_start_day(&self, start_day: Option<u32>) -> FinplanResult<CycleSettings> {
        let settings = CycleSettings {
            start_day,
            ..self.load()?
        };
        self.save(settings)?;
        Ok(settings)
    }

    pub fn set_month_offset(&self, month_offset: i32) -> FinplanResult<CycleSettings> {
        let settings = CycleSettings {
            month_offset,
            ..self.load()?
        };
        self.save(settings)?;
        Ok(settings)
    }

    /// Back to the calendar month with no offset
    pub fn reset(&self) -> FinplanResult<CycleSettings> {
        let settings = CycleSettings::calendar();
        self.save(settings)?;
        Ok(settings)
    }
}
