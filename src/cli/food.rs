//! Food budget breakdown command

use chrono::NaiveDate;
use clap::Args;

use crate::config::settings::Settings;
use crate::display::food::format_food_stats;
use crate::error::{AllocationError, FinplanError, FinplanResult};
use crate::models::CycleSettings;
use crate::provider::LocalProvider;
use crate::services::{CycleSettingsService, FoodStatsService, MonthService};
use crate::storage::{KeyValueStore, Storage};

use super::month::month_or_current;

/// Arguments of `finplan food`
#[derive(Args)]
pub struct FoodArgs {
    /// Month name or ID (defaults to the current month)
    pub month: Option<String>,

    /// Start a 30-day cycle on this day of month (1-31)
    #[arg(short, long, conflicts_with = "calendar")]
    pub start_day: Option<u32>,

    /// Use the calendar month as the cycle
    #[arg(long)]
    pub calendar: bool,

    /// Months to shift the cycle start by (-1 = previous month)
    #[arg(short, long, allow_hyphen_values = true)]
    pub offset: Option<i32>,
}

impl FoodArgs {
    /// The cycle these arguments ask for, `None` when they don't change it
    fn requested_cycle(&self, stored: CycleSettings) -> Option<CycleSettings> {
        if self.start_day.is_none() && !self.calendar && self.offset.is_none() {
            return None;
        }

        let start_day = if self.calendar {
            None
        } else {
            self.start_day.or(stored.start_day)
        };
        Some(CycleSettings {
            start_day,
            month_offset: self.offset.unwrap_or(stored.month_offset),
        })
    }
}

/// Handle the food command
pub fn handle_food_command<S: KeyValueStore>(
    storage: &Storage,
    store: &S,
    settings: &Settings,
    today: NaiveDate,
    args: FoodArgs,
) -> FinplanResult<()> {
    let provider = LocalProvider::new(storage);
    let months = MonthService::new(&provider);
    let service = FoodStatsService::new(store, &settings.budget_category);

    let month = month_or_current(&months, args.month.as_deref(), today)?;
    let summary = months.summary(month.id)?;

    let stored = CycleSettingsService::new(store).load()?;
    let result = match args.requested_cycle(stored) {
        Some(cycle) => service.change_cycle(&summary, cycle, today),
        None => service.open(&summary, today),
    };

    match result {
        Ok(Some(stats)) => print!("{}", format_food_stats(&stats, &settings.currency_symbol)),
        // not a calendar month: nothing to show
        Ok(None) => {}
        Err(FinplanError::Allocation(AllocationError::InvalidBudget)) => {
            println!("No {} expenses in {}.", settings.budget_category, month.name);
            println!(
                "The monthly budget is the sum of all {} expenses. Add expenses to see the breakdown.",
                settings.budget_category
            );
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
