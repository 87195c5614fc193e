//! Food budget breakdown
//!
//! The food budget of a month is the total of its expenses in the budget
//! category. This service looks that total up, pairs it with the stored
//! cycle and runs the allocator.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::allocator::{allocate, BudgetPeriodConfig};
use super::cycle::CycleSettingsService;
use super::summary::MonthSummary;
use crate::error::{AllocationError, FinplanResult};
use crate::models::{AllocationResult, CycleSettings, Money};
use crate::storage::KeyValueStore;

/// A computed breakdown together with its inputs
#[derive(Debug, Clone)]
pub struct FoodStats {
    pub month_name: String,
    pub category_name: String,
    pub budget: Money,
    pub cycle: CycleSettings,
    pub allocation: AllocationResult,
}

/// Service for the food budget breakdown
pub struct FoodStatsService<'a, S: KeyValueStore> {
    cycles: CycleSettingsService<'a, S>,
    budget_category: &'a str,
}

impl<'a, S: KeyValueStore> FoodStatsService<'a, S> {
    /// `budget_category` names the category whose expenses form the budget
    pub fn new(store: &'a S, budget_category: &'a str) -> Self {
        Self {
            cycles: CycleSettingsService::new(store),
            budget_category,
        }
    }

    /// Total of the month's budget category, zero when it has no expenses
    pub fn budget(&self, summary: &MonthSummary) -> Money {
        summary
            .group_named(self.budget_category)
            .map(|g| g.total)
            .unwrap_or_default()
    }

    /// Open the breakdown with the stored cycle
    ///
    /// An empty budget is an [`AllocationError::InvalidBudget`] error. A month
    /// whose name isn't a calendar month has no breakdown and yields `Ok(None)`.
    pub fn open(&self, summary: &MonthSummary, today: NaiveDate) -> FinplanResult<Option<FoodStats>> {
        let cycle = self.cycles.load()?;
        self.compute(summary, cycle, today)
    }

    /// Store a new cycle, then recompute the breakdown with it
    pub fn change_cycle(
        &self,
        summary: &MonthSummary,
        cycle: CycleSettings,
        today: NaiveDate,
    ) -> FinplanResult<Option<FoodStats>> {
        self.cycles.save(cycle)?;
        self.compute(summary, cycle, today)
    }

    fn compute(
        &self,
        summary: &MonthSummary,
        cycle: CycleSettings,
        today: NaiveDate,
    ) -> FinplanResult<Option<FoodStats>> {
        let budget = self.budget(summary);
        let config = BudgetPeriodConfig::new(budget.as_f64(), summary.month.name.clone(), cycle);

        match allocate(&config, today) {
            Ok(allocation) => {
                debug!(month = %summary.month.name, %budget, %cycle, "computed food stats");
                Ok(Some(FoodStats {
                    month_name: summary.month.name.clone(),
                    category_name: self.budget_category.to_string(),
                    budget,
                    cycle,
                    allocation,
                }))
            }
            Err(AllocationError::UnparseableDate(name)) => {
                warn!(month = %name, "month name is not a calendar month, no food stats");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
