//! Month service
//!
//! Month plan lookups, creation, income changes and deletion on top of a
//! [`FinanceProvider`].

use chrono::NaiveDate;
use tracing::info;

use super::summary::{can_delete_month, next_month_plan, select_current_month, MonthSummary};
use crate::error::{FinplanError, FinplanResult};
use crate::models::{CalendarMonth, Money, Month, MonthId, NewMonth};
use crate::provider::FinanceProvider;

/// Service for month plans
pub struct MonthService<'a, P: FinanceProvider> {
    provider: &'a P,
}

impl<'a, P: FinanceProvider> MonthService<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// All months, newest first
    pub fn list(&self) -> FinplanResult<Vec<Month>> {
        self.provider.list_months()
    }

    /// Find a month by id ("3", "#3") or by name ("June 2026", "jun 2026", "2026-06")
    pub fn find(&self, identifier: &str) -> FinplanResult<Option<Month>> {
        let months = self.provider.list_months()?;
        let identifier = identifier.trim();

        if let Some(month) = months.iter().find(|m| m.name.eq_ignore_ascii_case(identifier)) {
            return Ok(Some(month.clone()));
        }

        if let Ok(calendar) = CalendarMonth::parse(identifier) {
            if let Some(month) = months
                .iter()
                .find(|m| m.calendar_month().ok() == Some(calendar))
            {
                return Ok(Some(month.clone()));
            }
        }

        if let Ok(id) = identifier.parse::<MonthId>() {
            return Ok(months.into_iter().find(|m| m.id == id));
        }

        Ok(None)
    }

    /// Like [`find`](Self::find), failing when nothing matches
    pub fn resolve(&self, identifier: &str) -> FinplanResult<Month> {
        self.find(identifier)?
            .ok_or_else(|| FinplanError::month_not_found(identifier))
    }

    /// The month to open by default: today's month if planned, else the newest
    pub fn current(&self, today: NaiveDate) -> FinplanResult<Option<Month>> {
        let months = self.provider.list_months()?;
        Ok(select_current_month(&months, today).cloned())
    }

    /// Summary grouped by the categories that have expenses
    pub fn summary(&self, id: MonthId) -> FinplanResult<MonthSummary> {
        Ok(MonthSummary::new(self.provider.get_month(id)?))
    }

    /// Summary listing every category
    pub fn detailed_summary(&self, id: MonthId) -> FinplanResult<MonthSummary> {
        let month = self.provider.get_month(id)?;
        let categories = self.provider.list_categories()?;
        Ok(MonthSummary::detailed(month, &categories))
    }

    /// Create the plan for a calendar month
    pub fn create(
        &self,
        month: CalendarMonth,
        total_income: Money,
        auto_fill_from_template: bool,
    ) -> FinplanResult<Month> {
        let new_month = NewMonth {
            auto_fill_from_template,
            ..NewMonth::for_month(month, total_income)
        };
        self.provider.create_month(&new_month)
    }

    /// Create the plan for the month after today's, filled from the template
    pub fn create_next(&self, today: NaiveDate, total_income: Money) -> FinplanResult<Month> {
        self.create(next_month_plan(today), total_income, true)
    }

    pub fn set_income(&self, id: MonthId, total_income: Money) -> FinplanResult<Month> {
        self.provider.update_month(id, total_income)
    }

    /// Delete a month; only months after today's month may be deleted
    pub fn delete(&self, month: &Month, today: NaiveDate) -> FinplanResult<()> {
        if !can_delete_month(month, today) {
            return Err(FinplanError::Validation(format!(
                "Only future months can be deleted, {} is not after {}",
                month.name,
                CalendarMonth::from_date(today)
            )));
        }

        self.provider.delete_month(month.id)?;
        info!(month = %month.name, "month deleted");
        Ok(())
    }
}
