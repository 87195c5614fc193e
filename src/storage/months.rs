//! Month repository for JSON storage
//!
//! Manages loading and saving month plans, with their expenses, to months.json

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::FinplanError;
use crate::models::{CalendarMonth, Expense, ExpenseId, Money, Month, MonthId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable month data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MonthData {
    months: Vec<Month>,
    #[serde(default = "first_id")]
    next_month_id: i64,
    #[serde(default = "first_id")]
    next_expense_id: i64,
}

fn first_id() -> i64 {
    1
}

impl Default for MonthData {
    fn default() -> Self {
        Self {
            months: Vec::new(),
            next_month_id: first_id(),
            next_expense_id: first_id(),
        }
    }
}

#[derive(Debug, Default)]
struct MonthState {
    months: BTreeMap<MonthId, Month>,
    next_month_id: i64,
    next_expense_id: i64,
}

/// Repository for month persistence
pub struct MonthRepository {
    path: PathBuf,
    data: RwLock<MonthState>,
}

fn lock_error(e: impl std::fmt::Display) -> FinplanError {
    FinplanError::Storage(format!("Failed to acquire month lock: {}", e))
}

impl MonthRepository {
    /// Create a new month repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(MonthState {
                next_month_id: first_id(),
                next_expense_id: first_id(),
                ..MonthState::default()
            }),
        }
    }

    /// Load months from disk
    pub fn load(&self) -> Result<(), FinplanError> {
        let file_data: MonthData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;

        data.months = file_data
            .months
            .into_iter()
            .map(|mut month| {
                month.expenses.get_or_insert_with(Vec::new);
                (month.id, month)
            })
            .collect();

        // Never hand out an id that is already on disk
        let max_month = data.months.keys().map(|id| id.get()).max().unwrap_or(0);
        let max_expense = data
            .months
            .values()
            .flat_map(|m| m.expenses())
            .map(|e| e.id.get())
            .max()
            .unwrap_or(0);
        data.next_month_id = file_data.next_month_id.max(max_month + 1);
        data.next_expense_id = file_data.next_expense_id.max(max_expense + 1);

        Ok(())
    }

    /// Save months to disk
    pub fn save(&self) -> Result<(), FinplanError> {
        let data = self.data.read().map_err(lock_error)?;

        let file_data = MonthData {
            months: data.months.values().cloned().collect(),
            next_month_id: data.next_month_id,
            next_expense_id: data.next_expense_id,
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a month, with its stored expenses
    pub fn get(&self, id: MonthId) -> Result<Option<Month>, FinplanError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.months.get(&id).cloned())
    }

    /// All months, newest calendar month first
    pub fn get_all(&self) -> Result<Vec<Month>, FinplanError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut months: Vec<Month> = data.months.values().cloned().collect();
        months.sort_by(|a, b| {
            let key_a = a.calendar_month().ok();
            let key_b = b.calendar_month().ok();
            key_b.cmp(&key_a).then(b.id.cmp(&a.id))
        });
        Ok(months)
    }

    /// Get a month by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Month>, FinplanError> {
        let data = self.data.read().map_err(lock_error)?;
        let name = name.trim();

        Ok(data
            .months
            .values()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Check whether a month plan already exists for the same calendar month
    pub fn month_exists(&self, month: CalendarMonth) -> Result<bool, FinplanError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data
            .months
            .values()
            .any(|m| m.calendar_month().ok() == Some(month)))
    }

    /// Create and store a new, empty month
    pub fn create(&self, name: String, total_income: Money) -> Result<Month, FinplanError> {
        let mut data = self.data.write().map_err(lock_error)?;

        let id = MonthId::new(data.next_month_id);
        data.next_month_id += 1;

        let month = Month {
            id,
            name,
            total_income,
            expenses: Some(Vec::new()),
            created_at: Utc::now(),
        };
        data.months.insert(id, month.clone());
        Ok(month)
    }

    /// Replace a stored month
    pub fn update(&self, month: Month) -> Result<(), FinplanError> {
        let mut data = self.data.write().map_err(lock_error)?;
        if !data.months.contains_key(&month.id) {
            return Err(FinplanError::month_not_found(month.id.to_string()));
        }
        data.months.insert(month.id, month);
        Ok(())
    }

    /// Delete a month and its expenses
    pub fn delete(&self, id: MonthId) -> Result<bool, FinplanError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.months.remove(&id).is_some())
    }

    /// Reserve the next expense id
    pub fn next_expense_id(&self) -> Result<ExpenseId, FinplanError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let id = ExpenseId::new(data.next_expense_id);
        data.next_expense_id += 1;
        Ok(id)
    }

    /// Find an expense and the month it belongs to
    pub fn find_expense(&self, id: ExpenseId) -> Result<Option<(MonthId, Expense)>, FinplanError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.months.values().find_map(|m| {
            m.expenses()
                .iter()
                .find(|e| e.id == id)
                .map(|e| (m.id, e.clone()))
        }))
    }

    /// Count months
    pub fn count(&self) -> Result<usize, FinplanError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.months.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, MonthRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = MonthRepository::new(temp_dir.path().join("months.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_months_sorted_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.create("November 2025".into(), Money::zero()).unwrap();
        repo.create("January 2026".into(), Money::zero()).unwrap();
        repo.create("December 2025".into(), Money::zero()).unwrap();

        let names: Vec<String> = repo.get_all().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["January 2026", "December 2025", "November 2025"]);
    }

    #[test]
    fn test_save_and_reload_keeps_id_counters() {
        let (temp_dir, repo) = create_test_repo();
        let month = repo.create("June 2026".into(), Money::from_major(100)).unwrap();
        let expense_id = repo.next_expense_id().unwrap();
        repo.save().unwrap();

        let reloaded = MonthRepository::new(temp_dir.path().join("months.json"));
        reloaded.load().unwrap();

        let loaded = reloaded.get(month.id).unwrap().unwrap();
        assert_eq!(loaded.total_income, Money::from_major(100));
        assert!(reloaded.next_expense_id().unwrap() > expense_id);

        let second = reloaded.create("July 2026".into(), Money::zero()).unwrap();
        assert!(second.id > month.id);
    }

    #[test]
    fn test_lookup_by_name_and_calendar_month() {
        let (_temp_dir, repo) = create_test_repo();
        repo.create("June 2026".into(), Money::zero()).unwrap();

        assert!(repo.get_by_name("june 2026").unwrap().is_some());
        assert!(repo
            .month_exists(CalendarMonth::new(2026, 6).unwrap())
            .unwrap());
        assert!(!repo
            .month_exists(CalendarMonth::new(2026, 7).unwrap())
            .unwrap());
    }

    #[test]
    fn test_update_missing_month_fails() {
        let (_temp_dir, repo) = create_test_repo();
        let mut month = repo.create("June 2026".into(), Money::zero()).unwrap();
        repo.delete(month.id).unwrap();

        month.total_income = Money::from_major(1);
        assert!(repo.update(month).unwrap_err().is_not_found());
    }
}
