//! Local JSON-backed provider
//!
//! Serves the month/expense operations from the repositories in
//! [`Storage`], persisting after every mutation.

use std::collections::HashMap;

use tracing::{debug, info};

use super::FinanceProvider;
use crate::error::{FinplanError, FinplanResult};
use crate::models::{
    Account, AccountId, CalendarMonth, Category, CategoryId, Expense, ExpenseId, ExpenseStatus,
    ExpenseUpdate, Money, Month, MonthId, NewAccount, NewExpense, NewMonth,
};
use crate::storage::Storage;

/// Provider over the local JSON repositories
pub struct LocalProvider<'a> {
    storage: &'a Storage,
}

impl<'a> LocalProvider<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn require_month(&self, id: MonthId) -> FinplanResult<Month> {
        self.storage
            .months
            .get(id)?
            .ok_or_else(|| FinplanError::month_not_found(id.to_string()))
    }

    fn require_category(&self, id: CategoryId) -> FinplanResult<Category> {
        self.storage
            .categories
            .get(id)?
            .ok_or_else(|| FinplanError::category_not_found(id.to_string()))
    }

    fn require_account(&self, id: AccountId) -> FinplanResult<Account> {
        self.storage
            .accounts
            .get(id)?
            .ok_or_else(|| FinplanError::account_not_found(id.to_string()))
    }

    /// Attach category and account records to every expense of the month
    fn resolve(&self, mut month: Month) -> FinplanResult<Month> {
        let categories: HashMap<CategoryId, Category> = self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let accounts: HashMap<AccountId, Account> = self
            .storage
            .accounts
            .get_all()?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        if let Some(expenses) = month.expenses.as_mut() {
            for expense in expenses.iter_mut() {
                expense.category = expense.category_id.and_then(|id| categories.get(&id).cloned());
                expense.account = expense.account_id.and_then(|id| accounts.get(&id).cloned());
            }
        }
        Ok(month)
    }

    fn resolve_expense(&self, mut expense: Expense) -> FinplanResult<Expense> {
        expense.category = match expense.category_id {
            Some(id) => self.storage.categories.get(id)?,
            None => None,
        };
        expense.account = match expense.account_id {
            Some(id) => self.storage.accounts.get(id)?,
            None => None,
        };
        Ok(expense)
    }

    /// One unpaid expense per spending category with a default amount
    fn template_expenses(&self) -> FinplanResult<Vec<Expense>> {
        let mut expenses = Vec::new();
        for category in self.storage.categories.get_all()? {
            if category.is_income() || !category.default_amount.is_positive() {
                continue;
            }
            expenses.push(Expense {
                id: self.storage.months.next_expense_id()?,
                amount: category.default_amount,
                note: None,
                status: ExpenseStatus::Unpaid,
                category_id: Some(category.id),
                category: None,
                account_id: None,
                account: None,
            });
        }
        Ok(expenses)
    }

    fn check_month_name(&self, name: &str) -> FinplanResult<()> {
        let duplicate = || FinplanError::Duplicate {
            entity_type: "Month",
            identifier: name.to_string(),
        };

        if self.storage.months.get_by_name(name)?.is_some() {
            return Err(duplicate());
        }
        if let Ok(calendar) = CalendarMonth::parse(name) {
            if self.storage.months.month_exists(calendar)? {
                return Err(duplicate());
            }
        }
        Ok(())
    }
}

impl FinanceProvider for LocalProvider<'_> {
    fn list_months(&self) -> FinplanResult<Vec<Month>> {
        let months = self.storage.months.get_all()?;
        debug!(count = months.len(), "listed months");
        Ok(months
            .into_iter()
            .map(|mut m| {
                m.expenses = None;
                m
            })
            .collect())
    }

    fn get_month(&self, id: MonthId) -> FinplanResult<Month> {
        let month = self.require_month(id)?;
        self.resolve(month)
    }

    fn create_month(&self, new_month: &NewMonth) -> FinplanResult<Month> {
        let name = new_month.name.trim();
        if name.is_empty() {
            return Err(FinplanError::Validation("Month name cannot be empty".into()));
        }
        if new_month.total_income.is_negative() {
            return Err(FinplanError::Validation("Income cannot be negative".into()));
        }
        self.check_month_name(name)?;

        let mut month = self
            .storage
            .months
            .create(name.to_string(), new_month.total_income)?;

        if new_month.auto_fill_from_template {
            month.expenses = Some(self.template_expenses()?);
            self.storage.months.update(month.clone())?;
        }
        self.storage.months.save()?;

        info!(month = %month.name, expenses = month.expenses().len(), "created month");
        self.resolve(month)
    }

    fn update_month(&self, id: MonthId, total_income: Money) -> FinplanResult<Month> {
        if total_income.is_negative() {
            return Err(FinplanError::Validation("Income cannot be negative".into()));
        }

        let mut month = self.require_month(id)?;
        month.total_income = total_income;
        self.storage.months.update(month.clone())?;
        self.storage.months.save()?;

        info!(month = %month.name, income = %total_income, "updated month income");
        self.resolve(month)
    }

    fn delete_month(&self, id: MonthId) -> FinplanResult<()> {
        if !self.storage.months.delete(id)? {
            return Err(FinplanError::month_not_found(id.to_string()));
        }
        self.storage.months.save()?;

        info!(month_id = %id, "deleted month");
        Ok(())
    }

    fn add_expense(&self, new_expense: &NewExpense) -> FinplanResult<Expense> {
        new_expense
            .validate()
            .map_err(|e| FinplanError::Validation(e.to_string()))?;

        let mut month = self.require_month(new_expense.month_id)?;
        if let Some(category_id) = new_expense.category_id {
            self.require_category(category_id)?;
        }
        if let Some(account_id) = new_expense.account_id {
            self.require_account(account_id)?;
        }

        let expense = Expense {
            id: self.storage.months.next_expense_id()?,
            amount: new_expense.amount,
            note: new_expense
                .note
                .as_ref()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            status: new_expense.status,
            category_id: new_expense.category_id,
            category: None,
            account_id: new_expense.account_id,
            account: None,
        };

        month
            .expenses
            .get_or_insert_with(Vec::new)
            .push(expense.clone());
        self.storage.months.update(month)?;
        self.storage.months.save()?;

        info!(expense_id = %expense.id, amount = %expense.amount, "added expense");
        self.resolve_expense(expense)
    }

    fn update_expense(&self, id: ExpenseId, update: &ExpenseUpdate) -> FinplanResult<Expense> {
        update
            .validate()
            .map_err(|e| FinplanError::Validation(e.to_string()))?;
        if let Some(Some(account_id)) = update.account_id {
            self.require_account(account_id)?;
        }

        let (month_id, _) = self
            .storage
            .months
            .find_expense(id)?
            .ok_or_else(|| FinplanError::expense_not_found(id.to_string()))?;
        let mut month = self.require_month(month_id)?;

        let expense = month
            .expenses
            .get_or_insert_with(Vec::new)
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| FinplanError::expense_not_found(id.to_string()))?;
        update.apply_to(expense);
        let updated = expense.clone();

        self.storage.months.update(month)?;
        self.storage.months.save()?;

        debug!(expense_id = %id, status = %updated.status, "updated expense");
        self.resolve_expense(updated)
    }

    fn delete_expense(&self, id: ExpenseId) -> FinplanResult<()> {
        let (month_id, _) = self
            .storage
            .months
            .find_expense(id)?
            .ok_or_else(|| FinplanError::expense_not_found(id.to_string()))?;
        let mut month = self.require_month(month_id)?;

        if let Some(expenses) = month.expenses.as_mut() {
            expenses.retain(|e| e.id != id);
        }
        self.storage.months.update(month)?;
        self.storage.months.save()?;

        info!(expense_id = %id, "deleted expense");
        Ok(())
    }

    fn list_categories(&self) -> FinplanResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    fn list_accounts(&self) -> FinplanResult<Vec<Account>> {
        self.storage.accounts.get_all()
    }

    fn create_account(&self, new_account: &NewAccount) -> FinplanResult<Account> {
        let account = new_account
            .clone()
            .into_account(self.storage.accounts.next_id()?);
        account
            .validate()
            .map_err(|e| FinplanError::Validation(e.to_string()))?;

        if self.storage.accounts.name_exists(&account.name)? {
            return Err(FinplanError::Duplicate {
                entity_type: "Account",
                identifier: account.name,
            });
        }

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        info!(account = %account.name, "created account");
        Ok(account)
    }
}
