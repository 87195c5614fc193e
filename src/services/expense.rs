//! Expense service
//!
//! Adding, editing, deleting and paying expenses through a [`FinanceProvider`].

use tracing::{info, warn};

use super::summary::available_accounts;
use crate::error::{FinplanError, FinplanResult};
use crate::models::{
    Account, AccountId, Category, CategoryId, Expense, ExpenseId, ExpenseStatus, ExpenseUpdate,
    Money, MonthId, NewExpense,
};
use crate::provider::FinanceProvider;

/// Service for expense management
pub struct ExpenseService<'a, P: FinanceProvider> {
    provider: &'a P,
}

impl<'a, P: FinanceProvider> ExpenseService<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Look an expense up across all months, with its relations resolved
    pub fn get(&self, id: ExpenseId) -> FinplanResult<Expense> {
        for month in self.provider.list_months()? {
            let month = self.provider.get_month(month.id)?;
            if let Some(expense) = month.expenses().iter().find(|e| e.id == id) {
                return Ok(expense.clone());
            }
        }
        Err(FinplanError::expense_not_found(id.to_string()))
    }

    /// Find a category by name (case-insensitive) or id
    pub fn find_category(&self, identifier: &str) -> FinplanResult<Option<Category>> {
        let categories = self.provider.list_categories()?;
        let identifier = identifier.trim();

        if let Some(category) = categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(identifier))
        {
            return Ok(Some(category.clone()));
        }
        if let Ok(id) = identifier.parse::<CategoryId>() {
            return Ok(categories.into_iter().find(|c| c.id == id));
        }
        Ok(None)
    }

    /// Find an account by name (case-insensitive) or id
    pub fn find_account(&self, identifier: &str) -> FinplanResult<Option<Account>> {
        let accounts = self.provider.list_accounts()?;
        let identifier = identifier.trim();

        if let Some(account) = accounts
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(identifier))
        {
            return Ok(Some(account.clone()));
        }
        if let Ok(id) = identifier.parse::<AccountId>() {
            return Ok(accounts.into_iter().find(|a| a.id == id));
        }
        Ok(None)
    }

    /// Accounts an expense of `category` may be paid from
    pub fn accounts_for(&self, category: Option<&Category>) -> FinplanResult<Vec<Account>> {
        let accounts = self.provider.list_accounts()?;
        Ok(available_accounts(category, &accounts)
            .into_iter()
            .cloned()
            .collect())
    }

    fn check_account_fits(&self, category: Option<&Category>, account_id: AccountId) -> FinplanResult<()> {
        let allowed = self.accounts_for(category)?;
        if allowed.iter().any(|a| a.id == account_id) {
            return Ok(());
        }

        let category_name = category.map(|c| c.name.as_str()).unwrap_or("Uncategorized");
        Err(FinplanError::Validation(format!(
            "Account {} cannot pay {} expenses",
            account_id, category_name
        )))
    }

    /// Add an expense to a month
    pub fn add(
        &self,
        month_id: MonthId,
        amount: Money,
        category: Option<&Category>,
        account_id: Option<AccountId>,
        note: Option<String>,
    ) -> FinplanResult<Expense> {
        if let Some(account_id) = account_id {
            self.check_account_fits(category, account_id)?;
        }

        let new_expense = NewExpense {
            category_id: category.map(|c| c.id),
            account_id,
            note,
            ..NewExpense::new(month_id, amount)
        };
        new_expense
            .validate()
            .map_err(|e| FinplanError::Validation(e.to_string()))?;

        let expense = self.provider.add_expense(&new_expense)?;
        info!(expense_id = %expense.id, month_id = %month_id, "expense added");
        Ok(expense)
    }

    /// Apply a partial update
    pub fn edit(&self, expense: &Expense, update: &ExpenseUpdate) -> FinplanResult<Expense> {
        if update.is_empty() {
            return Err(FinplanError::Validation("Nothing to update".into()));
        }
        if let Some(Some(account_id)) = update.account_id {
            self.check_account_fits(expense.category.as_ref(), account_id)?;
        }

        self.provider.update_expense(expense.id, update)
    }

    pub fn delete(&self, id: ExpenseId) -> FinplanResult<()> {
        self.provider.delete_expense(id)?;
        info!(expense_id = %id, "expense deleted");
        Ok(())
    }

    /// Flip an expense between paid and unpaid
    ///
    /// The new status is applied to `expense` before the provider is asked.
    /// When the provider fails the previous status is put back and the error
    /// returned.
    pub fn toggle_status(&self, expense: &mut Expense) -> FinplanResult<ExpenseStatus> {
        let previous = expense.status;
        let next = previous.toggled();
        expense.status = next;

        match self
            .provider
            .update_expense(expense.id, &ExpenseUpdate::status(next))
        {
            Ok(_) => Ok(next),
            Err(e) => {
                warn!(expense_id = %expense.id, error = %e, "status change failed, reverting");
                expense.status = previous;
                Err(e)
            }
        }
    }
}
