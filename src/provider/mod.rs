//! Month and expense data provider
//!
//! Services talk to month, expense, category and account data through
//! [`FinanceProvider`]. The bundled implementation is [`LocalProvider`],
//! backed by the JSON repositories in [`crate::storage`].

pub mod local;

pub use local::LocalProvider;

use crate::error::FinplanResult;
use crate::models::{
    Account, Category, Expense, ExpenseId, ExpenseUpdate, Money, Month, MonthId, NewAccount,
    NewExpense, NewMonth,
};

/// Operations offered by the month/expense backend
pub trait FinanceProvider {
    /// All month plans, newest first; expenses are not included
    fn list_months(&self) -> FinplanResult<Vec<Month>>;

    /// One month with its expenses, category and account resolved
    fn get_month(&self, id: MonthId) -> FinplanResult<Month>;

    fn create_month(&self, month: &NewMonth) -> FinplanResult<Month>;

    /// Change a month's income
    fn update_month(&self, id: MonthId, total_income: Money) -> FinplanResult<Month>;

    /// Delete a month and all of its expenses
    fn delete_month(&self, id: MonthId) -> FinplanResult<()>;

    fn add_expense(&self, expense: &NewExpense) -> FinplanResult<Expense>;

    /// Apply a partial update, returning the updated expense
    fn update_expense(&self, id: ExpenseId, update: &ExpenseUpdate) -> FinplanResult<Expense>;

    fn delete_expense(&self, id: ExpenseId) -> FinplanResult<()>;

    /// Categories in display order
    fn list_categories(&self) -> FinplanResult<Vec<Category>>;

    fn list_accounts(&self) -> FinplanResult<Vec<Account>>;

    fn create_account(&self, account: &NewAccount) -> FinplanResult<Account>;
}
