//! Core data models for finplan
//!
//! This module contains the data structures of the planning domain: month
//! plans, expenses, categories, accounts, budget cycles and the food budget
//! breakdown.

pub mod account;
pub mod allocation;
pub mod category;
pub mod cycle;
pub mod expense;
pub mod ids;
pub mod money;
pub mod month;

pub use account::{Account, AccountType, NewAccount};
pub use allocation::{AllocationResult, SpendingBlock};
pub use category::{Category, CategoryType};
pub use cycle::{normalized_date, CycleRange, CycleSettings, CUSTOM_CYCLE_DAYS};
pub use expense::{Expense, ExpenseStatus, ExpenseUpdate, NewExpense};
pub use ids::{AccountId, CategoryId, ExpenseId, MonthId};
pub use money::Money;
pub use month::{CalendarMonth, Month, NewMonth};
