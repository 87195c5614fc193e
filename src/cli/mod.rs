//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod category;
pub mod expense;
pub mod food;
pub mod month;
pub mod session;

pub use account::{handle_account_command, AccountCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use food::{handle_food_command, FoodArgs};
pub use month::{handle_month_command, MonthCommands};
pub use session::{handle_session_command, SessionCommands};

use crate::error::{FinplanError, FinplanResult};
use crate::models::Money;

/// Parse an amount argument
pub(crate) fn parse_money(input: &str) -> FinplanResult<Money> {
    Money::parse(input).map_err(|e| {
        FinplanError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '1500' or '1,500.50'. Error: {}",
            input, e
        ))
    })
}
