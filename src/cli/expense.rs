//! Expense CLI commands
//!
//! Implements CLI commands for adding, editing and paying expenses.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{FinplanError, FinplanResult};
use crate::models::{ExpenseId, ExpenseUpdate};
use crate::provider::LocalProvider;
use crate::services::{ExpenseService, MonthService};
use crate::storage::Storage;

use super::month::month_or_current;
use super::parse_money;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add an expense to a month
    Add {
        /// Amount (e.g., "1500" or "1,500.50")
        amount: String,
        /// Month name or ID (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Account name or ID the expense is paid from
        #[arg(short, long)]
        account: Option<String>,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: ExpenseId,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New note (empty to clear)
        #[arg(short, long)]
        note: Option<String>,
        /// New account name or ID
        #[arg(short, long, conflicts_with = "no_account")]
        account: Option<String>,
        /// Remove the account
        #[arg(long)]
        no_account: bool,
    },
    /// Mark an expense paid, or unpaid again
    Toggle {
        /// Expense ID
        id: ExpenseId,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: ExpenseId,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: ExpenseCommands,
) -> FinplanResult<()> {
    let provider = LocalProvider::new(storage);
    let service = ExpenseService::new(&provider);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            month,
            category,
            account,
            note,
        } => {
            let months = MonthService::new(&provider);
            let month = month_or_current(&months, month.as_deref(), today)?;
            let amount = parse_money(&amount)?;

            let category = match category {
                Some(name) => Some(
                    service
                        .find_category(&name)?
                        .ok_or_else(|| FinplanError::category_not_found(name))?,
                ),
                None => None,
            };
            let account_id = match account {
                Some(name) => Some(
                    service
                        .find_account(&name)?
                        .ok_or_else(|| FinplanError::account_not_found(name))?
                        .id,
                ),
                None => None,
            };

            let expense = service.add(month.id, amount, category.as_ref(), account_id, note)?;
            println!(
                "Added expense #{} to {}: {}",
                expense.id,
                month.name,
                expense.amount.format_with_symbol(symbol)
            );
            if let Some(category) = &expense.category {
                println!("  Category: {}", category.name);
            }
            if expense.account.is_some() {
                println!("  Account:  {}", expense.account_name());
            }
        }

        ExpenseCommands::Edit {
            id,
            amount,
            note,
            account,
            no_account,
        } => {
            let expense = service.get(id)?;

            let account_id = if no_account {
                Some(None)
            } else {
                match account {
                    Some(name) => Some(Some(
                        service
                            .find_account(&name)?
                            .ok_or_else(|| FinplanError::account_not_found(name))?
                            .id,
                    )),
                    None => None,
                }
            };
            let update = ExpenseUpdate {
                amount: amount.as_deref().map(parse_money).transpose()?,
                note,
                status: None,
                account_id,
            };

            if update.is_empty() {
                println!("No changes specified. Use --amount, --note or --account.");
                return Ok(());
            }

            let updated = service.edit(&expense, &update)?;
            println!(
                "Updated expense #{}: {}",
                updated.id,
                updated.amount.format_with_symbol(symbol)
            );
        }

        ExpenseCommands::Toggle { id } => {
            let mut expense = service.get(id)?;
            let status = service.toggle_status(&mut expense)?;
            println!("Expense #{} is now {}", expense.id, status);
        }

        ExpenseCommands::Delete { id } => {
            service.delete(id)?;
            println!("Deleted expense #{}", id);
        }
    }

    Ok(())
}
