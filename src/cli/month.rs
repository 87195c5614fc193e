//! Month CLI commands
//!
//! Implements CLI commands for month plans.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::month::{format_month_list, format_month_summary};
use crate::error::{FinplanError, FinplanResult};
use crate::models::{CalendarMonth, Money, Month};
use crate::provider::LocalProvider;
use crate::services::summary::next_month_plan;
use crate::services::MonthService;
use crate::storage::Storage;

use super::parse_money;

/// Month subcommands
#[derive(Subcommand)]
pub enum MonthCommands {
    /// List all month plans with their totals
    List,
    /// Show a month's expenses grouped by category
    Show {
        /// Month name or ID (defaults to the current month)
        month: Option<String>,
        /// List every category, including ones without expenses
        #[arg(short, long)]
        all: bool,
    },
    /// Create a month plan
    Create {
        /// Month name, e.g. "July 2026" or "2026-07" (defaults to next month)
        month: Option<String>,
        /// Total income (defaults to the configured income)
        #[arg(short, long)]
        income: Option<String>,
        /// Start with no expenses instead of the category template
        #[arg(long)]
        empty: bool,
    },
    /// Set a month's total income
    Income {
        /// Month name or ID
        month: String,
        /// New total income
        amount: String,
    },
    /// Delete a future month and its expenses
    Delete {
        /// Month name or ID
        month: String,
        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },
}

/// Resolve a month argument, falling back to the current month
pub(crate) fn month_or_current(
    service: &MonthService<'_, LocalProvider<'_>>,
    month: Option<&str>,
    today: NaiveDate,
) -> FinplanResult<Month> {
    match month {
        Some(identifier) => service.resolve(identifier),
        None => service.current(today)?.ok_or_else(|| {
            FinplanError::Validation(
                "No months planned yet. Run 'finplan month create' first.".into(),
            )
        }),
    }
}

/// Handle a month command
pub fn handle_month_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: MonthCommands,
) -> FinplanResult<()> {
    let provider = LocalProvider::new(storage);
    let service = MonthService::new(&provider);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        MonthCommands::List => {
            let mut summaries = Vec::new();
            for month in service.list()? {
                summaries.push(service.summary(month.id)?);
            }
            print!("{}", format_month_list(&summaries, symbol, today));
        }

        MonthCommands::Show { month, all } => {
            let found = month_or_current(&service, month.as_deref(), today)?;
            let summary = if all {
                service.detailed_summary(found.id)?
            } else {
                service.summary(found.id)?
            };
            print!("{}", format_month_summary(&summary, symbol, today));
        }

        MonthCommands::Create {
            month,
            income,
            empty,
        } => {
            let calendar = match month {
                Some(name) => CalendarMonth::parse(&name).map_err(|e| {
                    FinplanError::Validation(format!(
                        "{}. Use a name like 'July 2026' or '2026-07'",
                        e
                    ))
                })?,
                None => next_month_plan(today),
            };
            let income = match income {
                Some(amount) => parse_money(&amount)?,
                None => settings.default_income,
            };

            let created = service.create(calendar, income, !empty)?;
            println!("Created month: {}", created.name);
            println!("  Income:   {}", created.total_income.format_with_symbol(symbol));
            println!("  Expenses: {} from template", created.expenses().len());
            println!("  ID: {}", created.id);
        }

        MonthCommands::Income { month, amount } => {
            let found = service.resolve(&month)?;
            let amount: Money = parse_money(&amount)?;
            let updated = service.set_income(found.id, amount)?;
            println!(
                "Income for {} set to {}",
                updated.name,
                updated.total_income.format_with_symbol(symbol)
            );
        }

        MonthCommands::Delete { month, yes } => {
            let found = service.resolve(&month)?;
            if !yes {
                println!(
                    "About to delete {} and all of its expenses. This cannot be undone.",
                    found.name
                );
                println!("Re-run with --yes to confirm.");
                return Ok(());
            }

            service.delete(&found, today)?;
            println!("Deleted month: {}", found.name);
        }
    }

    Ok(())
}
