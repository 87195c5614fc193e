//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::display::account::format_account_list;
use crate::error::{FinplanError, FinplanResult};
use crate::models::{AccountType, NewAccount};
use crate::provider::{FinanceProvider, LocalProvider};
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (cash, savings, bank, credit_card, other)
        #[arg(short = 't', long, default_value = "cash")]
        account_type: String,
        /// Statement due day (credit cards)
        #[arg(short, long)]
        due: Option<u32>,
    },
    /// List all accounts
    List,
}

/// Handle an account command
pub fn handle_account_command(storage: &Storage, cmd: AccountCommands) -> FinplanResult<()> {
    let provider = LocalProvider::new(storage);

    match cmd {
        AccountCommands::Create {
            name,
            account_type,
            due,
        } => {
            let account_type = AccountType::parse(&account_type).ok_or_else(|| {
                FinplanError::Validation(format!(
                    "Invalid account type: '{}'. Valid types: cash, savings, bank, credit_card, other",
                    account_type
                ))
            })?;

            let new_account = NewAccount {
                due_date: due,
                ..NewAccount::new(name, account_type)
            };
            let account = provider.create_account(&new_account)?;

            println!("Created account: {}", account.name);
            println!("  Type: {}", account.account_type);
            if let Some(day) = account.due_date {
                println!("  Due:  day {}", day);
            }
            println!("  ID: {}", account.id);
        }

        AccountCommands::List => {
            print!("{}", format_account_list(&provider.list_accounts()?));
        }
    }

    Ok(())
}
