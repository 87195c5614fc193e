//! Category CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::category::format_category_list;
use crate::error::FinplanResult;
use crate::provider::{FinanceProvider, LocalProvider};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories with their template amounts
    List,
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> FinplanResult<()> {
    let provider = LocalProvider::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = provider.list_categories()?;
            print!(
                "{}",
                format_category_list(&categories, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}
