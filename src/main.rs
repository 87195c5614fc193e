use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use finplan::cli::{
    handle_account_command, handle_category_command, handle_expense_command, handle_food_command,
    handle_month_command, handle_session_command,
};
use finplan::config::{paths::FinplanPaths, settings::Settings};
use finplan::logging::init_tracing;
use finplan::storage::{JsonFileStore, Storage};

#[derive(Parser)]
#[command(
    name = "finplan",
    version,
    about = "Terminal personal-finance planner",
    long_about = "finplan plans monthly budgets from the command line: record income and \
                  expenses per category and account, tick off what has been paid, and \
                  see how a month's food budget spreads over its weeks."
)]
struct Cli {
    /// Date to treat as today (YYYY-MM-DD)
    #[arg(long, global = true, env = "FINPLAN_TODAY", hide = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data files with the default categories and accounts
    Init,

    /// Show current configuration and paths
    Config,

    /// Month plan commands
    #[command(subcommand)]
    Month(finplan::cli::MonthCommands),

    /// Expense commands
    #[command(subcommand, alias = "ex")]
    Expense(finplan::cli::ExpenseCommands),

    /// Category commands
    #[command(subcommand)]
    Category(finplan::cli::CategoryCommands),

    /// Account commands
    #[command(subcommand)]
    Account(finplan::cli::AccountCommands),

    /// Show the food budget breakdown of a month
    Food(finplan::cli::FoodArgs),

    /// Session token commands
    #[command(subcommand)]
    Session(finplan::cli::SessionCommands),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let paths = FinplanPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing finplan at: {}", paths.base_dir().display());
            finplan::storage::init::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default categories and accounts have been created.");
            println!("Run 'finplan category list' to see the category template.");
            println!("Run 'finplan month create' to plan next month.");
        }
        Some(Commands::Config) => {
            println!("finplan Configuration");
            println!("=====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Budget category: {}", settings.budget_category);
            println!(
                "  Default income:  {}",
                settings.default_income.format_with_symbol(&settings.currency_symbol)
            );
        }
        Some(Commands::Session(cmd)) => {
            let store = JsonFileStore::open(paths.store_file())?;
            handle_session_command(&store, cmd)?;
        }
        Some(command) => {
            if !paths.is_initialized() {
                bail!("finplan is not initialized. Run 'finplan init' first.");
            }

            let mut storage = Storage::new(paths.clone())?;
            storage.load_all()?;

            match command {
                Commands::Month(cmd) => handle_month_command(&storage, &settings, today, cmd)?,
                Commands::Expense(cmd) => {
                    handle_expense_command(&storage, &settings, today, cmd)?
                }
                Commands::Category(cmd) => handle_category_command(&storage, &settings, cmd)?,
                Commands::Account(cmd) => handle_account_command(&storage, cmd)?,
                Commands::Food(args) => {
                    let store = JsonFileStore::open(paths.store_file())?;
                    handle_food_command(&storage, &store, &settings, today, args)?
                }
                Commands::Init | Commands::Config | Commands::Session(_) => {}
            }
        }
        None => {
            println!("finplan - Terminal personal-finance planner");
            println!();
            println!("Run 'finplan --help' for usage information.");
            println!("Run 'finplan init' to get started.");
        }
    }

    Ok(())
}
