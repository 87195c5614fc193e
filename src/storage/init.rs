//! Storage initialization
//!
//! Handles first-run setup: the category template and a few starter accounts

use crate::config::paths::FinplanPaths;
use crate::error::FinplanError;
use crate::models::{Account, AccountId, AccountType, Category, CategoryId, CategoryType, Money};

use super::accounts::AccountData;
use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing category and account files are left alone.
pub fn initialize_storage(paths: &FinplanPaths) -> Result<(), FinplanError> {
    paths.ensure_directories()?;

    if !paths.categories_file().exists() {
        let data = CategoryData {
            categories: default_categories(),
        };
        write_json_atomic(paths.categories_file(), &data)?;
    }

    if !paths.accounts_file().exists() {
        let data = AccountData {
            accounts: default_accounts(),
        };
        write_json_atomic(paths.accounts_file(), &data)?;
    }

    Ok(())
}

/// Starter category template; default amounts pre-fill new months
fn default_categories() -> Vec<Category> {
    let template: [(&str, i64, CategoryType); 7] = [
        ("Rent", 8_000, CategoryType::Expense),
        ("Food", 6_000, CategoryType::Expense),
        ("Utilities", 1_500, CategoryType::Expense),
        ("Transportation", 1_200, CategoryType::Expense),
        ("KTC Credit Card", 0, CategoryType::Expense),
        ("Savings", 5_000, CategoryType::Expense),
        ("Charge Others", 0, CategoryType::Income),
    ];

    (1..)
        .zip(template)
        .map(|(seq, (name, amount, category_type))| {
            Category::new(CategoryId::new(i64::from(seq)), name)
                .with_type(category_type)
                .with_default_amount(Money::from_major(amount))
                .with_seq_no(seq)
        })
        .collect()
}

fn default_accounts() -> Vec<Account> {
    let mut card = Account::new(AccountId::new(3), "KTC Credit Card", AccountType::CreditCard);
    card.due_date = Some(25);

    vec![
        Account::new(AccountId::new(1), "Cash", AccountType::Cash),
        Account::new(AccountId::new(2), "Savings", AccountType::Savings),
        card,
    ]
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FinplanPaths) -> bool {
    !paths.categories_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinplanPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.categories_file().exists());
        assert!(paths.accounts_file().exists());
    }

    #[test]
    fn test_default_template() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinplanPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let content = std::fs::read_to_string(paths.categories_file()).unwrap();
        let data: CategoryData = serde_json::from_str(&content).unwrap();

        let food = data.categories.iter().find(|c| c.name == "Food").unwrap();
        assert_eq!(food.default_amount, Money::from_major(6_000));
        assert_eq!(food.id, CategoryId::new(2));
        assert_eq!(food.seq_no, Some(2));
        assert!(data.categories.iter().any(|c| c.is_income()));
        assert!(data.categories.iter().any(|c| c.is_credit_card()));

        let content = std::fs::read_to_string(paths.accounts_file()).unwrap();
        let data: AccountData = serde_json::from_str(&content).unwrap();
        assert!(data
            .accounts
            .iter()
            .any(|a| a.account_type.is_credit_card()));
    }

    #[test]
    fn test_initialize_keeps_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinplanPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.categories_file(), r#"{"categories": []}"#).unwrap();

        initialize_storage(&paths).unwrap();

        let content = std::fs::read_to_string(paths.categories_file()).unwrap();
        assert_eq!(content, r#"{"categories": []}"#);
    }
}
