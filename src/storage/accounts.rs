//! Account repository for JSON storage
//!
//! Manages loading and saving accounts to accounts.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::FinplanError;
use crate::models::{Account, AccountId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable account data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct AccountData {
    pub accounts: Vec<Account>,
}

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<HashMap<AccountId, Account>>,
}

fn read_lock_error(e: impl std::fmt::Display) -> FinplanError {
    FinplanError::Storage(format!("Failed to acquire read lock: {}", e))
}

fn write_lock_error(e: impl std::fmt::Display) -> FinplanError {
    FinplanError::Storage(format!("Failed to acquire write lock: {}", e))
}

impl AccountRepository {
    /// Create a new account repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load accounts from disk
    pub fn load(&self) -> Result<(), FinplanError> {
        let file_data: AccountData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(write_lock_error)?;

        data.clear();
        for account in file_data.accounts {
            data.insert(account.id, account);
        }

        Ok(())
    }

    /// Save accounts to disk
    pub fn save(&self) -> Result<(), FinplanError> {
        let accounts = self.get_all()?;
        write_json_atomic(&self.path, &AccountData { accounts })
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> Result<Option<Account>, FinplanError> {
        let data = self.data.read().map_err(read_lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all accounts, ordered by name
    pub fn get_all(&self) -> Result<Vec<Account>, FinplanError> {
        let data = self.data.read().map_err(read_lock_error)?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(accounts)
    }

    /// Get an account by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Account>, FinplanError> {
        let data = self.data.read().map_err(read_lock_error)?;

        let name = name.trim();
        Ok(data
            .values()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Insert or update an account
    pub fn upsert(&self, account: Account) -> Result<(), FinplanError> {
        let mut data = self.data.write().map_err(write_lock_error)?;
        data.insert(account.id, account);
        Ok(())
    }

    /// The id a new account would get
    pub fn next_id(&self) -> Result<AccountId, FinplanError> {
        let data = self.data.read().map_err(read_lock_error)?;
        Ok(data
            .keys()
            .max()
            .map(AccountId::next)
            .unwrap_or(AccountId::new(1)))
    }

    /// Check if an account name is already taken
    pub fn name_exists(&self, name: &str) -> Result<bool, FinplanError> {
        Ok(self.get_by_name(name)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, AccountRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = AccountRepository::new(temp_dir.path().join("accounts.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert!(repo.get_all().unwrap().is_empty());
        assert_eq!(repo.next_id().unwrap(), AccountId::new(1));
    }

    #[test]
    fn test_upsert_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let mut card = Account::new(AccountId::new(2), "KTC Visa", AccountType::CreditCard);
        card.due_date = Some(25);
        repo.upsert(card.clone()).unwrap();
        repo.upsert(Account::new(AccountId::new(1), "Cash", AccountType::Cash))
            .unwrap();
        repo.save().unwrap();

        let reloaded = AccountRepository::new(temp_dir.path().join("accounts.json"));
        reloaded.load().unwrap();

        assert_eq!(reloaded.get(AccountId::new(2)).unwrap(), Some(card));
        let names: Vec<_> = reloaded
            .get_all()
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Cash", "KTC Visa"]);
        assert!(reloaded.name_exists("ktc visa").unwrap());
        assert_eq!(reloaded.next_id().unwrap(), AccountId::new(3));
    }
}
