//! Account model
//!
//! Represents where an expense is paid from (cash, savings, credit cards, etc.)

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Credit card
    CreditCard,
    /// Cash/wallet
    #[default]
    Cash,
    /// Savings account
    Savings,
    /// Bank (checking) account
    Bank,
    /// Anything the provider reports that we don't know about
    #[serde(other)]
    Other,
}

impl AccountType {
    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "credit_card" | "creditcard" | "credit" | "card" => Some(Self::CreditCard),
            "cash" => Some(Self::Cash),
            "savings" | "saving" => Some(Self::Savings),
            "bank" | "checking" => Some(Self::Bank),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn is_credit_card(&self) -> bool {
        matches!(self, Self::CreditCard)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreditCard => write!(f, "Credit Card"),
            Self::Cash => write!(f, "Cash"),
            Self::Savings => write!(f, "Savings"),
            Self::Bank => write!(f, "Bank"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// An account expenses are paid from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,

    pub name: String,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Statement due day of month, for credit cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<u32>,
}

impl Account {
    pub fn new(id: AccountId, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id,
            name: name.into(),
            account_type,
            due_date: None,
        }
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if let Some(day) = self.due_date {
            if !(1..=31).contains(&day) {
                return Err(AccountValidationError::InvalidDueDate(day));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Payload for creating an account
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<u32>,
}

impl NewAccount {
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            name: name.into(),
            account_type,
            due_date: None,
        }
    }

    /// The account this payload describes, once the provider picked an id
    pub fn into_account(self, id: AccountId) -> Account {
        Account {
            id,
            name: self.name.trim().to_string(),
            account_type: self.account_type,
            due_date: self.due_date,
        }
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    InvalidDueDate(u32),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::InvalidDueDate(day) => {
                write!(f, "Due date must be a day of month (1-31), got {}", day)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
