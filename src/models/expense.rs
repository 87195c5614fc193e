//! Expense model
//!
//! An expense is a planned or actual payment inside a month plan. It may be
//! attached to a category and to the account it is paid from, and is either
//! paid or still outstanding.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::Account;
use super::category::Category;
use super::ids::{AccountId, CategoryId, ExpenseId, MonthId};
use super::money::Money;

/// Payment status of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExpenseStatus {
    #[default]
    Unpaid,
    Paid,
}

impl ExpenseStatus {
    /// The opposite status
    pub fn toggled(self) -> Self {
        match self {
            Self::Paid => Self::Unpaid,
            Self::Unpaid => Self::Paid,
        }
    }

    pub fn is_paid(self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paid => write!(f, "Paid"),
            Self::Unpaid => write!(f, "Unpaid"),
        }
    }
}

/// An expense within a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,

    pub amount: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(default)]
    pub status: ExpenseStatus,

    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Resolved category, present when fetched as part of a month's detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    #[serde(default)]
    pub account_id: Option<AccountId>,

    /// Resolved account, present when fetched as part of a month's detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
}

impl Expense {
    /// Whether the expense counts toward spending (INCOME categories don't)
    pub fn counts_as_spending(&self) -> bool {
        !self
            .category
            .as_ref()
            .map(Category::is_income)
            .unwrap_or(false)
    }

    /// Name of the paying account, empty when unassigned
    pub fn account_name(&self) -> &str {
        self.account.as_ref().map(|a| a.name.as_str()).unwrap_or("")
    }

    /// Strip the resolved relations, keeping only the ids
    pub fn detached(mut self) -> Self {
        self.category = None;
        self.account = None;
        self
    }
}

/// Payload for creating an expense
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub month_id: MonthId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: ExpenseStatus,
    pub account_id: Option<AccountId>,
}

impl NewExpense {
    pub fn new(month_id: MonthId, amount: Money) -> Self {
        Self {
            month_id,
            category_id: None,
            amount,
            note: None,
            status: ExpenseStatus::Unpaid,
            account_id: None,
        }
    }

    /// Validate the payload before it is sent
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

/// Partial update for an expense; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExpenseStatus>,
    /// `Some(None)` clears the account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Option<AccountId>>,
}

impl ExpenseUpdate {
    /// An update that only changes the status
    pub fn status(status: ExpenseStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.note.is_none()
            && self.status.is_none()
            && self.account_id.is_none()
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        match self.amount {
            Some(amount) if !amount.is_positive() => {
                Err(ExpenseValidationError::NonPositiveAmount)
            }
            _ => Ok(()),
        }
    }

    /// Apply the update to an expense record
    pub fn apply_to(&self, expense: &mut Expense) {
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(note) = &self.note {
            expense.note = if note.is_empty() {
                None
            } else {
                Some(note.clone())
            };
        }
        if let Some(status) = self.status {
            expense.status = status;
        }
        if let Some(account_id) = self.account_id {
            expense.account_id = account_id;
        }
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Expense amount must be greater than zero"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
