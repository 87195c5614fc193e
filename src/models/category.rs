//! Category model
//!
//! Categories group a month's expenses. INCOME categories ("Charge Others")
//! are listed alongside expense categories but never count toward spending.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;

/// Sort position used for categories without an explicit sequence number
pub const DEFAULT_SEQ_NO: i32 = 99;

/// Whether a category records spending or money coming back in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryType {
    #[default]
    Expense,
    Income,
}

impl CategoryType {
    /// Parse category type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Some(Self::Expense),
            "income" => Some(Self::Income),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

/// A spending category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub category_type: Option<CategoryType>,

    /// Amount used when a new month is filled from the template
    #[serde(default)]
    pub default_amount: Money,

    /// Display order; lower comes first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq_no: Option<i32>,
}

impl Category {
    /// Create a new expense category
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category_type: Some(CategoryType::Expense),
            default_amount: Money::zero(),
            seq_no: None,
        }
    }

    /// Builder-style setter for the template amount
    pub fn with_default_amount(mut self, amount: Money) -> Self {
        self.default_amount = amount;
        self
    }

    /// Builder-style setter for the display order
    pub fn with_seq_no(mut self, seq_no: i32) -> Self {
        self.seq_no = Some(seq_no);
        self
    }

    /// Builder-style setter for the category type
    pub fn with_type(mut self, category_type: CategoryType) -> Self {
        self.category_type = Some(category_type);
        self
    }

    pub fn is_income(&self) -> bool {
        self.category_type == Some(CategoryType::Income)
    }

    /// Credit card repayment categories are paid from credit card accounts only
    pub fn is_credit_card(&self) -> bool {
        self.name.to_lowercase().contains("credit card")
    }

    /// Position used when ordering category groups
    pub fn sort_key(&self) -> i32 {
        self.seq_no.unwrap_or(DEFAULT_SEQ_NO)
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.default_amount.is_negative() {
            return Err(CategoryValidationError::NegativeDefaultAmount);
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NegativeDefaultAmount,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NegativeDefaultAmount => write!(f, "Default amount cannot be negative"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
