//! finplan - Terminal personal-finance planner
//!
//! This library provides the core of the finplan application: monthly plans
//! with income and expenses, grouped by category and paid from accounts, and
//! the food budget breakdown that spreads a month's food budget over
//! week-aligned blocks.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (months, expenses, categories, cycles, etc.)
//! - `storage`: JSON file storage and the key-value store
//! - `provider`: The month/expense data provider
//! - `services`: Business logic layer, including the budget allocator
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use finplan::models::CycleSettings;
//! use finplan::services::{allocate, BudgetPeriodConfig};
//!
//! let config = BudgetPeriodConfig::new(3000.0, "June 2026", CycleSettings::calendar());
//! let today = NaiveDate::from_ymd_opt(2026, 6, 10).unwrap();
//! let result = allocate(&config, today).unwrap();
//! assert_eq!(result.blocks()[0].block_budget(), 700.0);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod provider;
pub mod services;
pub mod storage;

pub use error::{FinplanError, FinplanResult};
