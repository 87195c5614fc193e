//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display:
//! tables, grouped month views and the food budget breakdown.

pub mod account;
pub mod category;
pub mod food;
pub mod month;

pub use account::format_account_list;
pub use category::format_category_list;
pub use food::{format_food_stats, progress_bar};
pub use month::{format_month_list, format_month_summary};
