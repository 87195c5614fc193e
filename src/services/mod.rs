//! Service layer for finplan
//!
//! The service layer provides business logic on top of the data provider and
//! the key-value store: the food budget allocator, month summaries, month and
//! expense operations, cycle settings and the stored session.

pub mod allocator;
pub mod cycle;
pub mod expense;
pub mod food_stats;
pub mod month;
pub mod session;
pub mod summary;

pub use allocator::{allocate, BudgetPeriodConfig};
pub use cycle::{CycleSettingsService, CYCLE_SETTINGS_KEY};
pub use expense::ExpenseService;
pub use food_stats::{FoodStats, FoodStatsService};
pub use month::MonthService;
pub use session::{Credentials, SessionStore};
pub use summary::{ExpenseGroup, GroupKey, MonthSummary};
