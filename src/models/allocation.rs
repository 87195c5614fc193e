//! Food budget breakdown results
//!
//! A breakdown splits a cycle into week-aligned spending blocks, each with a
//! prorated share of the budget. Blocks are only built by
//! [`crate::services::allocator`] and are read-only afterwards.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::cycle::CycleRange;
use crate::error::AllocationError;

/// A contiguous run of days ending on a Sunday or on the last day of the cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingBlock {
    range_label: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    day_count: u32,
    block_budget: f64,
    cumulative_remainder: f64,
    is_current: bool,
    is_past: bool,
}

impl SpendingBlock {
    pub(crate) fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        day_count: u32,
        block_budget: f64,
        cumulative_remainder: f64,
        today: NaiveDate,
    ) -> Self {
        Self {
            range_label: format!(
                "{} - {}",
                start_date.format("%-d %b"),
                end_date.format("%-d %b")
            ),
            start_date,
            end_date,
            day_count,
            block_budget,
            cumulative_remainder,
            is_current: today >= start_date && today <= end_date,
            is_past: end_date < today,
        }
    }

    /// "26 Jan - 1 Feb"
    pub fn range_label(&self) -> &str {
        &self.range_label
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of days in the block, 1-7
    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    /// Share of the budget for this block
    pub fn block_budget(&self) -> f64 {
        self.block_budget
    }

    /// Budget left once this block's share is spent
    pub fn cumulative_remainder(&self) -> f64 {
        self.cumulative_remainder
    }

    pub fn is_current(&self) -> bool {
        self.is_current
    }

    pub fn is_past(&self) -> bool {
        self.is_past
    }

    pub fn start_day_of_month(&self) -> u32 {
        self.start_date.day()
    }

    pub fn end_day_of_month(&self) -> u32 {
        self.end_date.day()
    }
}

/// The full breakdown of a budget over a cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    pub(crate) range_start: NaiveDate,
    pub(crate) range_end: NaiveDate,
    pub(crate) blocks: Vec<SpendingBlock>,
    pub(crate) total_budget: f64,
    pub(crate) daily_budget: f64,
    pub(crate) progress_percent: f64,
}

impl AllocationResult {
    pub fn blocks(&self) -> &[SpendingBlock] {
        &self.blocks
    }

    pub fn range(&self) -> CycleRange {
        CycleRange::new(self.range_start, self.range_end)
    }

    pub fn total_budget(&self) -> f64 {
        self.total_budget
    }

    pub fn daily_budget(&self) -> f64 {
        self.daily_budget
    }

    /// Block-weighted completion of the cycle, 0-100
    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    /// The block containing today, with its index
    ///
    /// Fails with [`AllocationError::NoCurrentBlock`] when today is outside the cycle.
    pub fn current_block(&self) -> Result<(usize, &SpendingBlock), AllocationError> {
        self.blocks
            .iter()
            .enumerate()
            .find(|(_, block)| block.is_current())
            .ok_or(AllocationError::NoCurrentBlock)
    }

    /// Sum of all block budgets
    pub fn allocated_total(&self) -> f64 {
        self.blocks.iter().map(SpendingBlock::block_budget).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_block_label_and_flags() {
        let block = SpendingBlock::new(
            date(2026, 1, 26),
            date(2026, 2, 1),
            7,
            700.0,
            2300.0,
            date(2026, 1, 28),
        );
        assert_eq!(block.range_label(), "26 Jan - 1 Feb");
        assert_eq!(block.start_day_of_month(), 26);
        assert_eq!(block.end_day_of_month(), 1);
        assert!(block.is_current());
        assert!(!block.is_past());
    }

    #[test]
    fn test_past_block() {
        let block = SpendingBlock::new(
            date(2026, 6, 1),
            date(2026, 6, 7),
            7,
            700.0,
            2300.0,
            date(2026, 6, 8),
        );
        assert!(block.is_past());
        assert!(!block.is_current());
    }

    #[test]
    fn test_no_current_block() {
        let result = AllocationResult {
            range_start: date(2026, 6, 1),
            range_end: date(2026, 6, 7),
            blocks: vec![SpendingBlock::new(
                date(2026, 6, 1),
                date(2026, 6, 7),
                7,
                70.0,
                0.0,
                date(2026, 7, 1),
            )],
            total_budget: 70.0,
            daily_budget: 10.0,
            progress_percent: 100.0,
        };
        assert_eq!(result.current_block().unwrap_err(), AllocationError::NoCurrentBlock);
        assert_eq!(result.range().total_days(), 7);
    }
}
