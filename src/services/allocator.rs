//! Budget period allocator
//!
//! Spreads a budget evenly over the days of a cycle and cuts the cycle into
//! blocks that end on Sundays, so each block lines up with a calendar week
//! row. The first block may be shorter (the cycle starts mid-week) and so may
//! the last (the cycle ends mid-week).
//!
//! Progress is weighted by block rather than by day: each block counts as one
//! row regardless of how many days it holds, and today's position is a
//! fraction of its own block.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::debug;

use crate::error::AllocationError;
use crate::models::{AllocationResult, CalendarMonth, CycleRange, CycleSettings, SpendingBlock};

/// Day that closes a block
pub const WEEK_BOUNDARY: Weekday = Weekday::Sun;

/// Inputs of a breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetPeriodConfig {
    /// Budget to spread; must be positive
    pub total_budget: f64,
    /// Month plan name the cycle is anchored to, e.g. "December 2025"
    pub reference_month_name: String,
    pub cycle: CycleSettings,
}

impl BudgetPeriodConfig {
    pub fn new(total_budget: f64, reference_month_name: impl Into<String>, cycle: CycleSettings) -> Self {
        Self {
            total_budget,
            reference_month_name: reference_month_name.into(),
            cycle,
        }
    }
}

/// Compute the breakdown of `config` as seen on `today`
pub fn allocate(
    config: &BudgetPeriodConfig,
    today: NaiveDate,
) -> Result<AllocationResult, AllocationError> {
    let total_budget = config.total_budget;
    if total_budget.is_nan() || total_budget <= 0.0 {
        return Err(AllocationError::InvalidBudget);
    }

    let unparseable = || AllocationError::UnparseableDate(config.reference_month_name.clone());
    let month = CalendarMonth::parse(&config.reference_month_name).map_err(|_| unparseable())?;
    let range = CycleRange::resolve(month, &config.cycle).ok_or_else(unparseable)?;

    let total_days = range.total_days();
    let daily_budget = total_budget / f64::from(total_days);
    debug!(%range, total_days, daily_budget, "allocating budget over cycle");

    let blocks = split_into_blocks(&range, total_budget, daily_budget, today);
    let progress_percent = progress_percent(&blocks, &range, today);

    Ok(AllocationResult {
        range_start: range.start(),
        range_end: range.end(),
        blocks,
        total_budget,
        daily_budget,
        progress_percent,
    })
}

fn split_into_blocks(
    range: &CycleRange,
    total_budget: f64,
    daily_budget: f64,
    today: NaiveDate,
) -> Vec<SpendingBlock> {
    let mut blocks = Vec::new();
    let mut open_days: u32 = 0;
    let mut accumulated = 0.0;

    for day in range.days() {
        open_days += 1;

        if day.weekday() == WEEK_BOUNDARY || day == range.end() {
            let start = day - Duration::days(i64::from(open_days) - 1);
            let block_budget = daily_budget * f64::from(open_days);
            accumulated += block_budget;

            blocks.push(SpendingBlock::new(
                start,
                day,
                open_days,
                block_budget,
                total_budget - accumulated,
                today,
            ));
            open_days = 0;
        }
    }

    blocks
}

fn progress_percent(blocks: &[SpendingBlock], range: &CycleRange, today: NaiveDate) -> f64 {
    if today < range.start() {
        return 0.0;
    }
    if today > range.end() {
        return 100.0;
    }

    let Some(index) = blocks.iter().position(SpendingBlock::is_current) else {
        return 0.0;
    };

    let block = &blocks[index];
    let days_before: i64 = blocks[..index]
        .iter()
        .map(|b| i64::from(b.day_count()))
        .sum();
    let days_since_start = (today - range.start()).num_days();
    let days_into_block = days_since_start - days_before;

    let fraction = (days_into_block + 1) as f64 / f64::from(block.day_count());
    let visual_index = index as f64 + fraction;
    visual_index / blocks.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar(budget: f64, month: &str) -> BudgetPeriodConfig {
        BudgetPeriodConfig::new(budget, month, CycleSettings::calendar())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Every month of 2025-2026 under a mix of cycle settings
    fn sample_configs() -> Vec<BudgetPeriodConfig> {
        let cycles = [
            CycleSettings::calendar(),
            CycleSettings::starting_on(1, 0),
            CycleSettings::starting_on(15, 0),
            CycleSettings::starting_on(25, -1),
            CycleSettings::starting_on(31, 0),
            CycleSettings::starting_on(30, 1),
        ];
        let mut configs = Vec::new();
        for year in [2025, 2026] {
            for m in 1..=12 {
                let name = CalendarMonth::new(year, m).unwrap().to_string();
                for (i, cycle) in cycles.iter().enumerate() {
                    let budget = 1234.56 * (i as f64 + 1.0);
                    configs.push(BudgetPeriodConfig::new(budget, name.clone(), *cycle));
                }
            }
        }
        configs
    }

    #[test]
    fn test_thirty_day_month_starting_monday() {
        // June 2026 starts on a Monday and has 30 days
        let result = allocate(&calendar(3000.0, "June 2026"), date(2026, 5, 1)).unwrap();

        assert!(approx(result.daily_budget(), 100.0));
        let blocks = result.blocks();
        assert_eq!(blocks.len(), 5);

        assert_eq!(blocks[0].start_date(), date(2026, 6, 1));
        assert_eq!(blocks[0].end_date(), date(2026, 6, 7));
        assert_eq!(blocks[0].day_count(), 7);
        assert!(approx(blocks[0].block_budget(), 700.0));
        assert!(approx(blocks[0].cumulative_remainder(), 2300.0));
        assert_eq!(blocks[0].range_label(), "1 Jun - 7 Jun");

        let last = &blocks[4];
        assert_eq!(last.start_date(), date(2026, 6, 29));
        assert_eq!(last.end_date(), date(2026, 6, 30));
        assert_eq!(last.day_count(), 2);
        assert!(approx(last.block_budget(), 200.0));
        assert!(last.cumulative_remainder().abs() < 1e-9);
    }

    #[test]
    fn test_custom_start_day_spans_thirty_days() {
        // 15 Feb 2026 is a Sunday: a one-day first block
        let config = BudgetPeriodConfig::new(1000.0, "February 2026", CycleSettings::starting_on(15, 0));
        let result = allocate(&config, date(2026, 1, 1)).unwrap();

        let range = result.range();
        assert_eq!(range.start(), date(2026, 2, 15));
        assert_eq!(range.end(), date(2026, 3, 16));
        assert_eq!(range.total_days(), 30);

        let days: Vec<u32> = result.blocks().iter().map(|b| b.day_count()).collect();
        assert_eq!(days, vec![1, 7, 7, 7, 7, 1]);
        assert!(approx(result.daily_budget(), 1000.0 / 30.0));
    }

    #[test]
    fn test_start_day_rolls_into_next_month() {
        let config = BudgetPeriodConfig::new(900.0, "February 2026", CycleSettings::starting_on(30, 0));
        let result = allocate(&config, date(2026, 3, 1)).unwrap();
        assert_eq!(result.range().start(), date(2026, 3, 2));
        assert_eq!(result.range().end(), date(2026, 3, 31));
    }

    #[test]
    fn test_previous_month_offset() {
        let config = BudgetPeriodConfig::new(600.0, "January 2026", CycleSettings::starting_on(25, -1));
        let result = allocate(&config, date(2026, 1, 1)).unwrap();
        assert_eq!(result.range().start(), date(2025, 12, 25));
        assert_eq!(result.blocks()[0].range_label(), "25 Dec - 28 Dec");
    }

    #[test]
    fn test_zero_budget_is_rejected() {
        assert_eq!(
            allocate(&calendar(0.0, "June 2026"), date(2026, 6, 1)),
            Err(AllocationError::InvalidBudget)
        );
        assert_eq!(
            allocate(&calendar(-5.0, "June 2026"), date(2026, 6, 1)),
            Err(AllocationError::InvalidBudget)
        );
        assert_eq!(
            allocate(&calendar(f64::NAN, "June 2026"), date(2026, 6, 1)),
            Err(AllocationError::InvalidBudget)
        );
    }

    #[test]
    fn test_unparseable_month() {
        assert_eq!(
            allocate(&calendar(100.0, "Someday"), date(2026, 6, 1)),
            Err(AllocationError::UnparseableDate("Someday".into()))
        );
    }

    #[test]
    fn test_year_past_date_range_is_unparseable() {
        for name in ["December 262142", "June 300000"] {
            assert_eq!(
                allocate(&calendar(3000.0, name), date(2026, 6, 10)),
                Err(AllocationError::UnparseableDate(name.into()))
            );
            assert_eq!(
                allocate(
                    &BudgetPeriodConfig::new(3000.0, name, CycleSettings::starting_on(15, 0)),
                    date(2026, 6, 10)
                ),
                Err(AllocationError::UnparseableDate(name.into()))
            );
        }
    }

    #[test]
    fn test_block_budgets_sum_to_total() {
        for config in sample_configs() {
            let result = allocate(&config, date(2026, 3, 10)).unwrap();
            let total = config.total_budget;
            assert!(
                ((result.allocated_total() - total) / total).abs() < 1e-6,
                "{:?}",
                config
            );
            let last = result.blocks().last().unwrap();
            assert!(last.cumulative_remainder().abs() < 1e-6 * total);
        }
    }

    #[test]
    fn test_inner_blocks_are_full_weeks() {
        for config in sample_configs() {
            let result = allocate(&config, date(2026, 3, 10)).unwrap();
            let blocks = result.blocks();
            for block in &blocks[1..blocks.len().saturating_sub(1)] {
                assert_eq!(block.day_count(), 7, "{:?}", config);
                assert_eq!(block.end_date().weekday(), Weekday::Sun);
            }
            for block in blocks {
                assert!((1..=7).contains(&block.day_count()));
            }
        }
    }

    #[test]
    fn test_blocks_are_contiguous_and_cover_range() {
        for config in sample_configs() {
            let result = allocate(&config, date(2026, 3, 10)).unwrap();
            let blocks = result.blocks();
            let range = result.range();

            assert_eq!(blocks[0].start_date(), range.start());
            assert_eq!(blocks.last().unwrap().end_date(), range.end());
            for pair in blocks.windows(2) {
                assert_eq!(pair[0].end_date() + Duration::days(1), pair[1].start_date());
            }

            let days: u32 = blocks.iter().map(|b| b.day_count()).sum();
            assert_eq!(days, range.total_days());
        }
    }

    #[test]
    fn test_remainder_decreases() {
        let result = allocate(&calendar(3100.0, "March 2026"), date(2026, 3, 1)).unwrap();
        for pair in result.blocks().windows(2) {
            assert!(pair[1].cumulative_remainder() < pair[0].cumulative_remainder());
        }
    }

    #[test]
    fn test_at_most_one_current_block() {
        let config = BudgetPeriodConfig::new(500.0, "January 2026", CycleSettings::starting_on(25, -1));
        let mut today = date(2025, 12, 20);
        while today <= date(2026, 1, 30) {
            let result = allocate(&config, today).unwrap();
            let current = result.blocks().iter().filter(|b| b.is_current()).count();
            let expected = usize::from(result.range().contains(today));
            assert_eq!(current, expected, "{}", today);
            today += Duration::days(1);
        }
    }

    #[test]
    fn test_past_flags() {
        let result = allocate(&calendar(3000.0, "June 2026"), date(2026, 6, 10)).unwrap();
        let flags: Vec<(bool, bool)> = result
            .blocks()
            .iter()
            .map(|b| (b.is_past(), b.is_current()))
            .collect();
        assert_eq!(
            flags,
            vec![
                (true, false),
                (false, true),
                (false, false),
                (false, false),
                (false, false)
            ]
        );
    }

    #[test]
    fn test_progress_values() {
        let config = calendar(3000.0, "June 2026");
        let progress = |d: NaiveDate| allocate(&config, d).unwrap().progress_percent();

        assert_eq!(progress(date(2026, 5, 31)), 0.0);
        assert_eq!(progress(date(2026, 7, 1)), 100.0);
        assert!(approx(progress(date(2026, 6, 1)), (1.0 / 7.0) / 5.0 * 100.0));
        // Wednesday of the second week: 3 days into a 7-day block
        assert!(approx(progress(date(2026, 6, 10)), (1.0 + 3.0 / 7.0) / 5.0 * 100.0));
        assert!(approx(progress(date(2026, 6, 30)), 100.0));
    }

    #[test]
    fn test_progress_is_monotonic() {
        for config in sample_configs().into_iter().step_by(5) {
            let first = allocate(&config, date(2000, 1, 1)).unwrap();
            let range = first.range();
            assert_eq!(first.progress_percent(), 0.0);

            let mut previous = 0.0;
            let mut today = range.start() - Duration::days(3);
            while today <= range.end() + Duration::days(3) {
                let progress = allocate(&config, today).unwrap().progress_percent();
                assert!(progress >= previous, "{:?} on {}", config, today);
                assert!((0.0..=100.0).contains(&progress));
                previous = progress;
                today += Duration::days(1);
            }
            assert_eq!(previous, 100.0);
        }
    }

    #[test]
    fn test_short_range_is_one_block() {
        // 1-3 June 2026 is Mon-Wed; a 3-day window can't reach Sunday
        let range = CycleRange::new(date(2026, 6, 1), date(2026, 6, 3));
        let blocks = split_into_blocks(&range, 30.0, 10.0, date(2026, 6, 2));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].day_count(), 3);
        assert!(approx(progress_percent(&blocks, &range, date(2026, 6, 2)), 200.0 / 3.0));
    }
}
