//! Food budget breakdown display
//!
//! One row per block, a marker on the current block and a progress bar.

use crate::models::{AllocationResult, Money};
use crate::services::food_stats::FoodStats;

const PROGRESS_WIDTH: usize = 30;

/// Progress bar for a 0-100 percentage
pub fn progress_bar(percent: f64, width: usize) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:>5.1}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        percent
    )
}

fn block_marker(allocation: &AllocationResult, index: usize) -> &'static str {
    let block = &allocation.blocks()[index];
    if block.is_current() {
        "▶"
    } else if block.is_past() {
        "✓"
    } else {
        " "
    }
}

/// Format the breakdown of a month's food budget
pub fn format_food_stats(stats: &FoodStats, symbol: &str) -> String {
    let allocation = &stats.allocation;
    let money = |value: f64| Money::from_f64(value).format_with_symbol(symbol);

    let mut output = String::new();
    output.push_str(&format!(
        "{} budget for {}: {}\n",
        stats.category_name,
        stats.month_name,
        stats.budget.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Cycle: {} ({}, {} days)\n",
        stats.cycle,
        allocation.range(),
        allocation.range().total_days()
    ));
    output.push_str(&format!("Daily budget: {}\n\n", money(allocation.daily_budget())));

    let label_width = allocation
        .blocks()
        .iter()
        .map(|b| b.range_label().chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    output.push_str(&format!(
        "   {:<label_width$}  {:>4}  {:>12}  {:>12}\n",
        "Block",
        "Days",
        "Budget",
        "Left after",
        label_width = label_width,
    ));
    output.push_str(&format!(
        "   {:-<label_width$}  {:->4}  {:->12}  {:->12}\n",
        "",
        "",
        "",
        "",
        label_width = label_width,
    ));

    for (index, block) in allocation.blocks().iter().enumerate() {
        output.push_str(&format!(
            "{}  {:<label_width$}  {:>4}  {:>12}  {:>12}\n",
            block_marker(allocation, index),
            block.range_label(),
            block.day_count(),
            money(block.block_budget()),
            money(block.cumulative_remainder()),
            label_width = label_width,
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "Progress {}\n",
        progress_bar(allocation.progress_percent(), PROGRESS_WIDTH)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CycleSettings;
    use crate::services::allocator::{allocate, BudgetPeriodConfig};
    use chrono::NaiveDate;

    fn stats(today: NaiveDate) -> FoodStats {
        let config = BudgetPeriodConfig::new(3000.0, "June 2026", CycleSettings::calendar());
        FoodStats {
            month_name: "June 2026".into(),
            category_name: "Food".into(),
            budget: Money::from_major(3000),
            cycle: CycleSettings::calendar(),
            allocation: allocate(&config, today).unwrap(),
        }
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 4), "[░░░░]   0.0%");
        assert_eq!(progress_bar(100.0, 4), "[████] 100.0%");
        assert_eq!(progress_bar(150.0, 4), "[████] 100.0%");
        assert_eq!(progress_bar(50.0, 4), "[██░░]  50.0%");
    }

    #[test]
    fn test_food_stats_rows() {
        let output = format_food_stats(&stats(NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()), "$");

        assert!(output.contains("Food budget for June 2026: $3,000.00"));
        assert!(output.contains("Daily budget: $100.00"));

        let first = output.lines().find(|l| l.contains("1 Jun - 7 Jun")).unwrap();
        assert!(first.starts_with('✓'));
        assert!(first.contains("$700.00"));
        assert!(first.contains("$2,300.00"));

        let current = output.lines().find(|l| l.contains("8 Jun - 14 Jun")).unwrap();
        assert!(current.starts_with('▶'));

        let last = output.lines().find(|l| l.contains("29 Jun - 30 Jun")).unwrap();
        assert!(last.starts_with(' '));
        assert!(last.contains("$0.00"));
    }

    #[test]
    fn test_no_current_marker_outside_cycle() {
        let output = format_food_stats(&stats(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()), "$");
        assert!(!output.contains('▶'));
        assert!(output.contains("100.0%"));
    }
}
