//! Month display formatting
//!
//! Formats the month list and a month's grouped expenses.

use chrono::NaiveDate;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::services::summary::{can_delete_month, MonthSummary};

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    name: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "")]
    marker: String,
}

/// Format months as a table, marking today's month
pub fn format_month_list(summaries: &[MonthSummary], symbol: &str, today: NaiveDate) -> String {
    if summaries.is_empty() {
        return "No months planned yet. Run 'finplan month create' to start one.".to_string();
    }

    let current_name = today.format("%B %Y").to_string();
    let rows: Vec<MonthRow> = summaries
        .iter()
        .map(|s| MonthRow {
            id: s.month.id.to_string(),
            name: s.month.name.clone(),
            income: s.month.total_income.format_with_symbol(symbol),
            expenses: s.total_expenses.format_with_symbol(symbol),
            remaining: s.remaining.format_with_symbol(symbol),
            marker: if s.month.name == current_name {
                "current".to_string()
            } else {
                String::new()
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(2..5)).with(Alignment::right()));
    format!("{}\n", table)
}

/// Format a month with its expenses grouped by category
pub fn format_month_summary(summary: &MonthSummary, symbol: &str, today: NaiveDate) -> String {
    let month = &summary.month;
    let mut output = String::new();

    output.push_str(&format!("{} (#{})\n", month.name, month.id));
    output.push_str(&format!(
        "  Income:    {:>14}\n",
        month.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Expenses:  {:>14}\n",
        summary.total_expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Remaining: {:>14}\n",
        summary.remaining.format_with_symbol(symbol)
    ));
    if can_delete_month(month, today) {
        output.push_str("  (future month, can be deleted)\n");
    }

    if summary.groups.is_empty() {
        output.push_str("\nNo expenses yet.\n");
        return output;
    }

    let note_width = summary
        .groups
        .iter()
        .flat_map(|g| g.expenses.iter())
        .map(|e| e.note.as_deref().unwrap_or("").len())
        .max()
        .unwrap_or(0)
        .max(4);

    for group in &summary.groups {
        let income_marker = match &group.category {
            Some(c) if c.is_income() => " [income]",
            _ => "",
        };
        let paid_marker = if group.all_paid { "  ✓ all paid" } else { "" };

        output.push('\n');
        output.push_str(&format!(
            "{}{}  {}{}\n",
            group.name(),
            income_marker,
            group.total.format_with_symbol(symbol),
            paid_marker
        ));

        if group.expenses.is_empty() {
            output.push_str("  (no expenses)\n");
            continue;
        }

        for expense in &group.expenses {
            let status = if expense.status.is_paid() { "[x]" } else { "[ ]" };
            output.push_str(&format!(
                "  {} #{:<5} {:>12}  {:<note_width$}  {}\n",
                status,
                expense.id.to_string(),
                expense.amount.format_with_symbol(symbol),
                expense.note.as_deref().unwrap_or(""),
                expense.account_name(),
                note_width = note_width,
            ));
        }
    }

    output
}
