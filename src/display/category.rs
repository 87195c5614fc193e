//! Category display formatting

use crate::models::Category;

/// Format categories in display order with their template amounts
pub fn format_category_list(categories: &[Category], symbol: &str) -> String {
    if categories.is_empty() {
        return "No categories found. Run 'finplan init' first.".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<name_width$}  {:<7}  {:>12}  {:>5}\n",
        "ID",
        "Name",
        "Type",
        "Default",
        "Order",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:->4}  {:-<name_width$}  {:-<7}  {:->12}  {:->5}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for category in categories {
        let category_type = category.category_type.unwrap_or_default();
        output.push_str(&format!(
            "{:>4}  {:<name_width$}  {:<7}  {:>12}  {:>5}\n",
            category.id.to_string(),
            category.name,
            category_type.to_string(),
            category.default_amount.format_with_symbol(symbol),
            category.sort_key(),
            name_width = name_width,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType, Money};

    #[test]
    fn test_category_rows() {
        let output = format_category_list(
            &[
                Category::new(CategoryId::new(1), "Food")
                    .with_default_amount(Money::from_major(6_000))
                    .with_seq_no(2),
                Category::new(CategoryId::new(2), "Charge Others").with_type(CategoryType::Income),
            ],
            "$",
        );

        let food = output.lines().find(|l| l.contains("Food")).unwrap();
        assert!(food.contains("$6,000.00"));
        assert!(food.contains("Expense"));
        let income = output.lines().find(|l| l.contains("Charge Others")).unwrap();
        assert!(income.contains("Income"));
        assert!(income.trim_end().ends_with("99"));
    }
}
