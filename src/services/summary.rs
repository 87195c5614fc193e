//! Month summary calculations
//!
//! Totals, category grouping and the small decisions the month views need
//! (which month to open, whether a month may be deleted, which accounts an
//! expense may be paid from).

use chrono::NaiveDate;

use crate::models::{
    Account, CalendarMonth, Category, CategoryId, Expense, Money, Month,
};

/// Sum of all expenses that count as spending
pub fn total_expenses(expenses: &[Expense]) -> Money {
    expenses
        .iter()
        .filter(|e| e.counts_as_spending())
        .map(|e| e.amount)
        .sum()
}

/// How a group of expenses is keyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Category(CategoryId),
    Uncategorized,
}

impl GroupKey {
    fn of(expense: &Expense) -> Self {
        expense
            .category_id
            .map(Self::Category)
            .unwrap_or(Self::Uncategorized)
    }
}

/// Expenses of one category within a month
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseGroup {
    pub key: GroupKey,
    pub category: Option<Category>,
    pub expenses: Vec<Expense>,
    /// Sum of every expense in the group, INCOME categories included
    pub total: Money,
    pub all_paid: bool,
}

impl ExpenseGroup {
    fn empty(key: GroupKey, category: Option<Category>) -> Self {
        Self {
            key,
            category,
            expenses: Vec::new(),
            total: Money::zero(),
            all_paid: false,
        }
    }

    fn push(&mut self, expense: Expense) {
        self.total += expense.amount;
        self.expenses.push(expense);
    }

    pub fn name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("Uncategorized")
    }

    fn sort_key(&self) -> i32 {
        self.category
            .as_ref()
            .map(Category::sort_key)
            .unwrap_or(crate::models::category::DEFAULT_SEQ_NO)
    }

    fn finish(mut self) -> Self {
        // stable, so equal account names keep their original order
        self.expenses
            .sort_by(|a, b| a.account_name().cmp(b.account_name()));
        self.all_paid =
            !self.expenses.is_empty() && self.expenses.iter().all(|e| e.status.is_paid());
        self
    }
}

fn finish_groups(groups: Vec<ExpenseGroup>) -> Vec<ExpenseGroup> {
    let mut groups: Vec<ExpenseGroup> = groups.into_iter().map(ExpenseGroup::finish).collect();
    groups.sort_by_key(ExpenseGroup::sort_key);
    groups
}

/// Group expenses by category, in first-seen order before sorting by seqNo
pub fn group_expenses(expenses: &[Expense]) -> Vec<ExpenseGroup> {
    let mut groups: Vec<ExpenseGroup> = Vec::new();

    for expense in expenses {
        let key = GroupKey::of(expense);
        let index = match groups.iter().position(|g| g.key == key) {
            Some(index) => index,
            None => {
                groups.push(ExpenseGroup::empty(key, expense.category.clone()));
                groups.len() - 1
            }
        };
        groups[index].push(expense.clone());
    }

    finish_groups(groups)
}

/// Group expenses with one group per known category, empty ones included
///
/// The uncategorized group only appears when it has expenses. Expenses whose
/// category isn't in `categories` are dropped.
pub fn group_expenses_by_category(
    expenses: &[Expense],
    categories: &[Category],
) -> Vec<ExpenseGroup> {
    let mut groups: Vec<ExpenseGroup> = categories
        .iter()
        .map(|c| ExpenseGroup::empty(GroupKey::Category(c.id), Some(c.clone())))
        .collect();
    groups.push(ExpenseGroup::empty(GroupKey::Uncategorized, None));

    for expense in expenses {
        let key = GroupKey::of(expense);
        if let Some(group) = groups.iter_mut().find(|g| g.key == key) {
            group.push(expense.clone());
        }
    }

    groups.retain(|g| g.category.is_some() || !g.expenses.is_empty());
    finish_groups(groups)
}

/// Totals and groups of a month
#[derive(Debug, Clone)]
pub struct MonthSummary {
    pub month: Month,
    pub total_expenses: Money,
    /// Income minus spending
    pub remaining: Money,
    pub groups: Vec<ExpenseGroup>,
}

impl MonthSummary {
    /// Summary grouped by the categories that have expenses
    pub fn new(month: Month) -> Self {
        let groups = group_expenses(month.expenses());
        Self::with_groups(month, groups)
    }

    /// Summary listing every category, including empty ones
    pub fn detailed(month: Month, categories: &[Category]) -> Self {
        let groups = group_expenses_by_category(month.expenses(), categories);
        Self::with_groups(month, groups)
    }

    fn with_groups(month: Month, groups: Vec<ExpenseGroup>) -> Self {
        let total_expenses = total_expenses(month.expenses());
        Self {
            remaining: month.total_income - total_expenses,
            total_expenses,
            month,
            groups,
        }
    }

    /// The group of a category, matched by name case-insensitively
    pub fn group_named(&self, name: &str) -> Option<&ExpenseGroup> {
        let name = name.trim();
        self.groups.iter().find(|g| {
            g.category
                .as_ref()
                .map(|c| c.name.eq_ignore_ascii_case(name))
                .unwrap_or(false)
        })
    }
}

/// The month named after today's month, else the first (newest) one
pub fn select_current_month(months: &[Month], today: NaiveDate) -> Option<&Month> {
    let current_name = today.format("%B %Y").to_string();
    months
        .iter()
        .find(|m| m.name == current_name)
        .or_else(|| months.first())
}

/// Only months strictly after today's month may be deleted
pub fn can_delete_month(month: &Month, today: NaiveDate) -> bool {
    match month.calendar_month() {
        Ok(calendar) => calendar > CalendarMonth::from_date(today),
        Err(_) => false,
    }
}

/// Accounts an expense of `category` may be paid from
///
/// Credit card repayments are paid from credit cards; everything else,
/// uncategorized expenses included, from the other accounts.
pub fn available_accounts<'a>(
    category: Option<&Category>,
    accounts: &'a [Account],
) -> Vec<&'a Account> {
    let wants_card = category.map(Category::is_credit_card).unwrap_or(false);
    accounts
        .iter()
        .filter(|a| a.account_type.is_credit_card() == wants_card)
        .collect()
}

/// The month offered by default when planning ahead: the one after today's
pub fn next_month_plan(today: NaiveDate) -> CalendarMonth {
    CalendarMonth::from_date(today).next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, AccountType, CategoryType, ExpenseId, ExpenseStatus, MonthId};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn food() -> Category {
        Category::new(CategoryId::new(1), "Food").with_seq_no(2)
    }

    fn rent() -> Category {
        Category::new(CategoryId::new(2), "Rent").with_seq_no(1)
    }

    fn charge_others() -> Category {
        Category::new(CategoryId::new(3), "Charge Others").with_type(CategoryType::Income)
    }

    fn account(id: i64, name: &str, account_type: AccountType) -> Account {
        Account::new(AccountId::new(id), name, account_type)
    }

    fn expense(id: i64, amount: i64, category: Option<Category>, account: Option<Account>) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            amount: Money::from_major(amount),
            note: None,
            status: ExpenseStatus::Unpaid,
            category_id: category.as_ref().map(|c| c.id),
            category,
            account_id: account.as_ref().map(|a| a.id),
            account,
        }
    }

    fn month(name: &str, income: i64, expenses: Vec<Expense>) -> Month {
        Month {
            id: MonthId::new(1),
            name: name.into(),
            total_income: Money::from_major(income),
            expenses: Some(expenses),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_income_category_excluded_from_totals() {
        let summary = MonthSummary::new(month(
            "June 2026",
            30_000,
            vec![
                expense(1, 6_000, Some(food()), None),
                expense(2, 8_000, Some(rent()), None),
                expense(3, 500, Some(charge_others()), None),
            ],
        ));

        assert_eq!(summary.total_expenses, Money::from_major(14_000));
        assert_eq!(summary.remaining, Money::from_major(16_000));

        // the income group still carries its own total
        let income_group = summary.group_named("charge others").unwrap();
        assert_eq!(income_group.total, Money::from_major(500));
    }

    #[test]
    fn test_groups_sorted_by_seq_no() {
        let groups = group_expenses(&[
            expense(1, 10, None, None),
            expense(2, 20, Some(food()), None),
            expense(3, 30, Some(rent()), None),
            expense(4, 40, Some(food()), None),
        ]);

        let names: Vec<_> = groups.iter().map(ExpenseGroup::name).collect();
        assert_eq!(names, vec!["Rent", "Food", "Uncategorized"]);
        assert_eq!(groups[1].total, Money::from_major(60));
        assert_eq!(groups[1].expenses.len(), 2);
    }

    #[test]
    fn test_expenses_sorted_by_account_name() {
        let ktc = account(1, "KTC", AccountType::CreditCard);
        let cash = account(2, "Cash", AccountType::Cash);
        let groups = group_expenses(&[
            expense(1, 10, Some(food()), Some(ktc.clone())),
            expense(2, 20, Some(food()), None),
            expense(3, 30, Some(food()), Some(cash)),
            expense(4, 40, Some(food()), Some(ktc)),
        ]);

        let ids: Vec<_> = groups[0].expenses.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_all_paid() {
        let mut paid = expense(1, 10, Some(food()), None);
        paid.status = ExpenseStatus::Paid;
        let unpaid = expense(2, 10, Some(rent()), None);

        let groups = group_expenses(&[paid.clone(), unpaid]);
        assert!(!groups[0].all_paid); // Rent
        assert!(groups[1].all_paid); // Food

        let detailed = group_expenses_by_category(&[paid], &[food(), rent()]);
        let rent_group = detailed.iter().find(|g| g.name() == "Rent").unwrap();
        assert!(rent_group.expenses.is_empty());
        assert!(!rent_group.all_paid);
    }

    #[test]
    fn test_detailed_groups_include_empty_categories() {
        let categories = vec![food(), rent(), charge_others()];
        let groups = group_expenses_by_category(&[expense(1, 10, Some(food()), None)], &categories);

        let names: Vec<_> = groups.iter().map(ExpenseGroup::name).collect();
        assert_eq!(names, vec!["Rent", "Food", "Charge Others"]);

        let groups = group_expenses_by_category(&[expense(1, 10, None, None)], &categories);
        assert_eq!(groups.last().unwrap().key, GroupKey::Uncategorized);
    }

    #[test]
    fn test_select_current_month() {
        let months = vec![
            month("July 2026", 0, vec![]),
            month("June 2026", 0, vec![]),
        ];

        let selected = select_current_month(&months, date(2026, 6, 15)).unwrap();
        assert_eq!(selected.name, "June 2026");

        let fallback = select_current_month(&months, date(2027, 1, 1)).unwrap();
        assert_eq!(fallback.name, "July 2026");

        assert!(select_current_month(&[], date(2026, 6, 15)).is_none());
    }

    #[test]
    fn test_can_delete_only_future_months() {
        let today = date(2026, 6, 15);
        assert!(can_delete_month(&month("July 2026", 0, vec![]), today));
        assert!(!can_delete_month(&month("June 2026", 0, vec![]), today));
        assert!(!can_delete_month(&month("May 2026", 0, vec![]), today));
        assert!(!can_delete_month(&month("Someday", 0, vec![]), today));
    }

    #[test]
    fn test_available_accounts() {
        let accounts = vec![
            account(1, "Cash", AccountType::Cash),
            account(2, "KTC", AccountType::CreditCard),
            account(3, "Savings", AccountType::Savings),
        ];
        let card_category = Category::new(CategoryId::new(9), "KTC Credit Card");

        let names = |list: Vec<&Account>| list.into_iter().map(|a| a.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(available_accounts(Some(&card_category), &accounts)), vec!["KTC"]);
        assert_eq!(
            names(available_accounts(Some(&food()), &accounts)),
            vec!["Cash", "Savings"]
        );
        assert_eq!(names(available_accounts(None, &accounts)), vec!["Cash", "Savings"]);
    }

    #[test]
    fn test_next_month_plan() {
        assert_eq!(next_month_plan(date(2026, 6, 15)).to_string(), "July 2026");
        assert_eq!(next_month_plan(date(2025, 12, 31)).to_string(), "January 2026");
    }
}
