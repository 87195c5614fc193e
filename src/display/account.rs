//! Account display formatting

use crate::models::Account;

/// Format accounts as a table
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<name_width$}  {:<12}  {}\n",
        "ID",
        "Name",
        "Type",
        "Due",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:->4}  {:-<name_width$}  {:-<12}  {:-<3}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for account in accounts {
        let due = account
            .due_date
            .map(|day| day.to_string())
            .unwrap_or_default();
        output.push_str(&format!(
            "{:>4}  {:<name_width$}  {:<12}  {}\n",
            account.id.to_string(),
            account.name,
            account.account_type.to_string(),
            due,
            name_width = name_width,
        ));
    }

    output
}
