//! Expense display formatting
//!
//! Terminal rendering for the expense list, the category table and the
//! audit history.

use crate::audit::AuditEntry;
use crate::models::{display_label, sum_cents, Category, Expense};
use crate::reports::expense_report::format_cents;

const DESCRIPTION_WIDTH: usize = 40;

/// Format a single expense as one list line
pub fn format_expense_row(expense: &Expense, currency_symbol: &str) -> String {
    let id = expense
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "ID={} | {} | {} {} | {}",
        id,
        truncate(expense.description(), DESCRIPTION_WIDTH),
        currency_symbol,
        format_cents(expense.cents().into()),
        display_label(expense.category())
    )
}

/// Format a list of expenses followed by their total
pub fn format_expense_list(expenses: &[Expense], currency_symbol: &str) -> String {
    if expenses.is_empty() {
        return "Nenhum gasto registrado.\n".to_string();
    }

    let mut output = String::new();
    for expense in expenses {
        output.push_str(&format_expense_row(expense, currency_symbol));
        output.push('\n');
    }

    let total = sum_cents(expenses);
    output.push_str(&"-".repeat(50));
    output.push('\n');
    output.push_str(&format!(
        "{} gasto(s), total {} {}\n",
        expenses.len(),
        currency_symbol,
        format_cents(total)
    ));

    output
}

/// Format the fixed category table
pub fn format_category_list() -> String {
    Category::list_all()
        .into_iter()
        .map(|(id, label)| format!("{} - {}\n", id, label))
        .collect()
}

/// Format audit entries, oldest first
pub fn format_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries.\n".to_string();
    }

    entries
        .iter()
        .map(|entry| format!("{}\n", entry.summary()))
        .collect()
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
