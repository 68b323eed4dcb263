//! Reports module
//!
//! Printable expense reports, either for the whole collection or split by
//! category.

pub mod by_category;
pub mod expense_report;

pub use by_category::{generate_category_reports, reports_by_category, write_category_reports};
pub use expense_report::{ExpenseReport, ReportOptions, ReportRow};

use std::path::Path;

use crate::error::GastosResult;
use crate::models::Expense;

/// Write a report over `expenses` to `output`
pub fn generate_report(
    expenses: &[Expense],
    output: &Path,
    options: &ReportOptions,
) -> GastosResult<()> {
    ExpenseReport::generate(expenses, options).write_to(output)
}
