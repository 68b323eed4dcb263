//! Per-category reports
//!
//! Splits the collection by category and writes one report per category
//! that has at least one expense.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GastosError, GastosResult};
use crate::models::{Category, Expense};

use super::expense_report::{ExpenseReport, ReportOptions};

/// File name used for a category's report
pub fn category_report_file_name(category: Category) -> String {
    format!("relatorio_{}.txt", category.slug())
}

/// Build one report per non-empty category, in category id order
///
/// Expenses whose category id is not defined belong to no partition.
pub fn reports_by_category(
    expenses: &[Expense],
    options: &ReportOptions,
) -> Vec<(Category, ExpenseReport)> {
    Category::all()
        .iter()
        .filter_map(|&category| {
            let matching: Vec<Expense> = expenses
                .iter()
                .filter(|e| e.category() == category.id())
                .cloned()
                .collect();

            if matching.is_empty() {
                return None;
            }

            let options = ReportOptions {
                title: format!("{} - {}", options.title, category.label()),
                ..options.clone()
            };
            Some((category, ExpenseReport::generate(&matching, &options)))
        })
        .collect()
}

/// Write one report per non-empty category into `dir`
///
/// Returns the paths actually written. A report that fails to write is
/// logged and skipped; failing to create `dir` itself is an error.
pub fn write_category_reports(
    expenses: &[Expense],
    dir: &Path,
    options: &ReportOptions,
) -> GastosResult<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| {
        GastosError::Io(format!(
            "Failed to create report directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let mut written = Vec::new();
    for (category, report) in reports_by_category(expenses, options) {
        let path = dir.join(category_report_file_name(category));
        match report.write_to(&path) {
            Ok(()) => written.push(path),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to write category report");
            }
        }
    }

    Ok(written)
}

/// Write per-category reports and return how many were produced
pub fn generate_category_reports(
    expenses: &[Expense],
    dir: &Path,
    options: &ReportOptions,
) -> GastosResult<usize> {
    Ok(write_category_reports(expenses, dir, options)?.len())
}
