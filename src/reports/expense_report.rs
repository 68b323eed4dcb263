//! Expense Report
//!
//! A printable listing of expenses: a title, one row per expense and a
//! closing total row. Rendered as a plain-text table or exported as CSV.

use std::fmt::Write as _;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::error::{GastosError, GastosResult};
use crate::models::{display_label, sum_cents, Expense};

const FALLBACK_DATE_FORMAT: &str = "%d/%m/%Y";
const TOTAL_LABEL: &str = "Total Geral";

/// Presentation options for reports
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    pub date_format: String,
    pub currency_symbol: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for ReportOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            title: settings.report_title.clone(),
            date_format: settings.date_format.clone(),
            currency_symbol: settings.currency_symbol.clone(),
        }
    }
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct ReportRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Data")]
    pub date: String,
    #[tabled(rename = "Descrição")]
    pub description: String,
    #[tabled(rename = "Categoria")]
    pub category: String,
    #[tabled(rename = "Valor")]
    pub amount: String,
}

/// A rendered expense report
#[derive(Debug, Clone)]
pub struct ExpenseReport {
    /// Report title
    pub title: String,
    /// One row per expense, in input order
    pub rows: Vec<ReportRow>,
    /// Sum of all amounts in cents
    pub total_cents: i128,
    /// Currency symbol for the amount column header
    pub currency_symbol: String,
}

impl ExpenseReport {
    /// Build a report from an ordered list of expenses
    pub fn generate(expenses: &[Expense], options: &ReportOptions) -> Self {
        let rows = expenses
            .iter()
            .map(|e| ReportRow {
                id: e.id().map(|id| id.to_string()).unwrap_or_default(),
                date: format_date(e.timestamp(), &options.date_format),
                description: e.description().to_string(),
                category: display_label(e.category()).to_string(),
                amount: format_cents(e.cents().into()),
            })
            .collect();

        Self {
            title: options.title.clone(),
            rows,
            total_cents: sum_cents(expenses),
            currency_symbol: options.currency_symbol.clone(),
        }
    }

    /// Total of all amounts
    pub fn total(&self) -> f64 {
        self.total_cents as f64 / 100.0
    }

    /// Total formatted with two decimals
    pub fn total_display(&self) -> String {
        format_cents(self.total_cents)
    }

    /// Number of expense rows (excluding the total)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as a printable text document
    pub fn format_table(&self) -> String {
        let mut rows = self.rows.clone();
        rows.push(ReportRow {
            id: String::new(),
            date: String::new(),
            description: String::new(),
            category: TOTAL_LABEL.to_string(),
            amount: self.total_display(),
        });

        let mut table = Table::new(rows);
        table.with(Style::modern());

        format!(
            "{}\n\nValores em {}\n{}\n",
            self.title, self.currency_symbol, table
        )
    }

    /// Write the text document to `path`
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file (or its parent directory) cannot be written.
    pub fn write_to(&self, path: &Path) -> GastosResult<()> {
        create_parent_dir(path)?;

        fs::write(path, self.format_table()).map_err(|e| {
            GastosError::Io(format!("Failed to write report {}: {}", path.display(), e))
        })
    }

    /// Write the CSV export to `path`, creating parent directories as needed
    pub fn write_csv_to(&self, path: &Path) -> GastosResult<()> {
        create_parent_dir(path)?;

        let file = fs::File::create(path).map_err(|e| {
            GastosError::Io(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        self.export_csv(BufWriter::new(file))
    }

    /// Export the report to CSV format, ending with the total row
    pub fn export_csv<W: Write>(&self, writer: W) -> GastosResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record(["ID", "Data", "Descricao", "Categoria", "Valor"])
            .map_err(export_error)?;

        for row in &self.rows {
            csv.write_record([
                &row.id,
                &row.date,
                &row.description,
                &row.category,
                &row.amount,
            ])
            .map_err(export_error)?;
        }

        let total = self.total_display();
        csv.write_record(["", "", "", TOTAL_LABEL, total.as_str()])
            .map_err(export_error)?;

        csv.flush()
            .map_err(|e| GastosError::Export(e.to_string()))?;

        Ok(())
    }
}

fn create_parent_dir(path: &Path) -> GastosResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            GastosError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}

fn export_error(err: csv::Error) -> GastosError {
    GastosError::Export(err.to_string())
}

/// Format whole cents as a decimal amount with two places
pub fn format_cents(cents: i128) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Format a timestamp, falling back to dd/mm/YYYY for a bad format string
pub fn format_date(timestamp: NaiveDateTime, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", timestamp.format(format)).is_ok() {
        return out;
    }
    timestamp.format(FALLBACK_DATE_FORMAT).to_string()
}
