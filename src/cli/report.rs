//! CLI commands for reports

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::GastosResult;
use crate::reports::{generate_category_reports, ExpenseReport, ReportOptions};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Generate a report of all expenses
    Report {
        /// Output file (defaults to relatorio_gastos.txt in the data directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export CSV instead of a text table
        #[arg(long)]
        csv: bool,
    },

    /// Generate one report per category that has expenses
    #[command(name = "report-by-category")]
    ReportByCategory {
        /// Output directory (defaults to relatorios_por_categoria in the data directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> GastosResult<()> {
    let options = ReportOptions::from(settings);
    let expenses = storage.expenses.load_all()?;

    match cmd {
        ReportCommands::Report { output, csv } => {
            let report = ExpenseReport::generate(&expenses, &options);

            if csv {
                let path = output.unwrap_or_else(|| storage.paths().report_file().with_extension("csv"));
                report.write_csv_to(&path)?;
                println!("Relatório CSV gerado: {}", path.display());
            } else {
                let path = output.unwrap_or_else(|| storage.paths().report_file());
                report.write_to(&path)?;
                println!("Relatório gerado: {}", path.display());
            }
        }

        ReportCommands::ReportByCategory { dir } => {
            let dir = dir.unwrap_or_else(|| storage.paths().category_reports_dir());
            let count = generate_category_reports(&expenses, &dir, &options)?;
            println!("{} relatório(s) gerado(s) em {}", count, dir.display());
        }
    }

    Ok(())
}
