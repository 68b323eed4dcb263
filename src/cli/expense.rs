//! Expense CLI commands
//!
//! Every raw argument goes through the validators before an expense is
//! built.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_expense_list;
use crate::error::{GastosError, GastosResult};
use crate::models::Expense;
use crate::storage::Storage;
use crate::validation::{validate_amount, validate_category, validate_description, validate_id};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g. "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// What the money was spent on
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
        /// Category id (see `gastos categories`)
        #[arg(short, long)]
        category: String,
    },

    /// List recorded expenses
    List {
        /// Only show expenses in this category id
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete an expense by id
    Delete {
        /// Expense id
        #[arg(allow_hyphen_values = true)]
        id: String,
    },

    /// Delete every expense
    Clear {
        /// Confirm deleting all expenses
        #[arg(long)]
        yes: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> GastosResult<()> {
    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            category,
        } => {
            let amount = validate_amount(&amount)?;
            let description = validate_description(&description.join(" "))?;
            let category = validate_category(&category)?;

            let expense = Expense::new(amount, description, category)?;
            let stored = storage.expenses.append(expense)?;

            let id = stored.id().map(|id| id.to_string()).unwrap_or_default();
            println!("Gasto adicionado com ID {}!", id);
        }

        ExpenseCommands::List { category } => {
            let mut expenses = storage.expenses.load_all()?;
            if let Some(raw) = category {
                let category = validate_category(&raw)?;
                expenses.retain(|e| e.category() == category);
            }
            print!("{}", format_expense_list(&expenses, &settings.currency_symbol));
        }

        ExpenseCommands::Delete { id } => {
            let id = validate_id(&id)?;
            if storage.expenses.delete_by_id(id)? {
                println!("Gasto ID {} removido.", id);
            } else {
                println!("ID {} não encontrado.", id);
            }
        }

        ExpenseCommands::Clear { yes } => {
            if !yes {
                return Err(GastosError::Validation(
                    "Refusing to delete all expenses without --yes".into(),
                ));
            }
            let count = storage.expenses.delete_all()?;
            println!("{} registros removidos.", count);
        }
    }

    Ok(())
}
