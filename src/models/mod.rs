//! Core data models for gastos
//!
//! The expense entity, its identifier, and the fixed set of categories.

pub mod category;
pub mod expense;
pub mod ids;

pub use category::{display_label, Category};
pub use expense::{
    round_to_cents, sum_cents, Expense, ExpenseValidationError, MAX_AMOUNT, TIMESTAMP_FORMAT,
};
pub use ids::ExpenseId;
