//! gastos - Terminal-based personal expense tracker
//!
//! This library provides the core functionality for the gastos expense
//! tracker: a fixed set of spending categories, validated expense records
//! kept in a single JSON file, and printable reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expense record and the closed category set
//! - `validation`: Checks for raw user input
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `reports`: Whole-collection and per-category reports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use gastos::config::{GastosPaths, Settings};
//! use gastos::models::Expense;
//! use gastos::storage::Storage;
//!
//! let paths = GastosPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, &settings);
//! storage.expenses.append(Expense::new(12.5, "Almoço", 1)?)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod storage;
pub mod validation;

pub use error::GastosError;
