//! Storage initialization
//!
//! Explicit first-run setup. This is the only place besides a write that
//! creates the data file.

use crate::config::paths::GastosPaths;
use crate::error::GastosError;

use super::expenses::ExpenseRepository;

/// Initialize storage for a fresh installation
///
/// Creates the directories and an empty expense collection. An existing
/// data file is left alone.
pub fn initialize_storage(paths: &GastosPaths) -> Result<(), GastosError> {
    paths.ensure_directories()?;
    ExpenseRepository::new(paths.expenses_file()).ensure_file()
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &GastosPaths) -> bool {
    !paths.expenses_file().exists()
}
