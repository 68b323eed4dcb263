//! Storage layer for gastos
//!
//! JSON file storage with atomic whole-file writes. The data file is created
//! lazily on the first write; reading never creates anything.

pub mod expenses;
pub mod file_io;
pub mod init;

pub use expenses::ExpenseRepository;
pub use file_io::{read_text, write_json_atomic};
pub use init::initialize_storage;

use crate::audit::AuditLogger;
use crate::config::paths::GastosPaths;
use crate::config::settings::Settings;

/// Main storage coordinator
pub struct Storage {
    paths: GastosPaths,
    pub expenses: ExpenseRepository,
}

impl Storage {
    /// Create a new Storage instance
    ///
    /// Does not touch the filesystem.
    pub fn new(paths: GastosPaths, settings: &Settings) -> Self {
        let mut expenses = ExpenseRepository::new(paths.expenses_file());
        if settings.audit_enabled {
            expenses = expenses.with_audit(AuditLogger::new(paths.audit_log()));
        }

        Self { paths, expenses }
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &GastosPaths {
        &self.paths
    }

    /// Audit log reader for this storage location
    pub fn audit_log(&self) -> AuditLogger {
        AuditLogger::new(self.paths.audit_log())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
