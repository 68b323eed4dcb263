//! Path management for gastos
//!
//! ## Path Resolution Order
//!
//! 1. `GASTOS_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/gastos` on Linux, `~/Library/Application Support/gastos`
//!    on macOS, `%APPDATA%\gastos\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::GastosError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "GASTOS_DATA_DIR";

/// Manages all paths used by gastos
#[derive(Debug, Clone)]
pub struct GastosPaths {
    /// Base directory for all gastos data
    base_dir: PathBuf,
}

impl GastosPaths {
    /// Create a new GastosPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, GastosError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create GastosPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the expense collection
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("gastos.json")
    }

    /// Default output path for the full report
    pub fn report_file(&self) -> PathBuf {
        self.base_dir.join("relatorio_gastos.txt")
    }

    /// Default directory for per-category reports
    pub fn category_reports_dir(&self) -> PathBuf {
        self.base_dir.join("relatorios_por_categoria")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), GastosError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| GastosError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| GastosError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if gastos has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, GastosError> {
    ProjectDirs::from("", "", "gastos")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| GastosError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GastosPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GastosPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GastosPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.expenses_file(),
            temp_dir.path().join("data").join("gastos.json")
        );
        assert_eq!(
            paths.category_reports_dir(),
            temp_dir.path().join("relatorios_por_categoria")
        );
    }
}
