//! User settings for gastos
//!
//! Display and report preferences plus the audit toggle, persisted as
//! `config.json`. Every field has a serde default so older or partial files
//! keep loading.

use serde::{Deserialize, Serialize};

use super::paths::GastosPaths;
use crate::error::GastosError;

/// User settings for gastos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format used in reports (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Title printed at the top of reports
    #[serde(default = "default_report_title")]
    pub report_title: String,

    /// Whether creates and deletes are recorded in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_report_title() -> String {
    "Relatório de Gastos Mensais".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            report_title: default_report_title(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &GastosPaths) -> Result<Self, GastosError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| GastosError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                GastosError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &GastosPaths) -> Result<(), GastosError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| GastosError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| GastosError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
