//! User settings for the household ledger
//!
//! Persisted as `config.json` in the base directory. Every field has a serde
//! default so older files keep loading as fields are added.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::person::DEFAULT_MINOR_AGE_THRESHOLD;
use crate::rules::PostingPolicy;
use crate::storage::file_io::JsonFile;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// People younger than this are minors and may not record income
    #[serde(default = "default_minor_age_threshold")]
    pub minor_age_threshold: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

fn default_minor_age_threshold() -> u32 {
    DEFAULT_MINOR_AGE_THRESHOLD
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            minor_age_threshold: default_minor_age_threshold(),
        }
    }
}

impl Settings {
    /// Posting rules derived from these settings
    pub fn posting_policy(&self) -> PostingPolicy {
        PostingPolicy {
            minor_age_threshold: self.minor_age_threshold,
        }
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        JsonFile::new(paths.settings_file()).write(self)
    }
}
