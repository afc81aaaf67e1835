//! # Ledger Configuration
//!
//! Display and storage settings, kept as a YAML file next to the ledger.
//!
//! ```yaml
//! currency_name: Pesos
//! currency_symbol: ₱
//! name_display_limit: 35
//! min_export_records: 2
//! data_directory: /home/me/Documents/TaskTally
//! bind_address: 127.0.0.1:3000
//! static_dir: null
//! ```
//!
//! `TASKTALLY_CONFIG` points at the YAML file (default
//! `<data directory>/config.yaml`) and `TASKTALLY_DATA_DIR` overrides the data
//! directory. A missing file is created with the defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::expense_table::DEFAULT_NAME_DISPLAY_LIMIT;
use crate::domain::export_service::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_MIN_EXPORT_RECORDS};
use crate::domain::total_service::DEFAULT_CURRENCY_NAME;

pub const CONFIG_PATH_ENV: &str = "TASKTALLY_CONFIG";
pub const DATA_DIR_ENV: &str = "TASKTALLY_DATA_DIR";
const CONFIG_FILE_NAME: &str = "config.yaml";
const APP_DIRECTORY_NAME: &str = "TaskTally";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Spelled-out currency appended to the total in words
    pub currency_name: String,
    /// Prefix of the export total row
    pub currency_symbol: String,
    pub name_display_limit: usize,
    pub min_export_records: usize,
    pub data_directory: PathBuf,
    pub bind_address: String,
    /// Built frontend to serve for non-API paths
    pub static_dir: Option<PathBuf>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            currency_name: DEFAULT_CURRENCY_NAME.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            name_display_limit: DEFAULT_NAME_DISPLAY_LIMIT,
            min_export_records: DEFAULT_MIN_EXPORT_RECORDS,
            data_directory: default_data_directory(),
            bind_address: "127.0.0.1:3000".to_string(),
            static_dir: None,
        }
    }
}

/// `~/Documents/TaskTally`, or `~/TaskTally` when there is no Documents folder
pub fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIRECTORY_NAME)
}

impl LedgerConfig {
    /// Resolve the configuration from the environment.
    pub fn load() -> Result<Self> {
        let data_dir_override = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        let config_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::resolve(config_path, data_dir_override)
    }

    /// Load from `config_path` (or the default location inside the data
    /// directory), then apply the data directory override.
    pub fn resolve(
        config_path: Option<PathBuf>,
        data_dir_override: Option<PathBuf>,
    ) -> Result<Self> {
        let data_directory = data_dir_override.clone().unwrap_or_else(default_data_directory);
        let config_path = config_path.unwrap_or_else(|| data_directory.join(CONFIG_FILE_NAME));

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            let config = Self {
                data_directory: data_directory.clone(),
                ..Self::default()
            };
            config.save_to(&config_path)?;
            info!("📝 Created default config at {}", config_path.display());
            config
        };

        if let Some(dir) = data_dir_override {
            config.data_directory = dir;
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&yaml)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Write the config as YAML via a temp file and rename
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating config directory {}", parent.display()))?;
            }
        }

        let yaml = serde_yaml::to_string(self)?;
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml)?;
        fs::rename(&temp_path, path)?;

        debug!("Saved config to {:?}", path);
        Ok(())
    }
}
