//! Data directory and user configuration
//!
//! Directory structure:
//! ~/.drip/
//!   config.yaml          # Source table paths and defaults
//!   drip.log             # Rotating log file
//!   prices.csv           # Default price table location
//!   dividends.csv        # Default dividend table location
//!   metadata.csv         # Optional fund metadata

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::util::io::atomic_write;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Configuration stored in config.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Price table, relative paths resolve against the data directory
    pub prices_path: PathBuf,
    pub dividends_path: PathBuf,
    /// Optional fund metadata table; `null` turns it off
    pub metadata_path: Option<PathBuf>,
    /// Hypothetical investment used when neither shares nor cash is given
    pub default_cash: f64,
    pub reinvest: bool,
    /// Apply dividends paid on non-trading days on the next trading day
    pub snap_dividends: bool,
    pub format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prices_path: PathBuf::from("prices.csv"),
            dividends_path: PathBuf::from("dividends.csv"),
            metadata_path: Some(PathBuf::from("metadata.csv")),
            default_cash: 10_000.0,
            reinvest: false,
            snap_dividends: false,
            format: OutputFormat::Table,
        }
    }
}

impl AppConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }
}

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Manages the data directory holding config, logs and default tables
#[derive(Debug, Clone)]
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the default data directory path (~/.drip/)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".drip")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    /// Resolve a configured table path; absolute paths are kept as-is
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Load config.yaml, falling back to defaults when it does not exist
    pub fn load_config(&self) -> Result<AppConfig, StorageError> {
        let config_path = self.config_path();
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| StorageError::Io(format!("Failed to read config: {}", e)))?;

        AppConfig::from_yaml(&content)
            .map_err(|e| StorageError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Write config.yaml atomically, creating the directory if needed
    pub fn save_config(&self, config: &AppConfig) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::Io(format!("Failed to create data directory: {}", e)))?;

        let yaml = config
            .to_yaml()
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize config: {}", e)))?;

        atomic_write(&self.config_path(), &yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write config: {}", e)))
    }

    /// Create the data directory with a default config.
    ///
    /// Returns `false` when a config already exists and `force` is not set.
    pub fn init(&self, force: bool) -> Result<bool, StorageError> {
        if self.config_path().exists() && !force {
            return Ok(false);
        }
        self.save_config(&AppConfig::default())?;
        Ok(true)
    }
}
