//! Scanner configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::application::filters::ScanFilters;
use crate::domain::error::DomainError;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_DB_PATH: &str = "./hybridscan.db";

/// Used when neither `symbols` nor `symbols_file` yields anything.
pub const FALLBACK_SYMBOLS: [&str; 7] = ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "META", "NVDA"];

/// Scanner settings, read from JSON.
///
/// Every key is optional in the file. `filters` merges key by key because
/// [`ScanFilters`] carries its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Symbols analyzed concurrently.
    pub max_workers: usize,
    pub filters: ScanFilters,
    /// Where scan result files go. Empty disables the file export.
    pub output_dir: PathBuf,
    pub symbols: Vec<String>,
    /// One ticker per line, read when `symbols` is empty.
    pub symbols_file: PathBuf,
    /// Directory of `<SYMBOL>.json` market snapshots.
    pub data_dir: PathBuf,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_workers: 5,
            filters: ScanFilters::default(),
            output_dir: PathBuf::from("scanner_results"),
            symbols: Vec::new(),
            symbols_file: PathBuf::from("nasdaq100_tickers.txt"),
            data_dir: PathBuf::from("market_data"),
        }
    }
}

impl ScannerConfig {
    /// Loads `path`, falling back to defaults when it is missing or invalid.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using default configuration");
            return Self::default();
        }
        info!(path = %path.display(), "Loading configuration");
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Error loading config file");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, DomainError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| DomainError::Config(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.max_workers == 0 {
            return Err(DomainError::Config("max_workers must be at least 1".into()));
        }
        Ok(())
    }

    /// Explicit list, else the symbols file, else [`FALLBACK_SYMBOLS`].
    pub fn resolve_symbols(&self) -> Vec<String> {
        if !self.symbols.is_empty() {
            return self.symbols.clone();
        }

        match fs::read_to_string(&self.symbols_file) {
            Ok(contents) => {
                let symbols: Vec<String> = contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect();
                if !symbols.is_empty() {
                    return symbols;
                }
                warn!(file = %self.symbols_file.display(), "Symbols file is empty, using fallback list");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(file = %self.symbols_file.display(), "Symbols file not found, using fallback list");
            }
            Err(e) => {
                error!(file = %self.symbols_file.display(), error = %e, "Error loading symbols");
            }
        }
        FALLBACK_SYMBOLS.iter().map(|s| s.to_string()).collect()
    }
}
