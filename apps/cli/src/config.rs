//! # Receipt Configuration
//!
//! Default settings for tax rate, currency symbol and strictness.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --tax 0.05 --currency € --strict                                   │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     RECEIPT_TAX_RATE=0.05                                              │
//! │     RECEIPT_CURRENCY=€                                                 │
//! │     RECEIPT_STRICT=true                                                │
//! │                                                                         │
//! │  3. TOML Config File (--config, or the platform default)               │
//! │     ~/.config/receipt/receipt.toml (Linux)                             │
//! │     ~/Library/Application Support/com.receipt.receipt/receipt.toml     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     tax_rate = "0.088", currency_symbol = "$", strict = false          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # receipt.toml
//! tax_rate = "0.0725"
//! currency_symbol = "$"
//! strict = false
//! ```
//!
//! The tax rate stays a string until it reaches the core, so a value like
//! `"0.0725"` is never routed through a float.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use receipt_core::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_TAX_RATE};

use crate::cli::Cli;

/// Environment variable overriding the tax rate.
pub const ENV_TAX_RATE: &str = "RECEIPT_TAX_RATE";

/// Environment variable overriding the currency symbol.
pub const ENV_CURRENCY: &str = "RECEIPT_CURRENCY";

/// Environment variable enabling strict parsing.
pub const ENV_STRICT: &str = "RECEIPT_STRICT";

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "receipt.toml";

// =============================================================================
// Config Errors
// =============================================================================

/// Errors while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

// =============================================================================
// Receipt Configuration
// =============================================================================

/// Resolved receipt settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptConfig {
    /// Sales tax rate as a decimal string, e.g. `"0.088"` for 8.8%.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: String,

    /// Symbol prefixed to every amount.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Reject missing prices, non-positive quantities and negative prices.
    #[serde(default)]
    pub strict: bool,
}

fn default_tax_rate() -> String {
    DEFAULT_TAX_RATE.to_string()
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        ReceiptConfig {
            tax_rate: default_tax_rate(),
            currency_symbol: default_currency_symbol(),
            strict: false,
        }
    }
}

impl ReceiptConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`receipt.toml`)
    /// 3. Environment variables
    ///
    /// A missing platform-default file is skipped; a missing `explicit_path`
    /// is an error.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Reads and parses one TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading receipt config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies command-line flags on top of the loaded settings.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref tax) = cli.tax {
            self.tax_rate = tax.clone();
        }
        if let Some(ref currency) = cli.currency {
            self.currency_symbol = currency.clone();
        }
        if cli.strict {
            self.strict = true;
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary variable lookup.
    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rate) = lookup(ENV_TAX_RATE) {
            debug!(tax_rate = %rate, "Overriding tax rate from environment");
            self.tax_rate = rate;
        }

        if let Some(symbol) = lookup(ENV_CURRENCY) {
            debug!(currency = %symbol, "Overriding currency symbol from environment");
            self.currency_symbol = symbol;
        }

        if let Some(strict) = lookup(ENV_STRICT) {
            match strict.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.strict = true,
                "0" | "false" | "no" | "off" => self.strict = false,
                _ => warn!(value = %strict, "Unknown {} value in environment", ENV_STRICT),
            }
        }
    }

    /// Returns the platform config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "receipt", "receipt")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
