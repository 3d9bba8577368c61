//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Environment Variables (highest priority)                           │
//! │     FACTURE_DATA_DIR, FACTURE_OUTPUT_DIR,                              │
//! │     FACTURE_LANGUAGE, FACTURE_SELLER_NAME                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/facture/facture.toml (Linux)                             │
//! │     ~/Library/Application Support/com.facture.facture/ (macOS)         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Euro sign, French labels and the built-in seller block             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! currencySymbol = "€"
//! language = "fr"
//! outputDir = "/home/me/Factures"
//!
//! [seller]
//! name = "ELLIETECH PARIS 2014"
//! siret = "98741912400019"
//! ```
//!
//! Read-only after startup. The tax rate is not configurable: every taxable
//! invoice is charged 20%.

use directories::ProjectDirs;
use facture_core::{Money, SellerIdentity};
use facture_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::messages::Language;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE: &str = "facture.toml";

/// Errors while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigState {
    /// Where clients.json and invoiceNumber.json live.
    /// Default: the platform data directory
    pub data_dir: Option<PathBuf>,

    /// Where invoice files are written.
    /// Default: same as the data directory
    pub output_dir: Option<PathBuf>,

    /// Currency symbol printed after amounts
    pub currency_symbol: String,

    /// Label language of the form
    pub language: Language,

    /// The issuing company
    pub seller: SellerIdentity,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            data_dir: None,
            output_dir: None,
            currency_symbol: "€".to_string(),
            language: Language::default(),
            seller: SellerIdentity::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from file (if any), then applies environment overrides.
    ///
    /// `config_path` defaults to `facture.toml` in the platform config directory.
    /// A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = ConfigState::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(path = %path.display(), "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(path = %path.display(), "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            let mut config = ConfigState::default();
            config.apply_env_overrides();
            config
        })
    }

    /// Applies `FACTURE_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("FACTURE_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(dir) = lookup("FACTURE_OUTPUT_DIR") {
            debug!(output_dir = %dir, "Overriding output directory from environment");
            self.output_dir = Some(PathBuf::from(dir));
        }

        if let Some(lang) = lookup("FACTURE_LANGUAGE") {
            match lang.parse() {
                Ok(language) => self.language = language,
                Err(_) => warn!(language = %lang, "Unknown language in environment"),
            }
        }

        if let Some(name) = lookup("FACTURE_SELLER_NAME") {
            self.seller.name = name;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Directory of the persisted JSON files.
    ///
    /// Falls back to the current directory when no platform directory exists.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Directory invoice files are written to.
    pub fn resolve_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.resolve_data_dir())
    }

    /// Store configuration for the resolved data directory.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.resolve_data_dir())
    }

    /// Formats an amount for display, e.g. `"25.50 €"`.
    pub fn format_currency(&self, amount: Money) -> String {
        format!("{} {}", amount, self.currency_symbol)
    }

    /// `facture.toml` inside `dir`, for passing to [`ConfigState::load`].
    pub fn config_file_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "facture", "facture")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> ConfigState {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = ConfigState::default();
        config.apply_overrides(|key| map.get(key).cloned());
        config
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.language, Language::French);
        assert_eq!(config.seller.name, "ELLIETECH PARIS 2014");
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(2550)), "25.50 €");
        assert_eq!(config.format_currency(Money::zero()), "0.00 €");
    }

    #[test]
    fn test_env_overrides() {
        let config = overrides(&[
            ("FACTURE_DATA_DIR", "/srv/facture"),
            ("FACTURE_LANGUAGE", "zh"),
            ("FACTURE_SELLER_NAME", "Other Co"),
        ]);
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/facture")));
        assert_eq!(config.language, Language::Chinese);
        assert_eq!(config.seller.name, "Other Co");
        assert_eq!(config.resolve_output_dir(), PathBuf::from("/srv/facture"));
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let config = overrides(&[("FACTURE_LANGUAGE", "klingon")]);
        assert_eq!(config.language, Language::French);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = ConfigState::config_file_in(dir.path());
        std::fs::write(
            &path,
            r#"
outputDir = "/tmp/out"

[seller]
name = "Test SARL"
"#,
        )
        .unwrap();

        let config = ConfigState::load(Some(path)).unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(config.seller.name, "Test SARL");
        // unspecified seller fields keep their defaults
        assert_eq!(config.seller.siret, "98741912400019");
    }

    #[test]
    fn test_tax_rate_is_not_configurable() {
        let dir = tempfile::tempdir().unwrap();
        let path = ConfigState::config_file_in(dir.path());
        std::fs::write(&path, "taxRateBps = 550\nlanguage = \"zh\"\n").unwrap();

        // the stale key is ignored, the rest of the file still applies
        let config = ConfigState::load(Some(path)).unwrap();
        assert_eq!(config.language, Language::Chinese);

        let with_env = overrides(&[("FACTURE_TAX_RATE", "5.5")]);
        assert_eq!(with_env, ConfigState::default());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = ConfigState::config_file_in(dir.path());
        std::fs::write(&path, "language = [").unwrap();

        assert!(matches!(ConfigState::load(Some(path.clone())), Err(ConfigError::Parse(_))));
        assert_eq!(ConfigState::load_or_default(Some(path)).seller, SellerIdentity::default());
    }
}
