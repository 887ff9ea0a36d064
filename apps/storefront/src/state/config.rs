//! # Configuration State
//!
//! Settings resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Environment Variables (highest priority)                            │
//! │     STOREFRONT_STORE_NAME, STOREFRONT_CURRENCY_SYMBOL,                  │
//! │     STOREFRONT_CURRENCY_DECIMALS, STOREFRONT_TAX_RATE (percent),        │
//! │     STOREFRONT_DATA_DIR                                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/storefront/storefront.toml (Linux)                        │
//! │     ~/Library/Application Support/com.storefront.app/storefront.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Downtown Electronics"
//! currency_symbol = "$"
//! currency_decimals = 2
//! tax_rate_bps = 800
//! data_dir = "/var/lib/storefront"
//! ```
//!
//! Read-only after startup, so commands borrow it without any locking.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use storefront_core::{Money, TaxRate, DEFAULT_TAX_RATE_BPS};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Errors while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Store name shown in command output.
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Sales tax on the order summary, in basis points (800 = 8%)
    pub tax_rate_bps: u32,

    /// Where snapshots are written. `None` means the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Storefront".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            data_dir: None,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`path`, else the platform config dir)
    /// 3. Environment variables
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads config or returns defaults (plus env overrides) if loading fails.
    pub fn load_or_default(path: Option<PathBuf>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            Self::from_env()
        })
    }

    /// Defaults plus environment overrides, no file.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency_decimals > 4 {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most 4, got {}",
                self.currency_decimals
            )));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies `STOREFRONT_*` overrides from `lookup`.
    ///
    /// Unparseable numbers are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("STOREFRONT_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("STOREFRONT_CURRENCY_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(d) => self.currency_decimals = d,
                Err(_) => warn!(value = %decimals, "Ignoring invalid STOREFRONT_CURRENCY_DECIMALS"),
            }
        }

        // Percent, e.g. "8" or "8.25"
        if let Some(rate) = lookup("STOREFRONT_TAX_RATE") {
            match parse_percent_bps(&rate) {
                Some(bps) => {
                    debug!(tax_rate_bps = bps, "Overriding tax rate from environment");
                    self.tax_rate_bps = bps;
                }
                None => warn!(value = %rate, "Ignoring invalid STOREFRONT_TAX_RATE"),
            }
        }

        if let Some(dir) = lookup("STOREFRONT_DATA_DIR") {
            debug!(dir = %dir, "Overriding data dir from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "storefront", "storefront")
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Directory the stores write their snapshots to.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.storefront.storefront`
    /// - **Windows**: `%APPDATA%\storefront\storefront\data`
    /// - **Linux**: `~/.local/share/storefront`
    ///
    /// Falls back to `./.storefront` when no home directory is known.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".storefront"))
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = (cents / divisor).abs();
        let frac = (cents % divisor).abs();
        let sign = if cents < 0 { "-" } else { "" };

        if self.currency_decimals > 0 {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency_symbol,
                whole,
                frac,
                width = self.currency_decimals as usize
            )
        } else {
            format!("{}{}{}", sign, self.currency_symbol, whole)
        }
    }

    pub fn format_money(&self, money: Money) -> String {
        self.format_currency(money.cents())
    }
}

/// "8.25" → 825. At most two decimal places.
fn parse_percent_bps(s: &str) -> Option<u32> {
    let s = s.trim().trim_end_matches('%');
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    if frac.len() > 2 || (whole.is_empty() && frac.is_empty()) {
        return None;
    }
    let whole: u32 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac: u32 = match frac.len() {
        0 => 0,
        1 => frac.parse::<u32>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    whole.checked_mul(100)?.checked_add(frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(100), "$1.00");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(-1234), "-$12.34");
        assert_eq!(config.format_currency(-5), "-$0.05");
    }

    #[test]
    fn test_format_currency_custom_symbol_and_decimals() {
        let config = ConfigState {
            currency_symbol: "¥".into(),
            currency_decimals: 0,
            ..ConfigState::default()
        };
        assert_eq!(config.format_currency(1500), "¥1500");
    }

    #[test]
    fn test_default_tax_rate_is_eight_percent() {
        assert_eq!(ConfigState::default().tax_rate().bps(), 800);
    }

    #[test]
    fn test_parse_percent_bps() {
        assert_eq!(parse_percent_bps("8"), Some(800));
        assert_eq!(parse_percent_bps("8.25"), Some(825));
        assert_eq!(parse_percent_bps("8.5%"), Some(850));
        assert_eq!(parse_percent_bps(".5"), Some(50));
        assert_eq!(parse_percent_bps("8.125"), None);
        assert_eq!(parse_percent_bps("abc"), None);
        assert_eq!(parse_percent_bps(""), None);
    }

    #[test]
    fn test_overrides_beat_file_values() {
        let mut config: ConfigState = toml::from_str(
            r#"
            store_name = "From File"
            tax_rate_bps = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.currency_symbol, "$");

        config.apply_overrides(lookup(&[
            ("STOREFRONT_STORE_NAME", "From Env"),
            ("STOREFRONT_TAX_RATE", "7.25"),
            ("STOREFRONT_DATA_DIR", "/tmp/sf"),
        ]));

        assert_eq!(config.store_name, "From Env");
        assert_eq!(config.tax_rate_bps, 725);
        assert_eq!(config.resolve_data_dir(), PathBuf::from("/tmp/sf"));
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let mut config = ConfigState::default();
        config.apply_overrides(lookup(&[
            ("STOREFRONT_CURRENCY_DECIMALS", "two"),
            ("STOREFRONT_TAX_RATE", "lots"),
        ]));
        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "store_name = \"Test Shop\"\ncurrency_decimals = 3\n").unwrap();

        let config = ConfigState::from_file(&path).unwrap();
        assert_eq!(config.store_name, "Test Shop");
        assert_eq!(config.format_currency(12345), "$12.345");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "store_name = [").unwrap();

        assert!(matches!(ConfigState::load(Some(path)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_or_default_falls_back_on_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "currency_decimals = \"two\"").unwrap();

        let config = ConfigState::load_or_default(Some(path));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_wide_decimals() {
        let config = ConfigState {
            currency_decimals: 9,
            ..ConfigState::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
