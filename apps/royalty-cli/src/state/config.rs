//! # Configuration State
//!
//! Stores CLI configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line options (`--records`)
//! 2. Environment variables (`ROYALTY_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after initialization.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use royalty_core::Money;

/// Name of the records file inside the data directory.
pub const RECORDS_FILE_NAME: &str = "records.json";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Publisher name printed on statement headers
    pub publisher_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Records file backing the books/persons/records lookups
    pub records_path: PathBuf,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Publisher: "Royalty Desk"
    /// - Currency: ₹ with 2 decimals
    /// - Records: platform data dir, else `./records.json`
    fn default() -> Self {
        ConfigState {
            publisher_name: "Royalty Desk".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            records_path: default_records_path(),
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `ROYALTY_PUBLISHER_NAME`: statement header name
    /// - `ROYALTY_CURRENCY_SYMBOL`: currency symbol, e.g. "Rs. "
    /// - `ROYALTY_CURRENCY_DECIMALS`: decimal places (0-4)
    /// - `ROYALTY_RECORDS_PATH`: records file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("ROYALTY_PUBLISHER_NAME") {
            config.publisher_name = name;
        }

        if let Some(symbol) = lookup("ROYALTY_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("ROYALTY_CURRENCY_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(d) if d <= 4 => config.currency_decimals = d,
                _ => tracing::warn!(%decimals, "ignoring invalid ROYALTY_CURRENCY_DECIMALS"),
            }
        }

        if let Some(path) = lookup("ROYALTY_RECORDS_PATH") {
            config.records_path = PathBuf::from(path);
        }

        config
    }

    /// Formats a money amount as a currency string.
    ///
    /// Amounts are stored with two minor digits; other display precisions
    /// round half up.
    ///
    /// ## Example
    /// ```rust
    /// use royalty_cli::state::ConfigState;
    /// use royalty_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_minor(195_000)), "₹1950.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let minor = amount.minor() as i128;
        let decimals = self.currency_decimals as u32;
        let scaled = if decimals >= 2 {
            minor * 10_i128.pow(decimals - 2)
        } else {
            let div = 10_i128.pow(2 - decimals);
            let half = div / 2;
            if minor < 0 {
                -((-minor + half) / div)
            } else {
                (minor + half) / div
            }
        };

        let divisor = 10_i128.pow(decimals);
        let whole = (scaled / divisor).abs();
        let frac = (scaled % divisor).abs();

        format!(
            "{}{}{}",
            if scaled < 0 { "-" } else { "" },
            self.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole, frac, width = decimals as usize)
            } else {
                whole.to_string()
            }
        )
    }
}

/// Platform data directory for the records file.
///
/// - **macOS**: `~/Library/Application Support/com.royaltydesk.royalty/records.json`
/// - **Windows**: `%APPDATA%\royaltydesk\royalty\data\records.json`
/// - **Linux**: `~/.local/share/royalty/records.json`
fn default_records_path() -> PathBuf {
    match ProjectDirs::from("com", "royaltydesk", "royalty") {
        Some(dirs) => dirs.data_dir().join(RECORDS_FILE_NAME),
        None => PathBuf::from(RECORDS_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(symbol: &str, decimals: u8) -> ConfigState {
        ConfigState {
            currency_symbol: symbol.to_string(),
            currency_decimals: decimals,
            ..ConfigState::default()
        }
    }

    #[test]
    fn test_format_currency_positive() {
        let config = config("$", 2);
        assert_eq!(config.format_currency(Money::from_minor(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_minor(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_minor(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = config("$", 2);
        assert_eq!(config.format_currency(Money::from_minor(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_currency_other_precisions() {
        assert_eq!(config("Rs. ", 0).format_currency(Money::from_minor(195_050)), "Rs. 1951");
        assert_eq!(config("Rs. ", 0).format_currency(Money::from_minor(195_049)), "Rs. 1950");
        assert_eq!(config("", 3).format_currency(Money::from_minor(1_234)), "12.340");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let env: HashMap<&str, &str> = [
            ("ROYALTY_PUBLISHER_NAME", "Loomline Press"),
            ("ROYALTY_CURRENCY_SYMBOL", "Rs. "),
            ("ROYALTY_CURRENCY_DECIMALS", "0"),
            ("ROYALTY_RECORDS_PATH", "/tmp/r.json"),
        ]
        .into_iter()
        .collect();

        let config = ConfigState::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.publisher_name, "Loomline Press");
        assert_eq!(config.currency_symbol, "Rs. ");
        assert_eq!(config.currency_decimals, 0);
        assert_eq!(config.records_path, PathBuf::from("/tmp/r.json"));
    }

    #[test]
    fn test_invalid_decimals_ignored() {
        let config = ConfigState::from_lookup(|k| {
            (k == "ROYALTY_CURRENCY_DECIMALS").then(|| "nine".to_string())
        });
        assert_eq!(config.currency_decimals, 2);
    }

    #[test]
    fn test_default_records_path_file_name() {
        let config = ConfigState::default();
        assert!(config.records_path.ends_with(RECORDS_FILE_NAME));
    }
}
