//! Wallet core configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::WalletError;

/// Tunables for the wallet core.
///
/// Can be loaded from a TOML file via [`WalletConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Minimum seconds between two status queries for the same transaction.
    #[serde(default = "default_recheck_interval_secs")]
    pub recheck_interval_secs: u64,

    /// Maximum number of ids remembered by the recheck cache.
    #[serde(default = "default_recheck_cache_capacity")]
    pub recheck_cache_capacity: usize,

    /// Whether coin selection may spend unconfirmed coins.
    #[serde(default = "default_true")]
    pub spend_unconfirmed_coins: bool,

    /// Fee per 1000 bytes of transaction, in base units.
    #[serde(default = "default_base_fee_per_kb")]
    pub base_fee_per_kb: i64,

    /// Smallest uncolored output worth creating, in base units.
    #[serde(default = "default_dust_threshold")]
    pub dust_threshold: i64,

    /// Accept testnet addresses instead of mainnet ones.
    #[serde(default)]
    pub testnet: bool,

    /// URL scheme used to reach CWPP payment services: "http" or "https".
    #[serde(default = "default_cwpp_scheme")]
    pub cwpp_scheme: String,

    /// Total timeout for one payment-service request.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    #[serde(default = "default_http_connect_timeout_secs")]
    pub http_connect_timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_recheck_interval_secs() -> u64 {
    60
}

fn default_recheck_cache_capacity() -> usize {
    10_000
}

fn default_true() -> bool {
    true
}

fn default_base_fee_per_kb() -> i64 {
    10_000
}

fn default_dust_threshold() -> i64 {
    5_500
}

fn default_cwpp_scheme() -> String {
    "http".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_http_connect_timeout_secs() -> u64 {
    10
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl WalletConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, WalletError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WalletError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        let config: Self = toml::from_str(s).map_err(|e| WalletError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, WalletError> {
        toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), WalletError> {
        if !matches!(self.cwpp_scheme.as_str(), "http" | "https") {
            return Err(WalletError::Config(format!(
                "cwpp_scheme must be http or https, got {:?}",
                self.cwpp_scheme
            )));
        }
        if self.base_fee_per_kb < 0 || self.dust_threshold < 0 {
            return Err(WalletError::Config("fee settings must not be negative".into()));
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn http_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.http_connect_timeout_secs)
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            recheck_interval_secs: default_recheck_interval_secs(),
            recheck_cache_capacity: default_recheck_cache_capacity(),
            spend_unconfirmed_coins: default_true(),
            base_fee_per_kb: default_base_fee_per_kb(),
            dust_threshold: default_dust_threshold(),
            testnet: false,
            cwpp_scheme: default_cwpp_scheme(),
            http_timeout_secs: default_http_timeout_secs(),
            http_connect_timeout_secs: default_http_connect_timeout_secs(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = WalletConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = WalletConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = WalletConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.recheck_interval_secs, 60);
        assert_eq!(config.dust_threshold, 5_500);
        assert!(config.spend_unconfirmed_coins);
        assert!(!config.testnet);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            recheck_interval_secs = 5
            cwpp_scheme = "https"
        "#;
        let config = WalletConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.recheck_interval_secs, 5);
        assert_eq!(config.cwpp_scheme, "https");
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn rejects_unknown_scheme() {
        let err = WalletConfig::from_toml_str("cwpp_scheme = \"ftp\"").unwrap_err();
        assert!(matches!(err, WalletError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("wallet.toml");
        std::fs::write(&path, "dust_threshold = 600\n").unwrap();
        let config = WalletConfig::from_toml_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.dust_threshold, 600);
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = WalletConfig::from_toml_file("/nonexistent/wallet.toml");
        assert!(matches!(result, Err(WalletError::Config(_))));
    }
}
