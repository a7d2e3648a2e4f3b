//! Configuration management for mavuno-fees
//!
//! Config stored at: ~/.config/mavuno-fees/config.json

use mavuno_domain::model::{FeePolicy, TransportQcRates};
use mavuno_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::fee_rates::{
    bps_to_percent, DEFAULT_FINANCE_MARKUP_BPS, DEFAULT_PLATFORM_COMMISSION_BPS,
};

/// Fee rate overrides, in basis points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_platform_commission_bps")]
    pub platform_commission_bps: u32,

    #[serde(default = "default_finance_markup_bps")]
    pub finance_markup_bps: u32,

    #[serde(default)]
    pub transport_qc: TransportQcRates,
}

fn default_platform_commission_bps() -> u32 {
    DEFAULT_PLATFORM_COMMISSION_BPS
}

fn default_finance_markup_bps() -> u32 {
    DEFAULT_FINANCE_MARKUP_BPS
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            platform_commission_bps: default_platform_commission_bps(),
            finance_markup_bps: default_finance_markup_bps(),
            transport_qc: TransportQcRates::default(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Fee rate table
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("mavuno-fees");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from the user config directory, or use defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or use defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Save config to the user config directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Human-readable summary naming the file the config was loaded from
    pub fn summary(&self, path: &Path) -> String {
        format!("{}\nConfig file:          {}", self, path.display())
    }

    /// Validated fee policy built from the configured rates
    pub fn policy(&self) -> Result<FeePolicy> {
        FeePolicy::new(
            self.policy.platform_commission_bps,
            self.policy.finance_markup_bps,
            self.policy.transport_qc,
        )
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rates = &self.policy.transport_qc;
        writeln!(f, "Mavuno Fees Configuration")?;
        writeln!(f, "=========================")?;
        writeln!(f)?;
        writeln!(f, "Output format:        {}", self.output_format)?;
        writeln!(
            f,
            "Platform commission:  {}%",
            bps_to_percent(self.policy.platform_commission_bps)
        )?;
        writeln!(
            f,
            "Finance markup:       {}%",
            bps_to_percent(self.policy.finance_markup_bps)
        )?;
        writeln!(f, "Transport & QC 1-ton: {}%", bps_to_percent(rates.one_ton_bps))?;
        writeln!(f, "Transport & QC 3-ton: {}%", bps_to_percent(rates.three_ton_bps))?;
        writeln!(f, "Transport & QC 7-ton: {}%", bps_to_percent(rates.seven_ton_bps))?;

        if let Err(e) = self.policy() {
            writeln!(f)?;
            writeln!(f, "WARNING: {}", e)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mavuno_domain::model::TruckSize;

    #[test]
    fn test_default_config_uses_default_policy() {
        let config = Config::default();
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.policy().unwrap(), FeePolicy::DEFAULT);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.output_format = OutputFormat::Json;
        config.policy.platform_commission_bps = 350;
        config.policy.transport_qc.set_for_truck(TruckSize::SevenTon, 150);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.policy().unwrap().platform_commission_bps(), 350);
        assert_eq!(loaded.policy().unwrap().transport_qc_bps(TruckSize::SevenTon), 150);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "policy": { "finance_markup_bps": 0 } }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        let policy = config.policy().unwrap();
        assert_eq!(policy.finance_markup_bps(), 0);
        assert_eq!(policy.platform_commission_bps(), DEFAULT_PLATFORM_COMMISSION_BPS);
        assert_eq!(policy.transport_qc_bps(TruckSize::OneTon), 400);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, mavuno_types::Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_summary_names_the_active_file() {
        let path = Path::new("/tmp/override/mavuno.json");
        let summary = Config::default().summary(path);
        assert!(summary.contains("Config file:          /tmp/override/mavuno.json"));
        assert!(summary.contains("Platform commission:  5.00%"));
        assert!(!Config::default().to_string().contains("Config file"));
    }

    #[test]
    fn test_invalid_rates_rejected_by_policy() {
        let mut config = Config::default();
        config.policy.platform_commission_bps = 9_500;
        assert!(config.policy().is_err());
        assert!(config.to_string().contains("WARNING"));
    }
}
