//! TOML-based explorer configuration.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::account::Account;
use crate::tariff::decode;

/// Top-level configuration parsed from TOML.
///
/// Every section is optional and falls back to the built-in defaults. Load
/// from TOML with [`ExplorerConfig::from_toml_file`] or use
/// [`ExplorerConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExplorerConfig {
    /// Mock account generation.
    #[serde(default)]
    pub account: AccountConfig,
    /// Interactive UI options.
    #[serde(default)]
    pub ui: UiConfig,
    /// REST API options.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Mock account generation parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccountConfig {
    /// Seed for the consumption readings.
    pub seed: u64,
    /// Lower bound of daily electricity usage (kWh).
    pub electricity_kwh_min: f32,
    /// Upper bound of daily electricity usage (kWh).
    pub electricity_kwh_max: f32,
    /// Lower bound of daily gas usage (kWh).
    pub gas_kwh_min: f32,
    /// Upper bound of daily gas usage (kWh).
    pub gas_kwh_max: f32,
    /// Multiplier applied to weekend electricity usage.
    pub weekend_factor: f32,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            electricity_kwh_min: 8.0,
            electricity_kwh_max: 15.0,
            gas_kwh_min: 20.0,
            gas_kwh_max: 40.0,
            weekend_factor: 1.2,
        }
    }
}

/// Interactive UI options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Initial screen: `"dashboard"` or `"story"`.
    pub start_mode: String,
    /// Tariff code shown in the decoder. Defaults to the account's
    /// electricity agreement.
    pub tariff_code: Option<String>,
}

impl UiConfig {
    /// Tariff code for the dashboard decoder: the configured override, or
    /// the account's electricity agreement.
    pub fn resolve_tariff_code(&self, account: &Account) -> String {
        self.tariff_code
            .clone()
            .or_else(|| account.primary_tariff_code().map(str::to_string))
            .unwrap_or_default()
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_mode: "dashboard".to_string(),
            tariff_code: None,
        }
    }
}

/// REST API options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Listening port.
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"account.gas_kwh_min"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl ExplorerConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let a = &self.account;

        if a.electricity_kwh_min < 0.0 {
            errors.push(ConfigError {
                field: "account.electricity_kwh_min".into(),
                message: "must be >= 0".into(),
            });
        }
        if a.electricity_kwh_min > a.electricity_kwh_max {
            errors.push(ConfigError {
                field: "account.electricity_kwh_min".into(),
                message: "must be <= account.electricity_kwh_max".into(),
            });
        }
        if a.gas_kwh_min < 0.0 {
            errors.push(ConfigError {
                field: "account.gas_kwh_min".into(),
                message: "must be >= 0".into(),
            });
        }
        if a.gas_kwh_min > a.gas_kwh_max {
            errors.push(ConfigError {
                field: "account.gas_kwh_min".into(),
                message: "must be <= account.gas_kwh_max".into(),
            });
        }
        if a.weekend_factor <= 0.0 {
            errors.push(ConfigError {
                field: "account.weekend_factor".into(),
                message: "must be > 0".into(),
            });
        }

        let ui = &self.ui;
        if ui.start_mode != "dashboard" && ui.start_mode != "story" {
            errors.push(ConfigError {
                field: "ui.start_mode".into(),
                message: format!(
                    "must be \"dashboard\" or \"story\", got \"{}\"",
                    ui.start_mode
                ),
            });
        }
        if let Some(code) = &ui.tariff_code {
            if decode(code).is_none() {
                errors.push(ConfigError {
                    field: "ui.tariff_code".into(),
                    message: format!("\"{code}\" is not a decodable tariff code"),
                });
            }
        }

        errors
    }
}
