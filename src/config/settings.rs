//! User settings for travel-expenses
//!
//! Holds the defaults used when creating travels, the missing-rate policy
//! applied by summaries, and the exchange rate source configuration.

use serde::{Deserialize, Serialize};

use std::io::ErrorKind;

use super::paths::TravelPaths;
use crate::error::{TravelError, TravelResult};
use crate::models::normalize_currency_code;
use crate::storage::write_json_atomic;
use crate::summary::MissingRatePolicy;

/// Exchange rate source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSettings {
    /// Base URL of the Frankfurter API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Look up a rate for the travel currency when a travel is created
    #[serde(default = "default_fetch_on_create")]
    pub fetch_on_create: bool,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RateSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            fetch_on_create: default_fetch_on_create(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// User settings for travel-expenses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Home currency for new travels when none is given
    #[serde(default = "default_home_currency")]
    pub default_home_currency: String,

    /// How summaries count amounts in currencies without a rate
    #[serde(default)]
    pub missing_rate_policy: MissingRatePolicy,

    /// Exchange rate source
    #[serde(default)]
    pub rates: RateSettings,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_home_currency() -> String {
    "EUR".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_api_base_url() -> String {
    "https://api.frankfurter.app/".to_string()
}

fn default_fetch_on_create() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_home_currency: default_home_currency(),
            missing_rate_policy: MissingRatePolicy::default(),
            rates: RateSettings::default(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Read `config.json`, falling back to defaults when it does not exist yet
    pub fn load_or_create(paths: &TravelPaths) -> TravelResult<Self> {
        let path = paths.settings_file();
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(TravelError::Io(format!(
                    "Cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let mut settings: Settings = serde_json::from_slice(&bytes)
            .map_err(|e| TravelError::Config(format!("{}: {}", path.display(), e)))?;
        settings.default_home_currency = normalize_currency_code(&settings.default_home_currency);
        Ok(settings)
    }

    pub fn save(&self, paths: &TravelPaths) -> TravelResult<()> {
        write_json_atomic(paths.settings_file(), self)
    }
}
