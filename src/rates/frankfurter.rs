//! Frankfurter exchange rate API client
//!
//! `GET {base}/latest` returns how many units of each currency one unit of
//! the response base buys. Those quotes are turned into values in euros.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::error::{TravelError, TravelResult};

use super::{RateSource, BASE_CURRENCY};

/// Default public endpoint
pub const FRANKFURTER_BASE_URL: &str = "https://api.frankfurter.app/";

/// Body of a `latest` response
#[derive(Debug, Clone, Deserialize)]
pub struct LatestResponse {
    pub base: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub rates: HashMap<String, Decimal>,
}

/// Rate source backed by the Frankfurter API
pub struct FrankfurterSource {
    client: Client,
    base_url: String,
}

impl FrankfurterSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> TravelResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TravelError::Rates(format!("Failed to create HTTP client: {}", e)))?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self { client, base_url })
    }

    pub fn latest_url(&self) -> String {
        format!("{}latest", self.base_url)
    }

    fn fetch_latest(&self) -> TravelResult<LatestResponse> {
        let url = self.latest_url();
        debug!(%url, "Fetching exchange rates");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| TravelError::Rates(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(TravelError::Rates(format!(
                "Frankfurter returned error: {}",
                response.status()
            )));
        }

        response
            .json::<LatestResponse>()
            .map_err(|e| TravelError::Rates(format!("Failed to parse response: {}", e)))
    }
}

impl RateSource for FrankfurterSource {
    fn fetch(&self) -> TravelResult<HashMap<String, Decimal>> {
        rates_to_base(&self.fetch_latest()?)
    }
}

/// Convert a `latest` response into values in euros
///
/// Non-positive quotes are skipped. A response in another base must quote
/// EUR, otherwise nothing can be derived.
pub fn rates_to_base(response: &LatestResponse) -> TravelResult<HashMap<String, Decimal>> {
    if response.rates.is_empty() {
        return Err(TravelError::Rates("Empty rate table".into()));
    }

    let base = response.base.trim().to_uppercase();
    let mut rates = HashMap::new();

    let base_value = if base == BASE_CURRENCY {
        Decimal::ONE
    } else {
        response
            .rates
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(BASE_CURRENCY))
            .map(|(_, rate)| *rate)
            .filter(|rate| *rate > Decimal::ZERO)
            .ok_or_else(|| {
                TravelError::Rates(format!("{} missing from {} quotes", BASE_CURRENCY, base))
            })?
    };
    rates.insert(base.clone(), base_value);

    for (code, quote) in &response.rates {
        if *quote <= Decimal::ZERO {
            continue;
        }
        if let Some(value) = base_value.checked_div(*quote) {
            rates.insert(code.trim().to_uppercase(), value);
        }
    }

    if base != BASE_CURRENCY {
        rates.insert(BASE_CURRENCY.to_string(), Decimal::ONE);
    }

    Ok(rates)
}
