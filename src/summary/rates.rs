//! Rate lookup for a single travel
//!
//! Keys are currency codes exactly as stored on the rate rows. Callers that
//! want case-insensitive matching must normalise codes before they get here.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::CurrencyRate;

/// Currency code to `rate_to_base` mapping for one travel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// Build the table from a travel's rate rows
    ///
    /// When two rows share a currency code the later row wins.
    pub fn from_rates<'a, I>(rates: I) -> Self
    where
        I: IntoIterator<Item = &'a CurrencyRate>,
    {
        rates
            .into_iter()
            .map(|r| (r.currency_code.clone(), r.rate_to_base))
            .collect()
    }

    /// Rate for a currency, if the travel defines one
    pub fn get(&self, currency_code: &str) -> Option<Decimal> {
        self.rates.get(currency_code).copied()
    }

    /// Rate from the travel currency to home currency, `1` when undefined
    pub fn travel_to_home_rate(&self, travel_currency_code: &str) -> Decimal {
        self.get(travel_currency_code).unwrap_or(Decimal::ONE)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(String, Decimal)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        let mut rates = HashMap::new();
        for (code, rate) in iter {
            rates.insert(code, rate);
        }
        Self { rates }
    }
}
