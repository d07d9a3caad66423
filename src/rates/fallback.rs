//! Built-in rate table used when no live rates are available

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use super::RateProvider;

/// Approximate value of each currency in euros
const FALLBACK_RATES: &[(&str, Decimal)] = &[
    ("EUR", dec!(1)),
    ("MAD", dec!(0.093)),
    ("USD", dec!(0.95)),
    ("GBP", dec!(1.15)),
    ("JPY", dec!(0.006)),
];

/// Fixed rate table
#[derive(Debug, Clone)]
pub struct StaticRateProvider {
    rates: HashMap<String, Decimal>,
}

impl StaticRateProvider {
    /// Provider over the built-in table
    pub fn builtin() -> Self {
        Self::from_pairs(FALLBACK_RATES.iter().map(|(code, rate)| (*code, *rate)))
    }

    /// Provider over an arbitrary table; codes are upper-cased
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Decimal)>,
    {
        let rates = pairs
            .into_iter()
            .map(|(code, rate)| (code.trim().to_uppercase(), rate))
            .collect();
        Self { rates }
    }

    /// Copy of the whole table
    pub fn rates(&self) -> HashMap<String, Decimal> {
        self.rates.clone()
    }

    /// Add every entry `rates` lacks, leaving existing entries alone
    pub fn fill_missing(&self, rates: &mut HashMap<String, Decimal>) {
        for (code, rate) in &self.rates {
            rates.entry(code.clone()).or_insert(*rate);
        }
    }
}

impl Default for StaticRateProvider {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RateProvider for StaticRateProvider {
    fn rate_to_base(&self, currency_code: &str) -> Option<Decimal> {
        self.rates
            .get(&currency_code.trim().to_uppercase())
            .copied()
    }
}
