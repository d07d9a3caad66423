//! Per-travel currency rate model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::is_valid_currency_code;
use super::ids::{CurrencyRateId, TravelId};

/// Conversion factor from one currency to a travel's home currency
///
/// One unit of `currency_code` equals `rate_to_base` units of the home
/// currency of the owning travel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub id: CurrencyRateId,
    pub travel_id: TravelId,
    pub currency_code: String,
    pub rate_to_base: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CurrencyRate {
    /// Create a new rate for a travel
    pub fn new(
        travel_id: TravelId,
        currency_code: impl Into<String>,
        rate_to_base: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: CurrencyRateId::new(),
            travel_id,
            currency_code: currency_code.into(),
            rate_to_base,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate the rate
    pub fn validate(&self) -> Result<(), RateValidationError> {
        if !is_valid_currency_code(&self.currency_code) {
            return Err(RateValidationError::InvalidCurrency(
                self.currency_code.clone(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for CurrencyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1 {} = {}", self.currency_code, self.rate_to_base)
    }
}

/// Validation errors for currency rates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateValidationError {
    InvalidCurrency(String),
}

impl fmt::Display for RateValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCurrency(code) => write!(f, "Invalid currency code: '{}'", code),
        }
    }
}

impl std::error::Error for RateValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_rate() {
        let travel_id = TravelId::new();
        let rate = CurrencyRate::new(travel_id, "MAD", dec!(0.093));
        assert_eq!(rate.travel_id, travel_id);
        assert_eq!(rate.to_string(), "1 MAD = 0.093");
        assert!(rate.validate().is_ok());
    }

    #[test]
    fn test_zero_rate_is_storable() {
        let rate = CurrencyRate::new(TravelId::new(), "USD", Decimal::ZERO);
        assert!(rate.validate().is_ok());
    }

    #[test]
    fn test_invalid_code() {
        let rate = CurrencyRate::new(TravelId::new(), "", dec!(1));
        assert_eq!(
            rate.validate(),
            Err(RateValidationError::InvalidCurrency(String::new()))
        );
    }
}
