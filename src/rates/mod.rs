//! Exchange rate lookup
//!
//! Rates here are expressed against a single base currency (EUR): a value of
//! `x` for `USD` means one US dollar is worth `x` euros. Per-travel
//! `CurrencyRate` rows are seeded from these when a travel is created.

pub mod cached;
pub mod fallback;
pub mod frankfurter;

pub use cached::{CachedRateProvider, RateSnapshot, SnapshotOrigin};
pub use fallback::StaticRateProvider;
pub use frankfurter::FrankfurterSource;

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::error::TravelResult;

/// Currency all provider rates are quoted against
pub const BASE_CURRENCY: &str = "EUR";

/// Something that knows what a currency is worth in the base currency
pub trait RateProvider {
    /// Value of one unit of `currency_code` in the base currency
    fn rate_to_base(&self, currency_code: &str) -> Option<Decimal>;

    /// Value of one unit of `from` expressed in `to`
    fn rate_between(&self, from: &str, to: &str) -> Option<Decimal> {
        if from.trim().eq_ignore_ascii_case(to.trim()) {
            return Some(Decimal::ONE);
        }

        let from_rate = self.rate_to_base(from)?;
        let to_rate = self.rate_to_base(to)?;
        if to_rate <= Decimal::ZERO {
            return None;
        }
        from_rate.checked_div(to_rate)
    }
}

/// Remote origin of a full rate table
pub trait RateSource {
    /// Fetch every known rate, keyed by upper-case code, in the base currency
    fn fetch(&self) -> TravelResult<HashMap<String, Decimal>>;
}

impl<P: RateProvider + ?Sized> RateProvider for &P {
    fn rate_to_base(&self, currency_code: &str) -> Option<Decimal> {
        (**self).rate_to_base(currency_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct Fixed;

    impl RateProvider for Fixed {
        fn rate_to_base(&self, currency_code: &str) -> Option<Decimal> {
            match currency_code {
                "EUR" => Some(dec!(1)),
                "USD" => Some(dec!(0.95)),
                "GBP" => Some(dec!(1.15)),
                "XXX" => Some(dec!(0)),
                _ => None,
            }
        }
    }

    #[test]
    fn test_rate_between_same_currency() {
        assert_eq!(Fixed.rate_between("ABC", "abc"), Some(Decimal::ONE));
    }

    #[test]
    fn test_rate_between_goes_through_base() {
        assert_eq!(Fixed.rate_between("USD", "EUR"), Some(dec!(0.95)));
        assert_eq!(Fixed.rate_between("EUR", "GBP").map(|r| r.round_dp(4)), Some(dec!(0.8696)));
        assert_eq!(Fixed.rate_between("GBP", "USD").map(|r| r.round_dp(4)), Some(dec!(1.2105)));
    }

    #[test]
    fn test_rate_between_unknown_or_degenerate() {
        assert_eq!(Fixed.rate_between("USD", "CHF"), None);
        assert_eq!(Fixed.rate_between("CHF", "USD"), None);
        assert_eq!(Fixed.rate_between("USD", "XXX"), None);
    }
}
