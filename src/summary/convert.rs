//! Conversion of expense amounts into the home and travel currency views

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rates::RateTable;

/// What to count for an amount whose currency has no rate to home currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRatePolicy {
    /// Count the amount as if it were already in home currency
    #[default]
    PassThrough,
    /// Leave the expense out of every total
    Exclude,
}

impl MissingRatePolicy {
    /// Home-currency value to count for an unconvertible amount
    pub fn apply(self, amount: Decimal) -> Option<Decimal> {
        match self {
            Self::PassThrough => Some(amount),
            Self::Exclude => None,
        }
    }
}

impl std::str::FromStr for MissingRatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pass_through" | "passthrough" => Ok(Self::PassThrough),
            "exclude" => Ok(Self::Exclude),
            other => Err(format!("Unknown missing-rate policy: {}", other)),
        }
    }
}

/// Outcome of converting an amount to home currency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAmount {
    /// The amount was in home currency or a rate was found
    Resolved(Decimal),
    /// No rate was found; holds what the policy decided to count
    Unresolved(Option<Decimal>),
}

impl HomeAmount {
    /// Amount to add to the totals, if any
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Resolved(amount) => Some(*amount),
            Self::Unresolved(amount) => *amount,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Converts amounts for one travel
#[derive(Debug, Clone, Copy)]
pub struct CurrencyConverter<'a> {
    home_currency_code: &'a str,
    rates: &'a RateTable,
    travel_to_home_rate: Decimal,
    policy: MissingRatePolicy,
}

impl<'a> CurrencyConverter<'a> {
    pub fn new(
        home_currency_code: &'a str,
        travel_currency_code: &str,
        rates: &'a RateTable,
        policy: MissingRatePolicy,
    ) -> Self {
        Self {
            home_currency_code,
            rates,
            travel_to_home_rate: rates.travel_to_home_rate(travel_currency_code),
            policy,
        }
    }

    /// Rate used to project home amounts into travel currency
    pub fn travel_to_home_rate(&self) -> Decimal {
        self.travel_to_home_rate
    }

    /// Convert an amount paid in `currency_code` to home currency
    ///
    /// A product too large for a `Decimal` is treated like a missing rate.
    pub fn to_home(&self, amount: Decimal, currency_code: &str) -> HomeAmount {
        if currency_code == self.home_currency_code {
            return HomeAmount::Resolved(amount);
        }

        match self
            .rates
            .get(currency_code)
            .and_then(|rate| amount.checked_mul(rate))
        {
            Some(converted) => HomeAmount::Resolved(converted),
            None => HomeAmount::Unresolved(self.policy.apply(amount)),
        }
    }

    /// Project a home-currency amount into travel currency
    ///
    /// The raw expense amount is used as is when the travel rate is not
    /// positive or the quotient does not fit in a `Decimal`.
    pub fn to_travel(&self, amount_home: Decimal, raw_amount: Decimal) -> Decimal {
        if self.travel_to_home_rate <= Decimal::ZERO {
            return raw_amount;
        }
        amount_home
            .checked_div(self.travel_to_home_rate)
            .unwrap_or(raw_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table(entries: &[(&str, Decimal)]) -> RateTable {
        entries
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect()
    }

    #[test]
    fn test_home_currency_is_identity() {
        let rates = table(&[("EUR", dec!(2))]);
        let converter =
            CurrencyConverter::new("EUR", "MAD", &rates, MissingRatePolicy::PassThrough);
        assert_eq!(
            converter.to_home(dec!(100), "EUR"),
            HomeAmount::Resolved(dec!(100))
        );
    }

    #[test]
    fn test_known_rate_multiplies() {
        let rates = table(&[("MAD", dec!(0.093))]);
        let converter =
            CurrencyConverter::new("EUR", "MAD", &rates, MissingRatePolicy::PassThrough);
        assert_eq!(
            converter.to_home(dec!(1000), "MAD"),
            HomeAmount::Resolved(dec!(93.000))
        );
    }

    #[test]
    fn test_unknown_currency_passes_through() {
        let rates = table(&[("MAD", dec!(0.093))]);
        let converter =
            CurrencyConverter::new("EUR", "MAD", &rates, MissingRatePolicy::PassThrough);
        let converted = converter.to_home(dec!(50), "USD");
        assert!(!converted.is_resolved());
        assert_eq!(converted.value(), Some(dec!(50)));
    }

    #[test]
    fn test_unknown_currency_excluded() {
        let rates = RateTable::default();
        let converter = CurrencyConverter::new("EUR", "MAD", &rates, MissingRatePolicy::Exclude);
        assert_eq!(converter.to_home(dec!(50), "USD"), HomeAmount::Unresolved(None));
    }

    #[test]
    fn test_to_travel_divides_by_rate() {
        let rates = table(&[("MAD", dec!(0.1))]);
        let converter =
            CurrencyConverter::new("EUR", "MAD", &rates, MissingRatePolicy::PassThrough);
        assert_eq!(converter.travel_to_home_rate(), dec!(0.1));
        assert_eq!(converter.to_travel(dec!(10), dec!(999)), dec!(100));
    }

    #[test]
    fn test_to_travel_with_degenerate_rate_uses_raw_amount() {
        for degenerate in [dec!(0), dec!(-0.5)] {
            let rates = table(&[("MAD", degenerate)]);
            let converter =
                CurrencyConverter::new("EUR", "MAD", &rates, MissingRatePolicy::PassThrough);
            assert_eq!(converter.to_travel(dec!(0), dec!(42)), dec!(42));
        }
    }

    #[test]
    fn test_overflowing_conversions_degrade() {
        let rates = table(&[
            ("VND", dec!(0.0000000000000000000000000001)),
            ("USD", Decimal::from(10_000_000_000_i64)),
        ]);
        let converter = CurrencyConverter::new("EUR", "VND", &rates, MissingRatePolicy::Exclude);
        assert_eq!(converter.to_travel(dec!(1000), dec!(1000)), dec!(1000));
        let huge = Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0);
        assert_eq!(converter.to_home(huge, "USD"), HomeAmount::Unresolved(None));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "pass-through".parse::<MissingRatePolicy>().unwrap(),
            MissingRatePolicy::PassThrough
        );
        assert_eq!(
            "EXCLUDE".parse::<MissingRatePolicy>().unwrap(),
            MissingRatePolicy::Exclude
        );
        assert!("strict".parse::<MissingRatePolicy>().is_err());
    }
}
