//! Amount and currency code helpers
//!
//! Expense amounts and exchange rates are arbitrary-precision decimals, kept
//! exactly as entered. Rounding only happens when an amount is displayed.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// Parse an amount from user input
///
/// Accepts formats: "10.50", "-10.50", "+3", "1,250.75", "0.093"
pub fn parse_amount(s: &str) -> Result<Decimal, AmountParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(AmountParseError::Empty);
    }

    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let cleaned: String = body.chars().filter(|c| *c != ',' && *c != '_').collect();

    Decimal::from_str(&cleaned).map_err(|_| AmountParseError::InvalidFormat(trimmed.to_string()))
}

/// Format an amount with two decimals followed by its currency code
pub fn format_amount(amount: Decimal, currency_code: &str) -> String {
    format!("{} {}", format_decimal(amount, 2), currency_code)
}

/// Format a decimal rounded half away from zero with thousands grouping
pub fn format_decimal(amount: Decimal, places: u32) -> String {
    let rounded = amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let body = format!("{:.*}", places as usize, rounded.abs());

    let (int_part, frac_part) = match body.find('.') {
        Some(pos) => (&body[..pos], &body[pos..]),
        None => (body.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}", sign, grouped, frac_part)
}

/// Upper-case and trim a currency code
pub fn normalize_currency_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Whether a code looks like an ISO 4217 currency code
pub fn is_valid_currency_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= 5 && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::Empty => write!(f, "Amount cannot be empty"),
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
