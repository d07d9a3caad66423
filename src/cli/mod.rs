//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod expense;
pub mod export;
pub mod rate;
pub mod travel;

pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs};
pub use rate::{handle_rate_command, RateCommands};
pub use travel::{handle_travel_command, TravelCommands};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::Settings;
use crate::error::{TravelError, TravelResult};
use crate::models::parse_amount;

/// Parse a date in the configured format, falling back to ISO 8601
pub(crate) fn parse_date(input: &str, settings: &Settings) -> TravelResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, &settings.date_format)
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .map_err(|_| {
            TravelError::Validation(format!(
                "Invalid date: '{}'. Use format {} (e.g. 2025-04-01)",
                input, settings.date_format
            ))
        })
}

/// Parse an amount or rate entered on the command line
pub(crate) fn parse_decimal(input: &str, what: &str) -> TravelResult<Decimal> {
    parse_amount(input)
        .map_err(|e| TravelError::Validation(format!("Invalid {}: {}", what, e)))
}

/// Map an edit flag to a field change; an empty value clears the field
pub(crate) fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| {
        let v = v.trim().to_string();
        if v.is_empty() {
            None
        } else {
            Some(v)
        }
    })
}

/// Like [`clearable`] for dates
pub(crate) fn clearable_date(
    value: Option<String>,
    settings: &Settings,
) -> TravelResult<Option<Option<NaiveDate>>> {
    match clearable(value) {
        None => Ok(None),
        Some(None) => Ok(Some(None)),
        Some(Some(date)) => Ok(Some(Some(parse_date(&date, settings)?))),
    }
}
