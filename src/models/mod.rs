//! Core data models for travel-expenses
//!
//! This module contains the data structures of the travel domain: travels,
//! their expenses and currency rates, and expense categories.

pub mod amount;
pub mod category;
pub mod currency_rate;
pub mod expense;
pub mod ids;
pub mod travel;

pub use amount::{format_amount, normalize_currency_code, parse_amount};
pub use category::{Category, DEFAULT_CATEGORIES};
pub use currency_rate::CurrencyRate;
pub use expense::Expense;
pub use ids::{CategoryId, CurrencyRateId, ExpenseId, TravelId, UserId};
pub use travel::Travel;
