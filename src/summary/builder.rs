//! Travel summary assembly
//!
//! Turns one travel, its expenses, its rate rows and the category catalog
//! into totals in both currencies plus a per-category breakdown.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{TravelError, TravelResult};
use crate::models::{CategoryId, CurrencyRate, Expense, Travel, TravelId};

use super::aggregate::{Aggregation, CategoryAggregator};
use super::convert::{CurrencyConverter, MissingRatePolicy};
use super::rates::RateTable;

/// Label used when an expense points at a category missing from the catalog
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

/// Spend of one category within a travel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category_id: CategoryId,
    pub name: String,
    pub total_travel: Decimal,
    pub total_home: Decimal,
    /// Share of the travel's home-currency total, 0-100 with two decimals
    pub percentage: Decimal,
}

/// Spend summary of one travel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelSummary {
    pub travel_id: TravelId,
    pub name: String,
    pub country_code: Option<String>,
    pub home_currency_code: String,
    pub travel_currency_code: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_home: Decimal,
    pub total_travel: Decimal,
    pub travel_to_home_rate: Decimal,
    /// Sorted by home-currency total, largest first
    pub categories: Vec<CategoryBreakdown>,
    /// Expense currencies without a rate to home currency
    #[serde(default)]
    pub unresolved_currencies: Vec<String>,
}

/// Builds [`TravelSummary`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryBuilder {
    policy: MissingRatePolicy,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how amounts in currencies without a rate are counted
    pub fn missing_rate_policy(mut self, policy: MissingRatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Summarise a travel
    ///
    /// `expenses` and `rates` are trusted to belong to `travel`.
    /// `categories` maps every known category id to its display name.
    pub fn build(
        &self,
        travel: &Travel,
        expenses: &[Expense],
        rates: &[CurrencyRate],
        categories: &HashMap<CategoryId, String>,
    ) -> TravelResult<TravelSummary> {
        if travel.home_currency_code.trim().is_empty()
            || travel.travel_currency_code.trim().is_empty()
        {
            return Err(TravelError::Validation(format!(
                "Travel '{}' has no home or travel currency",
                travel.name
            )));
        }

        let table = RateTable::from_rates(rates);
        let converter = CurrencyConverter::new(
            &travel.home_currency_code,
            &travel.travel_currency_code,
            &table,
            self.policy,
        );
        let travel_to_home_rate = converter.travel_to_home_rate();

        let mut aggregator = CategoryAggregator::new(converter);
        aggregator.extend(expenses);
        let Aggregation {
            categories: totals,
            total_home,
            total_travel,
            unresolved_currencies,
        } = aggregator.finish()?;

        let mut breakdown = Vec::with_capacity(totals.len());
        for (category_id, totals) in totals {
            let percentage = percentage_of(totals.home_total, total_home).ok_or_else(|| {
                TravelError::Validation(format!(
                    "Share of a category in '{}' is too large to compute",
                    travel.name
                ))
            })?;
            breakdown.push(CategoryBreakdown {
                category_id,
                name: categories
                    .get(&category_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_CATEGORY_NAME.to_string()),
                total_travel: totals.travel_total,
                total_home: totals.home_total,
                percentage,
            });
        }

        // Stable, so equal totals keep first-seen order
        breakdown.sort_by(|a, b| b.total_home.cmp(&a.total_home));

        Ok(TravelSummary {
            travel_id: travel.id,
            name: travel.name.clone(),
            country_code: travel.country_code.clone(),
            home_currency_code: travel.home_currency_code.clone(),
            travel_currency_code: travel.travel_currency_code.clone(),
            start_date: travel.start_date,
            end_date: travel.end_date,
            total_home,
            total_travel,
            travel_to_home_rate,
            categories: breakdown,
            unresolved_currencies,
        })
    }
}

/// Summarise a travel with the default missing-rate policy
pub fn build_summary(
    travel: &Travel,
    expenses: &[Expense],
    rates: &[CurrencyRate],
    categories: &HashMap<CategoryId, String>,
) -> TravelResult<TravelSummary> {
    SummaryBuilder::new().build(travel, expenses, rates, categories)
}

/// `part` as a percentage of `total`, rounded to two places
///
/// Uses banker's rounding; zero when `total` is not positive and `None`
/// when the ratio overflows.
fn percentage_of(part: Decimal, total: Decimal) -> Option<Decimal> {
    if total <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    part.checked_div(total)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|share| share.round_dp(2))
}
