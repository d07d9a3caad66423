//! Summary service
//!
//! Loads a travel with its expenses, rates and the visible category names,
//! then hands them to the summary builder.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::TravelResult;
use crate::models::{CategoryId, Travel, TravelId, UserId};
use crate::storage::Storage;
use crate::summary::{MissingRatePolicy, SummaryBuilder, TravelSummary};

use super::category::CategoryService;
use super::travel::TravelService;

/// Service computing travel summaries for the caller
pub struct SummaryService<'a> {
    storage: &'a Storage,
    user: &'a UserId,
    builder: SummaryBuilder,
}

impl<'a> SummaryService<'a> {
    pub fn new(storage: &'a Storage, user: &'a UserId) -> Self {
        Self {
            storage,
            user,
            builder: SummaryBuilder::new(),
        }
    }

    /// Use a different missing-rate policy
    pub fn with_policy(mut self, policy: MissingRatePolicy) -> Self {
        self.builder = self.builder.missing_rate_policy(policy);
        self
    }

    /// Summary of one of the caller's travels
    pub fn summary(&self, travel_id: TravelId) -> TravelResult<TravelSummary> {
        let travel = TravelService::new(self.storage, self.user).get(travel_id)?;
        let names = CategoryService::new(self.storage, self.user).names()?;
        self.summarize(&travel, &names)
    }

    /// Summaries of all the caller's travels, by start date (undated first)
    pub fn summaries(&self) -> TravelResult<Vec<TravelSummary>> {
        let travels = TravelService::new(self.storage, self.user).list()?;
        let names = CategoryService::new(self.storage, self.user).names()?;

        travels
            .iter()
            .map(|travel| self.summarize(travel, &names))
            .collect()
    }

    fn summarize(
        &self,
        travel: &Travel,
        names: &HashMap<CategoryId, String>,
    ) -> TravelResult<TravelSummary> {
        let expenses = self.storage.expenses.filter(|e| e.travel_id == travel.id)?;

        // Oldest first, so the newest row for a currency wins
        let mut rates = self.storage.rates.filter(|r| r.travel_id == travel.id)?;
        rates.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let summary = self.builder.build(travel, &expenses, &rates, names)?;
        debug!(
            travel = %travel.id,
            expenses = expenses.len(),
            rates = rates.len(),
            "Built travel summary"
        );

        if !summary.unresolved_currencies.is_empty() {
            warn!(
                travel = %travel.id,
                currencies = %summary.unresolved_currencies.join(", "),
                "No rate to home currency for some expenses"
            );
        }

        Ok(summary)
    }
}
