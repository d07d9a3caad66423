//! Daily-cached rate provider
//!
//! Holds one immutable snapshot of the remote table. A snapshot is fresh for
//! the UTC day it was taken on; the first lookup of a new day refreshes it.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

use super::fallback::StaticRateProvider;
use super::{RateProvider, RateSource};

/// Where a snapshot's rates came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    /// Remote table topped up with fallback entries
    Remote,
    /// Fallback table only, after a failed fetch
    Fallback,
}

/// Rates known at one point in time
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub rates: HashMap<String, Decimal>,
    pub taken_on: NaiveDate,
    pub origin: SnapshotOrigin,
}

impl RateSnapshot {
    pub fn is_fresh(&self, today: NaiveDate) -> bool {
        self.taken_on == today
    }

    pub fn get(&self, currency_code: &str) -> Option<Decimal> {
        self.rates.get(currency_code).copied()
    }
}

/// Rate provider over a remote source with a static fallback
pub struct CachedRateProvider<S: RateSource> {
    source: S,
    fallback: StaticRateProvider,
    snapshot: Mutex<Option<Arc<RateSnapshot>>>,
}

impl<S: RateSource> CachedRateProvider<S> {
    pub fn new(source: S) -> Self {
        Self::with_fallback(source, StaticRateProvider::builtin())
    }

    pub fn with_fallback(source: S, fallback: StaticRateProvider) -> Self {
        Self {
            source,
            fallback,
            snapshot: Mutex::new(None),
        }
    }

    /// Current snapshot, if one was taken
    pub fn snapshot(&self) -> Option<Arc<RateSnapshot>> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetch a new snapshot now
    pub fn refresh(&self) -> Arc<RateSnapshot> {
        self.refresh_on(Utc::now().date_naive())
    }

    /// Value of one unit of `currency_code` in euros
    pub fn get(&self, currency_code: &str) -> Option<Decimal> {
        self.get_on(currency_code, Utc::now().date_naive())
    }

    fn get_on(&self, currency_code: &str, today: NaiveDate) -> Option<Decimal> {
        let code = currency_code.trim().to_uppercase();
        if code.is_empty() {
            return None;
        }

        let snapshot = match self.snapshot() {
            Some(snapshot) if snapshot.is_fresh(today) && !snapshot.rates.is_empty() => {
                debug!(currency = %code, "Rate snapshot is fresh");
                snapshot
            }
            _ => self.refresh_on(today),
        };

        snapshot
            .get(&code)
            .or_else(|| self.fallback.rate_to_base(&code))
    }

    fn refresh_on(&self, today: NaiveDate) -> Arc<RateSnapshot> {
        let snapshot = match self.source.fetch() {
            Ok(mut rates) => {
                self.fallback.fill_missing(&mut rates);
                debug!(count = rates.len(), "Refreshed exchange rates");
                RateSnapshot {
                    rates,
                    taken_on: today,
                    origin: SnapshotOrigin::Remote,
                }
            }
            Err(e) => {
                warn!(error = %e, "Exchange rate fetch failed, using fallback rates");
                RateSnapshot {
                    rates: self.fallback.rates(),
                    taken_on: today,
                    origin: SnapshotOrigin::Fallback,
                }
            }
        };

        let snapshot = Arc::new(snapshot);
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        snapshot
    }
}

impl<S: RateSource> RateProvider for CachedRateProvider<S> {
    fn rate_to_base(&self, currency_code: &str) -> Option<Decimal> {
        self.get(currency_code)
    }
}
