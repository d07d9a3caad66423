//! Travel summary computation
//!
//! Pure functions over already-loaded entities: a rate table is built from
//! the travel's rate rows, each expense is converted into the home and travel
//! currency views, amounts are accumulated per category, and the result is
//! assembled into a [`TravelSummary`]. Nothing in here touches storage.

pub mod aggregate;
pub mod builder;
pub mod convert;
pub mod rates;

pub use aggregate::{Aggregation, CategoryAggregator, CategoryTotals};
pub use builder::{
    build_summary, CategoryBreakdown, SummaryBuilder, TravelSummary, UNKNOWN_CATEGORY_NAME,
};
pub use convert::{CurrencyConverter, HomeAmount, MissingRatePolicy};
pub use rates::RateTable;
