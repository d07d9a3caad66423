//! travel-expenses - multi-currency travel expense tracking
//!
//! Records the expenses of a trip in whatever currency they were paid and
//! summarizes them per category, in the travel currency and in the
//! traveller's home currency.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Travels, expenses, categories and currency rates
//! - `storage`: JSON file storage layer
//! - `rates`: Exchange rate providers (remote, cached, built-in fallback)
//! - `summary`: Pure travel summary computation
//! - `services`: Business logic and ownership rules
//! - `display`: Terminal formatting
//! - `export`: Summary export to JSON, YAML and CSV
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use travel_expenses::config::TravelPaths;
//! use travel_expenses::models::UserId;
//! use travel_expenses::services::SummaryService;
//! use travel_expenses::storage::Storage;
//!
//! let storage = Storage::new(TravelPaths::new()?)?;
//! storage.load_all()?;
//! let user = UserId::new("alice");
//! let summaries = SummaryService::new(&storage, &user).summaries()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod rates;
pub mod services;
pub mod storage;
pub mod summary;

pub use error::{TravelError, TravelResult};
