//! Configuration module for travel-expenses
//!
//! Resolves where data lives and loads the persisted user settings.

pub mod paths;
pub mod settings;

pub use paths::{DataFile, TravelPaths};
pub use settings::{RateSettings, Settings};
