//! Travel model
//!
//! A travel is a trip with a home currency (the one totals are reported in)
//! and a travel currency (the one costs are mostly incurred in).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::is_valid_currency_code;
use super::ids::{TravelId, UserId};

/// A trip owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Travel {
    /// Unique identifier
    pub id: TravelId,

    /// Owner of the travel
    pub user_id: UserId,

    /// Display name
    pub name: String,

    /// ISO country code of the destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    /// Currency totals are reported in
    pub home_currency_code: String,

    /// Currency spent during the trip
    pub travel_currency_code: String,

    /// First day of the trip
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Last day of the trip
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// When the travel was created
    pub created_at: DateTime<Utc>,

    /// When the travel was last modified
    pub updated_at: DateTime<Utc>,
}

impl Travel {
    /// Create a new travel
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        home_currency_code: impl Into<String>,
        travel_currency_code: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TravelId::new(),
            user_id,
            name: name.into(),
            country_code: None,
            home_currency_code: home_currency_code.into(),
            travel_currency_code: travel_currency_code.into(),
            start_date: None,
            end_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the trip dates
    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Set the destination country
    pub fn with_country(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    /// Whether the given user owns this travel
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user_id == user
    }

    /// Validate the travel
    pub fn validate(&self) -> Result<(), TravelValidationError> {
        if self.name.trim().is_empty() {
            return Err(TravelValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(TravelValidationError::NameTooLong(self.name.len()));
        }

        for code in [&self.home_currency_code, &self.travel_currency_code] {
            if !is_valid_currency_code(code) {
                return Err(TravelValidationError::InvalidCurrency(code.clone()));
            }
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(TravelValidationError::EndBeforeStart { start, end });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Travel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for travels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TravelValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidCurrency(String),
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for TravelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Travel name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Travel name too long ({} chars, max 100)", len),
            Self::InvalidCurrency(code) => write!(f, "Invalid currency code: '{}'", code),
            Self::EndBeforeStart { start, end } => {
                write!(f, "End date {} is before start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for TravelValidationError {}
