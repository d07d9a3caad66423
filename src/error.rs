//! Error type shared by every layer of travel-expenses

use thiserror::Error;

/// Everything that can go wrong in travel-expenses
#[derive(Error, Debug)]
pub enum TravelError {
    /// Bad or unreadable settings
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    /// A data file could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(String),

    /// Input rejected by a model or service rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// No entity matches the identifier for the current user
    #[error("{entity} not found: {identifier}")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    /// The entity exists but the current user may not change it
    #[error("Access denied to {entity}: {identifier}")]
    Forbidden {
        entity: &'static str,
        identifier: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    /// The exchange rate source failed or knows no such currency
    #[error("Exchange rate error: {0}")]
    Rates(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl TravelError {
    /// `NotFound` for any entity name
    pub fn not_found(entity: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            identifier: identifier.into(),
        }
    }

    pub fn travel_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Travel", identifier)
    }

    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Expense", identifier)
    }

    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Category", identifier)
    }

    pub fn rate_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Currency Rate", identifier)
    }

    /// `Forbidden` for an entity owned by another user
    pub fn forbidden(entity: &'static str, identifier: impl Into<String>) -> Self {
        Self::Forbidden {
            entity,
            identifier: identifier.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for TravelError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TravelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

pub type TravelResult<T> = Result<T, TravelError>;
