//! Expense model
//!
//! An expense belongs to exactly one travel and one category. The amount is
//! kept as entered, in whatever currency it was paid in.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::is_valid_currency_code;
use super::ids::{CategoryId, ExpenseId, TravelId, UserId};

/// A single spend during a travel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Travel this expense belongs to
    pub travel_id: TravelId,

    /// Category this expense is filed under
    pub category_id: CategoryId,

    /// Owner of the expense
    pub user_id: UserId,

    /// Day the expense was incurred
    pub date: NaiveDate,

    /// Short label
    pub name: String,

    /// Amount in `currency_code`, any sign
    pub amount: Decimal,

    /// Currency the expense was paid in
    pub currency_code: String,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When the expense was created
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        travel_id: TravelId,
        category_id: CategoryId,
        user_id: UserId,
        date: NaiveDate,
        name: impl Into<String>,
        amount: Decimal,
        currency_code: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            travel_id,
            category_id,
            user_id,
            date,
            name: name.into(),
            amount,
            currency_code: currency_code.into(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the given user owns this expense
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user_id == user
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(ExpenseValidationError::NameTooLong(self.name.len()));
        }

        if !is_valid_currency_code(&self.currency_code) {
            return Err(ExpenseValidationError::InvalidCurrency(
                self.currency_code.clone(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.amount, self.currency_code)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidCurrency(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Expense name too long ({} chars, max 100)", len),
            Self::InvalidCurrency(code) => write!(f, "Invalid currency code: '{}'", code),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Expense {
        Expense::new(
            TravelId::new(),
            CategoryId::new(),
            UserId::new("alice"),
            NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            "Tagine",
            dec!(120.50),
            "MAD",
        )
    }

    #[test]
    fn test_new_expense() {
        let expense = sample().with_description("Dinner in the medina");
        assert_eq!(expense.amount, dec!(120.50));
        assert_eq!(expense.currency_code, "MAD");
        assert_eq!(expense.description.as_deref(), Some("Dinner in the medina"));
        assert!(expense.is_owned_by(&UserId::new("alice")));
    }

    #[test]
    fn test_negative_amount_is_valid() {
        let mut expense = sample();
        expense.amount = dec!(-15);
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut expense = sample();
        expense.name = String::new();
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyName));

        expense.name = "Taxi".into();
        expense.currency_code = "??".into();
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::InvalidCurrency(_))
        ));
    }

    #[test]
    fn test_amount_serializes_exactly() {
        let expense = sample();
        let json = serde_json::to_string(&expense).unwrap();
        let deserialized: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.amount, dec!(120.50));
        assert_eq!(deserialized.id, expense.id);
    }
}
