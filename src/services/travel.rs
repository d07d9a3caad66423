//! Travel service
//!
//! CRUD for the caller's travels. Creating a travel can seed a rate for its
//! travel currency from a [`RateProvider`]; deleting one removes its
//! expenses and rates too.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{TravelError, TravelResult};
use crate::models::{normalize_currency_code, CurrencyRate, Travel, TravelId, UserId};
use crate::rates::RateProvider;
use crate::storage::{Repository, Storage};

/// Fields of a new travel
#[derive(Debug, Clone, Default)]
pub struct NewTravel {
    pub name: String,
    pub country_code: Option<String>,
    pub home_currency_code: String,
    pub travel_currency_code: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Changes to an existing travel; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct TravelChanges {
    pub name: Option<String>,
    pub country_code: Option<Option<String>>,
    pub home_currency_code: Option<String>,
    pub travel_currency_code: Option<String>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
}

/// What a travel deletion removed
#[derive(Debug, Clone)]
pub struct DeletedTravel {
    pub travel: Travel,
    pub expenses: usize,
    pub rates: usize,
}

/// Service for travel management
pub struct TravelService<'a> {
    storage: &'a Storage,
    user: &'a UserId,
}

impl<'a> TravelService<'a> {
    pub fn new(storage: &'a Storage, user: &'a UserId) -> Self {
        Self { storage, user }
    }

    /// Create a travel
    ///
    /// When `rates` is given, a rate from the travel currency to the home
    /// currency is looked up and stored with the travel.
    pub fn create(
        &self,
        input: NewTravel,
        rates: Option<&dyn RateProvider>,
    ) -> TravelResult<(Travel, Option<CurrencyRate>)> {
        let mut travel = Travel::new(
            self.user.clone(),
            input.name.trim(),
            normalize_currency_code(&input.home_currency_code),
            normalize_currency_code(&input.travel_currency_code),
        )
        .with_dates(input.start_date, input.end_date);
        travel.country_code = input.country_code.map(|c| c.trim().to_uppercase());

        travel
            .validate()
            .map_err(|e| TravelError::Validation(e.to_string()))?;

        self.storage.travels.insert(travel.clone())?;
        self.storage.travels.save()?;
        info!(travel = %travel.id, name = %travel.name, "Created travel");

        let seeded = match rates {
            Some(provider) => self.seed_rate(&travel, provider)?,
            None => None,
        };

        Ok((travel, seeded))
    }

    fn seed_rate(
        &self,
        travel: &Travel,
        provider: &dyn RateProvider,
    ) -> TravelResult<Option<CurrencyRate>> {
        if travel.travel_currency_code == travel.home_currency_code {
            return Ok(None);
        }

        let Some(rate) =
            provider.rate_between(&travel.travel_currency_code, &travel.home_currency_code)
        else {
            warn!(
                travel = %travel.id,
                currency = %travel.travel_currency_code,
                "No exchange rate available for travel currency"
            );
            return Ok(None);
        };

        let rate = CurrencyRate::new(travel.id, travel.travel_currency_code.clone(), rate);
        self.storage.rates.insert(rate.clone())?;
        self.storage.rates.save()?;
        info!(travel = %travel.id, %rate, "Seeded travel currency rate");

        Ok(Some(rate))
    }

    /// Get one of the caller's travels
    ///
    /// Travels of other users are reported as not found.
    pub fn get(&self, id: TravelId) -> TravelResult<Travel> {
        match self.storage.travels.get(id)? {
            Some(travel) if travel.is_owned_by(self.user) => Ok(travel),
            _ => Err(TravelError::travel_not_found(id.to_string())),
        }
    }

    /// Get a travel the caller is about to modify
    pub(crate) fn get_owned(&self, id: TravelId) -> TravelResult<Travel> {
        let travel = self.storage.travels.get_required(id)?;
        if !travel.is_owned_by(self.user) {
            return Err(TravelError::forbidden("Travel", id.to_string()));
        }
        Ok(travel)
    }

    /// Find one of the caller's travels by name or ID string
    pub fn find(&self, identifier: &str) -> TravelResult<Option<Travel>> {
        let identifier = identifier.trim();
        let name_lower = identifier.to_lowercase();
        let travels = self.list()?;

        if let Some(travel) = travels.iter().find(|t| t.name.to_lowercase() == name_lower) {
            return Ok(Some(travel.clone()));
        }

        Ok(travels
            .into_iter()
            .find(|t| t.id.matches(identifier)))
    }

    /// Find a travel or fail with a not-found error
    pub fn resolve(&self, identifier: &str) -> TravelResult<Travel> {
        self.find(identifier)?
            .ok_or_else(|| TravelError::travel_not_found(identifier))
    }

    /// The caller's travels, by start date (undated first), then name
    pub fn list(&self) -> TravelResult<Vec<Travel>> {
        let mut travels = self.storage.travels.filter(|t| t.is_owned_by(self.user))?;
        travels.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(travels)
    }

    /// Apply changes to a travel
    pub fn update(&self, id: TravelId, changes: TravelChanges) -> TravelResult<Travel> {
        let mut travel = self.get_owned(id)?;

        if let Some(name) = changes.name {
            travel.name = name.trim().to_string();
        }
        if let Some(country_code) = changes.country_code {
            travel.country_code = country_code.map(|c| c.trim().to_uppercase());
        }
        if let Some(code) = changes.home_currency_code {
            travel.home_currency_code = normalize_currency_code(&code);
        }
        if let Some(code) = changes.travel_currency_code {
            travel.travel_currency_code = normalize_currency_code(&code);
        }
        if let Some(start_date) = changes.start_date {
            travel.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            travel.end_date = end_date;
        }

        travel
            .validate()
            .map_err(|e| TravelError::Validation(e.to_string()))?;

        travel.updated_at = chrono::Utc::now();
        self.storage.travels.update(travel.clone())?;
        self.storage.travels.save()?;
        info!(travel = %travel.id, "Updated travel");

        Ok(travel)
    }

    /// Delete a travel with its expenses and rates
    pub fn delete(&self, id: TravelId) -> TravelResult<DeletedTravel> {
        let travel = self.get_owned(id)?;

        let expenses = self.storage.expenses.delete_where(|e| e.travel_id == id)?;
        let rates = self.storage.rates.delete_where(|r| r.travel_id == id)?;
        self.storage.travels.delete(id)?;

        self.storage.expenses.save()?;
        self.storage.rates.save()?;
        self.storage.travels.save()?;
        info!(travel = %id, expenses, rates, "Deleted travel");

        Ok(DeletedTravel {
            travel,
            expenses,
            rates,
        })
    }
}
