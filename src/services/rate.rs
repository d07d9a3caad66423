//! Currency rate service
//!
//! Rates always belong to a travel; every operation goes through one of the
//! caller's travels.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{TravelError, TravelResult};
use crate::models::{normalize_currency_code, CurrencyRate, CurrencyRateId, TravelId, UserId};
use crate::storage::{Repository, Storage};

use super::travel::TravelService;

/// Service for per-travel currency rates
pub struct CurrencyRateService<'a> {
    storage: &'a Storage,
    user: &'a UserId,
}

impl<'a> CurrencyRateService<'a> {
    pub fn new(storage: &'a Storage, user: &'a UserId) -> Self {
        Self { storage, user }
    }

    fn check_travel(&self, travel_id: TravelId) -> TravelResult<()> {
        TravelService::new(self.storage, self.user)
            .get_owned(travel_id)
            .map(|_| ())
    }

    /// Rates of a travel, by currency code then creation time
    pub fn list(&self, travel_id: TravelId) -> TravelResult<Vec<CurrencyRate>> {
        self.check_travel(travel_id)?;
        let mut rates = self.storage.rates.filter(|r| r.travel_id == travel_id)?;
        rates.sort_by(|a, b| {
            a.currency_code
                .cmp(&b.currency_code)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(rates)
    }

    /// Get a rate of a travel
    pub fn get(&self, travel_id: TravelId, id: CurrencyRateId) -> TravelResult<CurrencyRate> {
        self.check_travel(travel_id)?;
        match self.storage.rates.get(id)? {
            Some(rate) if rate.travel_id == travel_id => Ok(rate),
            _ => Err(TravelError::rate_not_found(id.to_string())),
        }
    }

    /// Find a rate of a travel by currency code or ID string
    pub fn find(
        &self,
        travel_id: TravelId,
        identifier: &str,
    ) -> TravelResult<Option<CurrencyRate>> {
        let identifier = identifier.trim();
        let code = normalize_currency_code(identifier);
        let rates = self.list(travel_id)?;

        // The newest row for a code is the one summaries use
        if let Some(rate) = rates.iter().rev().find(|r| r.currency_code == code) {
            return Ok(Some(rate.clone()));
        }

        Ok(rates
            .into_iter()
            .find(|r| r.id.matches(identifier)))
    }

    /// Find a rate or fail with a not-found error
    pub fn resolve(&self, travel_id: TravelId, identifier: &str) -> TravelResult<CurrencyRate> {
        self.find(travel_id, identifier)?
            .ok_or_else(|| TravelError::rate_not_found(identifier))
    }

    /// Add a rate to a travel
    pub fn create(
        &self,
        travel_id: TravelId,
        currency_code: &str,
        rate_to_base: Decimal,
    ) -> TravelResult<CurrencyRate> {
        self.check_travel(travel_id)?;

        let rate = CurrencyRate::new(
            travel_id,
            normalize_currency_code(currency_code),
            rate_to_base,
        );
        rate.validate().map_err(|e| TravelError::Validation(e.to_string()))?;

        self.storage.rates.insert(rate.clone())?;
        self.storage.rates.save()?;
        info!(rate = %rate.id, travel = %travel_id, %rate, "Created currency rate");

        Ok(rate)
    }

    /// Change a rate's code and/or value
    pub fn update(
        &self,
        travel_id: TravelId,
        id: CurrencyRateId,
        currency_code: Option<&str>,
        rate_to_base: Option<Decimal>,
    ) -> TravelResult<CurrencyRate> {
        let mut rate = self.get(travel_id, id)?;

        if let Some(code) = currency_code {
            rate.currency_code = normalize_currency_code(code);
        }
        if let Some(value) = rate_to_base {
            rate.rate_to_base = value;
        }

        rate.validate()
            .map_err(|e| TravelError::Validation(e.to_string()))?;

        rate.updated_at = Utc::now();
        self.storage.rates.update(rate.clone())?;
        self.storage.rates.save()?;
        info!(rate = %rate.id, %rate, "Updated currency rate");

        Ok(rate)
    }

    /// Remove a rate from a travel
    pub fn delete(&self, travel_id: TravelId, id: CurrencyRateId) -> TravelResult<CurrencyRate> {
        let rate = self.get(travel_id, id)?;
        self.storage.rates.delete(id)?;
        self.storage.rates.save()?;
        info!(rate = %id, "Deleted currency rate");
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TravelPaths;
    use crate::models::Travel;
    use crate::services::travel::NewTravel;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, UserId, Travel) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TravelPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let alice = UserId::new("alice");
        let input = NewTravel {
            name: "Morocco".into(),
            home_currency_code: "EUR".into(),
            travel_currency_code: "MAD".into(),
            ..Default::default()
        };
        let (travel, _) = TravelService::new(&storage, &alice)
            .create(input, None)
            .unwrap();
        (temp_dir, storage, alice, travel)
    }

    #[test]
    fn test_create_and_list() {
        let (_temp_dir, storage, alice, travel) = setup();
        let service = CurrencyRateService::new(&storage, &alice);

        service.create(travel.id, "usd", dec!(0.95)).unwrap();
        service.create(travel.id, "MAD", dec!(0.093)).unwrap();

        let rates = service.list(travel.id).unwrap();
        let codes: Vec<_> = rates.iter().map(|r| r.currency_code.as_str()).collect();
        assert_eq!(codes, vec!["MAD", "USD"]);
    }

    #[test]
    fn test_rate_must_belong_to_travel() {
        let (_temp_dir, storage, alice, travel) = setup();
        let service = CurrencyRateService::new(&storage, &alice);
        let rate = service.create(travel.id, "MAD", dec!(0.093)).unwrap();

        let (other, _) = TravelService::new(&storage, &alice)
            .create(
                NewTravel {
                    name: "Japan".into(),
                    home_currency_code: "EUR".into(),
                    travel_currency_code: "JPY".into(),
                    ..Default::default()
                },
                None,
            )
            .unwrap();

        assert!(service.get(other.id, rate.id).unwrap_err().is_not_found());
        assert!(service.delete(other.id, rate.id).unwrap_err().is_not_found());
        assert_eq!(service.get(travel.id, rate.id).unwrap().id, rate.id);
    }

    #[test]
    fn test_requires_own_travel() {
        let (_temp_dir, storage, _alice, travel) = setup();
        let bob = UserId::new("bob");
        let service = CurrencyRateService::new(&storage, &bob);

        assert!(service.list(travel.id).unwrap_err().is_forbidden());
        assert!(service
            .create(travel.id, "USD", dec!(1))
            .unwrap_err()
            .is_forbidden());
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp_dir, storage, alice, travel) = setup();
        let service = CurrencyRateService::new(&storage, &alice);
        let rate = service.create(travel.id, "MAD", dec!(0.09)).unwrap();

        let updated = service
            .update(travel.id, rate.id, None, Some(dec!(0.093)))
            .unwrap();
        assert_eq!(updated.rate_to_base, dec!(0.093));

        let err = service
            .update(travel.id, rate.id, Some("1!"), None)
            .unwrap_err();
        assert!(err.is_validation());

        service.delete(travel.id, rate.id).unwrap();
        assert!(service.list(travel.id).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_code() {
        let (_temp_dir, storage, alice, travel) = setup();
        let service = CurrencyRateService::new(&storage, &alice);
        let rate = service.create(travel.id, "MAD", dec!(0.093)).unwrap();

        assert_eq!(service.find(travel.id, "mad").unwrap().unwrap().id, rate.id);
        assert_eq!(
            service.resolve(travel.id, &rate.id.to_string()).unwrap().id,
            rate.id
        );
        assert!(service.resolve(travel.id, "GBP").unwrap_err().is_not_found());
    }
}
