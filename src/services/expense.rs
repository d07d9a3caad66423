//! Expense service
//!
//! Expenses can only be filed on the caller's own travels, under a category
//! the caller can see.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{TravelError, TravelResult};
use crate::models::{
    normalize_currency_code, CategoryId, Expense, ExpenseId, Travel, TravelId, UserId,
};
use crate::storage::{Repository, Storage};

use super::travel::TravelService;

/// Fields of a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub travel_id: TravelId,
    pub category_id: CategoryId,
    pub date: NaiveDate,
    pub name: String,
    pub amount: Decimal,
    /// Defaults to the travel currency
    pub currency_code: Option<String>,
    pub description: Option<String>,
}

/// Changes to an existing expense; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct ExpenseChanges {
    pub travel_id: Option<TravelId>,
    pub category_id: Option<CategoryId>,
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub currency_code: Option<String>,
    pub description: Option<Option<String>>,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    user: &'a UserId,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage, user: &'a UserId) -> Self {
        Self { storage, user }
    }

    fn travels(&self) -> TravelService<'a> {
        TravelService::new(self.storage, self.user)
    }

    fn check_category(&self, category_id: CategoryId) -> TravelResult<()> {
        match self.storage.categories.get(category_id)? {
            Some(category) if category.is_visible_to(self.user) => Ok(()),
            _ => Err(TravelError::category_not_found(category_id.to_string())),
        }
    }

    /// Record an expense on one of the caller's travels
    pub fn create(&self, input: NewExpense) -> TravelResult<Expense> {
        let travel = self.travels().get_owned(input.travel_id)?;
        self.check_category(input.category_id)?;

        let currency_code = input
            .currency_code
            .as_deref()
            .map(normalize_currency_code)
            .unwrap_or_else(|| travel.travel_currency_code.clone());

        let mut expense = Expense::new(
            travel.id,
            input.category_id,
            self.user.clone(),
            input.date,
            input.name.trim(),
            input.amount,
            currency_code,
        );
        expense.description = input.description.filter(|d| !d.trim().is_empty());

        expense
            .validate()
            .map_err(|e| TravelError::Validation(e.to_string()))?;

        self.storage.expenses.insert(expense.clone())?;
        self.storage.expenses.save()?;
        info!(expense = %expense.id, travel = %travel.id, "Created expense");

        Ok(expense)
    }

    /// Get one of the caller's expenses
    pub fn get(&self, id: ExpenseId) -> TravelResult<Expense> {
        match self.storage.expenses.get(id)? {
            Some(expense) if expense.is_owned_by(self.user) => Ok(expense),
            _ => Err(TravelError::expense_not_found(id.to_string())),
        }
    }

    fn get_owned(&self, id: ExpenseId) -> TravelResult<Expense> {
        let expense = self.storage.expenses.get_required(id)?;
        if !expense.is_owned_by(self.user) {
            return Err(TravelError::forbidden("Expense", id.to_string()));
        }
        Ok(expense)
    }

    /// Find an expense by ID string, within one travel when given
    pub fn find(&self, identifier: &str, travel: Option<&Travel>) -> TravelResult<Option<Expense>> {
        let identifier = identifier.trim();
        let candidates = match travel {
            Some(travel) => self.list_for_travel(travel.id)?,
            None => self.list_all()?,
        };

        Ok(candidates
            .into_iter()
            .find(|e| e.id.matches(identifier)))
    }

    /// Expenses of one of the caller's travels, by date
    pub fn list_for_travel(&self, travel_id: TravelId) -> TravelResult<Vec<Expense>> {
        self.travels().get_owned(travel_id)?;
        let mut expenses = self.storage.expenses.filter(|e| e.travel_id == travel_id)?;
        sort_by_date(&mut expenses);
        Ok(expenses)
    }

    /// Every expense of the caller, by date
    pub fn list_all(&self) -> TravelResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses.filter(|e| e.is_owned_by(self.user))?;
        sort_by_date(&mut expenses);
        Ok(expenses)
    }

    /// Apply changes to an expense
    ///
    /// Moving an expense requires owning the target travel.
    pub fn update(&self, id: ExpenseId, changes: ExpenseChanges) -> TravelResult<Expense> {
        let mut expense = self.get_owned(id)?;

        if let Some(travel_id) = changes.travel_id {
            if travel_id != expense.travel_id {
                match self.storage.travels.get(travel_id)? {
                    Some(travel) if travel.is_owned_by(self.user) => {}
                    _ => {
                        return Err(TravelError::Validation(format!(
                            "Invalid travel: {}",
                            travel_id
                        )))
                    }
                }
                expense.travel_id = travel_id;
            }
        }
        if let Some(category_id) = changes.category_id {
            self.check_category(category_id)?;
            expense.category_id = category_id;
        }
        if let Some(date) = changes.date {
            expense.date = date;
        }
        if let Some(name) = changes.name {
            expense.name = name.trim().to_string();
        }
        if let Some(amount) = changes.amount {
            expense.amount = amount;
        }
        if let Some(code) = changes.currency_code {
            expense.currency_code = normalize_currency_code(&code);
        }
        if let Some(description) = changes.description {
            expense.description = description.filter(|d| !d.trim().is_empty());
        }

        expense
            .validate()
            .map_err(|e| TravelError::Validation(e.to_string()))?;

        expense.updated_at = Utc::now();
        self.storage.expenses.update(expense.clone())?;
        self.storage.expenses.save()?;
        info!(expense = %expense.id, "Updated expense");

        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> TravelResult<Expense> {
        let expense = self.get_owned(id)?;
        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;
        info!(expense = %id, "Deleted expense");
        Ok(expense)
    }
}

fn sort_by_date(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TravelPaths;
    use crate::models::Category;
    use crate::services::travel::NewTravel;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        storage: Storage,
        alice: UserId,
        bob: UserId,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let paths = TravelPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        Fixture {
            _temp_dir: temp_dir,
            storage,
            alice: UserId::new("alice"),
            bob: UserId::new("bob"),
        }
    }

    fn travel_for(f: &Fixture, user: &UserId, name: &str) -> Travel {
        let input = NewTravel {
            name: name.into(),
            home_currency_code: "EUR".into(),
            travel_currency_code: "MAD".into(),
            ..Default::default()
        };
        TravelService::new(&f.storage, user)
            .create(input, None)
            .unwrap()
            .0
    }

    fn system_category(f: &Fixture) -> CategoryId {
        let category = Category::system("Food", 0);
        let id = category.id;
        f.storage.categories.insert(category).unwrap();
        id
    }

    fn new_expense(travel_id: TravelId, category_id: CategoryId) -> NewExpense {
        NewExpense {
            travel_id,
            category_id,
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            name: "Tagine".into(),
            amount: dec!(120),
            currency_code: None,
            description: None,
        }
    }

    #[test]
    fn test_create_defaults_to_travel_currency() {
        let f = fixture();
        let travel = travel_for(&f, &f.alice, "Morocco");
        let food = system_category(&f);
        let service = ExpenseService::new(&f.storage, &f.alice);

        let expense = service.create(new_expense(travel.id, food)).unwrap();
        assert_eq!(expense.currency_code, "MAD");
        assert_eq!(expense.user_id, f.alice);

        let mut input = new_expense(travel.id, food);
        input.currency_code = Some("eur".into());
        assert_eq!(service.create(input).unwrap().currency_code, "EUR");
        assert_eq!(service.list_for_travel(travel.id).unwrap().len(), 2);
    }

    #[test]
    fn test_create_requires_own_travel() {
        let f = fixture();
        let travel = travel_for(&f, &f.alice, "Morocco");
        let food = system_category(&f);

        let as_bob = ExpenseService::new(&f.storage, &f.bob);
        let err = as_bob.create(new_expense(travel.id, food)).unwrap_err();
        assert!(err.is_forbidden());

        let err = as_bob.create(new_expense(TravelId::new(), food)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_requires_visible_category() {
        let f = fixture();
        let travel = travel_for(&f, &f.alice, "Morocco");
        let bobs = Category::owned("Bob's", f.bob.clone());
        let bobs_id = bobs.id;
        f.storage.categories.insert(bobs).unwrap();

        let service = ExpenseService::new(&f.storage, &f.alice);
        let err = service.create(new_expense(travel.id, bobs_id)).unwrap_err();
        assert!(err.is_not_found());
        let err = service
            .create(new_expense(travel.id, CategoryId::new()))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_and_delete_respect_owner() {
        let f = fixture();
        let travel = travel_for(&f, &f.alice, "Morocco");
        let food = system_category(&f);
        let expense = ExpenseService::new(&f.storage, &f.alice)
            .create(new_expense(travel.id, food))
            .unwrap();

        let as_bob = ExpenseService::new(&f.storage, &f.bob);
        assert!(as_bob.get(expense.id).unwrap_err().is_not_found());
        assert!(as_bob.delete(expense.id).unwrap_err().is_forbidden());
        assert!(as_bob.list_all().unwrap().is_empty());

        let service = ExpenseService::new(&f.storage, &f.alice);
        service.delete(expense.id).unwrap();
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_moves_only_to_own_travel() {
        let f = fixture();
        let morocco = travel_for(&f, &f.alice, "Morocco");
        let japan = travel_for(&f, &f.alice, "Japan");
        let bobs = travel_for(&f, &f.bob, "Chile");
        let food = system_category(&f);
        let service = ExpenseService::new(&f.storage, &f.alice);
        let expense = service.create(new_expense(morocco.id, food)).unwrap();

        let err = service
            .update(
                expense.id,
                ExpenseChanges {
                    travel_id: Some(bobs.id),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());

        let moved = service
            .update(
                expense.id,
                ExpenseChanges {
                    travel_id: Some(japan.id),
                    amount: Some(dec!(-20)),
                    description: Some(Some("refund".into())),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(moved.travel_id, japan.id);
        assert_eq!(moved.amount, dec!(-20));
        assert_eq!(moved.description.as_deref(), Some("refund"));
    }

    #[test]
    fn test_find_by_id_string() {
        let f = fixture();
        let travel = travel_for(&f, &f.alice, "Morocco");
        let food = system_category(&f);
        let service = ExpenseService::new(&f.storage, &f.alice);
        let expense = service.create(new_expense(travel.id, food)).unwrap();

        let found = service.find(&expense.id.to_string(), Some(&travel)).unwrap();
        assert_eq!(found.map(|e| e.id), Some(expense.id));
        assert!(service.find("exp-00000000", None).unwrap().is_none());
    }
}
