//! Category service
//!
//! The caller sees the system categories plus their own. Only their own can
//! be changed or deleted.

use chrono::Utc;
use std::collections::HashMap;
use tracing::info;

use crate::error::{TravelError, TravelResult};
use crate::models::{Category, CategoryId, UserId};
use crate::storage::{Repository, Storage};

/// Fields of a new category
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub name: String,
    pub icon: Option<String>,
    pub color_hex: Option<String>,
    pub sort_order: Option<i32>,
}

/// Changes to an existing category; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub icon: Option<Option<String>>,
    pub color_hex: Option<Option<String>>,
    pub sort_order: Option<i32>,
}

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
    user: &'a UserId,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage, user: &'a UserId) -> Self {
        Self { storage, user }
    }

    /// Categories visible to the caller, by sort order then name
    pub fn list(&self) -> TravelResult<Vec<Category>> {
        let mut categories = self
            .storage
            .categories
            .filter(|c| c.is_visible_to(self.user))?;
        categories.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(categories)
    }

    /// Display names of every category visible to the caller
    pub fn names(&self) -> TravelResult<HashMap<CategoryId, String>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect())
    }

    /// Get a visible category
    pub fn get(&self, id: CategoryId) -> TravelResult<Category> {
        match self.storage.categories.get(id)? {
            Some(category) if category.is_visible_to(self.user) => Ok(category),
            _ => Err(TravelError::category_not_found(id.to_string())),
        }
    }

    fn get_owned(&self, id: CategoryId) -> TravelResult<Category> {
        let category = self.get(id)?;
        if !category.is_owned_by(self.user) {
            return Err(TravelError::forbidden("Category", id.to_string()));
        }
        Ok(category)
    }

    /// Find a visible category by name or ID string
    ///
    /// When a custom category shares a name with a system one, the custom
    /// category wins.
    pub fn find(&self, identifier: &str) -> TravelResult<Option<Category>> {
        let identifier = identifier.trim();
        let name_lower = identifier.to_lowercase();
        let categories = self.list()?;

        let mut by_name: Vec<&Category> = categories
            .iter()
            .filter(|c| c.name.to_lowercase() == name_lower)
            .collect();
        by_name.sort_by_key(|c| c.is_system());
        if let Some(category) = by_name.first() {
            return Ok(Some((*category).clone()));
        }

        Ok(categories
            .into_iter()
            .find(|c| c.id.matches(identifier)))
    }

    /// Find a category or fail with a not-found error
    pub fn resolve(&self, identifier: &str) -> TravelResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| TravelError::category_not_found(identifier))
    }

    /// Create a category owned by the caller
    pub fn create(&self, input: NewCategory) -> TravelResult<Category> {
        let name = input.name.trim();
        if self.name_taken(name, None)? {
            return Err(TravelError::Validation(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let mut category = Category::owned(name, self.user.clone());
        category.icon = input.icon;
        category.color_hex = input.color_hex;
        category.sort_order = match input.sort_order {
            Some(order) => order,
            None => self.next_sort_order()?,
        };

        category
            .validate()
            .map_err(|e| TravelError::Validation(e.to_string()))?;

        self.storage.categories.insert(category.clone())?;
        self.storage.categories.save()?;
        info!(category = %category.id, name = %category.name, "Created category");

        Ok(category)
    }

    /// Apply changes to one of the caller's categories
    pub fn update(&self, id: CategoryId, changes: CategoryChanges) -> TravelResult<Category> {
        let mut category = self.get_owned(id)?;

        if let Some(name) = changes.name {
            let name = name.trim();
            if self.name_taken(name, Some(id))? {
                return Err(TravelError::Validation(format!(
                    "Category '{}' already exists",
                    name
                )));
            }
            category.name = name.to_string();
        }
        if let Some(icon) = changes.icon {
            category.icon = icon;
        }
        if let Some(color_hex) = changes.color_hex {
            category.color_hex = color_hex;
        }
        if let Some(sort_order) = changes.sort_order {
            category.sort_order = sort_order;
        }

        category
            .validate()
            .map_err(|e| TravelError::Validation(e.to_string()))?;

        category.updated_at = Utc::now();
        self.storage.categories.update(category.clone())?;
        self.storage.categories.save()?;
        info!(category = %category.id, "Updated category");

        Ok(category)
    }

    /// Delete one of the caller's categories
    ///
    /// Refused while any expense is filed under it.
    pub fn delete(&self, id: CategoryId) -> TravelResult<Category> {
        let category = self.get_owned(id)?;

        if self.storage.expenses.any(|e| e.category_id == id)? {
            return Err(TravelError::Validation(format!(
                "Category '{}' still has expenses",
                category.name
            )));
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;
        info!(category = %id, "Deleted category");

        Ok(category)
    }

    fn name_taken(&self, name: &str, except: Option<CategoryId>) -> TravelResult<bool> {
        let name_lower = name.to_lowercase();
        self.storage.categories.any(|c| {
            c.is_owned_by(self.user) && Some(c.id) != except && c.name.to_lowercase() == name_lower
        })
    }

    fn next_sort_order(&self) -> TravelResult<i32> {
        let categories = self.list()?;
        Ok(categories.iter().map(|c| c.sort_order).max().unwrap_or(-1) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TravelPaths;
    use crate::models::{Expense, TravelId};
    use crate::storage::initialize_storage;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TravelPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn souvenirs() -> NewCategory {
        NewCategory {
            name: "Souvenirs".into(),
            icon: Some("🎁".into()),
            color_hex: Some("#AA3366".into()),
            sort_order: None,
        }
    }

    #[test]
    fn test_list_includes_system_and_own() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        CategoryService::new(&storage, &alice)
            .create(souvenirs())
            .unwrap();

        let as_alice = CategoryService::new(&storage, &alice).list().unwrap();
        let as_bob = CategoryService::new(&storage, &bob).list().unwrap();
        assert_eq!(as_alice.len(), 7);
        assert_eq!(as_bob.len(), 6);
        assert_eq!(as_alice[0].name, "Food");
        assert_eq!(as_alice.last().unwrap().name, "Souvenirs");
    }

    #[test]
    fn test_create_rejects_duplicates_and_bad_colours() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = UserId::new("alice");
        let service = CategoryService::new(&storage, &alice);

        service.create(souvenirs()).unwrap();
        assert!(service.create(souvenirs()).unwrap_err().is_validation());

        let input = NewCategory {
            name: "Fees".into(),
            color_hex: Some("blue".into()),
            ..Default::default()
        };
        assert!(service.create(input).unwrap_err().is_validation());
    }

    #[test]
    fn test_system_categories_are_read_only() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = UserId::new("alice");
        let service = CategoryService::new(&storage, &alice);
        let food = service.resolve("food").unwrap();

        assert!(food.is_system());
        assert!(service
            .update(food.id, CategoryChanges::default())
            .unwrap_err()
            .is_forbidden());
        assert!(service.delete(food.id).unwrap_err().is_forbidden());
    }

    #[test]
    fn test_other_users_categories_are_hidden() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        let category = CategoryService::new(&storage, &alice)
            .create(souvenirs())
            .unwrap();

        let as_bob = CategoryService::new(&storage, &bob);
        assert!(as_bob.get(category.id).unwrap_err().is_not_found());
        assert!(as_bob.find("Souvenirs").unwrap().is_none());
        assert!(as_bob.delete(category.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_category() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = UserId::new("alice");
        let service = CategoryService::new(&storage, &alice);
        let category = service.create(souvenirs()).unwrap();

        let updated = service
            .update(
                category.id,
                CategoryChanges {
                    name: Some("Gifts".into()),
                    icon: Some(None),
                    sort_order: Some(-1),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Gifts");
        assert!(updated.icon.is_none());
        assert_eq!(service.list().unwrap()[0].name, "Gifts");
    }

    #[test]
    fn test_delete_refused_while_in_use() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = UserId::new("alice");
        let service = CategoryService::new(&storage, &alice);
        let category = service.create(souvenirs()).unwrap();

        let expense = Expense::new(
            TravelId::new(),
            category.id,
            alice.clone(),
            NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            "Rug",
            dec!(900),
            "MAD",
        );
        let expense_id = expense.id;
        storage.expenses.insert(expense).unwrap();

        assert!(service.delete(category.id).unwrap_err().is_validation());
        storage.expenses.delete(expense_id).unwrap();
        service.delete(category.id).unwrap();
        assert!(service.find("Souvenirs").unwrap().is_none());
    }

    #[test]
    fn test_custom_category_shadows_system_name() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = UserId::new("alice");
        let service = CategoryService::new(&storage, &alice);
        let own = service
            .create(NewCategory {
                name: "Food".into(),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(service.resolve("food").unwrap().id, own.id);
        assert_eq!(service.names().unwrap().len(), 7);
    }
}
