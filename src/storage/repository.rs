//! Generic repository over JSON entity files
//!
//! Every entity file holds a JSON array. The whole file is loaded into memory
//! and rewritten on save.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{TravelError, TravelResult};
use crate::models::{
    Category, CategoryId, CurrencyRate, CurrencyRateId, Expense, ExpenseId, Travel, TravelId,
};

use super::file_io::{read_json, write_json_atomic};

/// A persisted record with a typed id
pub trait Entity: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Ord + Hash + fmt::Display;

    /// Name used in error messages
    const ENTITY_NAME: &'static str;

    fn id(&self) -> Self::Id;
}

/// Basic persistence operations shared by every entity
pub trait Repository<T: Entity> {
    fn get(&self, id: T::Id) -> TravelResult<Option<T>>;

    /// All entities, ordered by id
    fn list(&self) -> TravelResult<Vec<T>>;

    /// Add a new entity; fails if the id is taken
    fn insert(&self, entity: T) -> TravelResult<()>;

    /// Replace an existing entity; fails if it doesn't exist
    fn update(&self, entity: T) -> TravelResult<()>;

    /// Remove an entity, returning whether it existed
    fn delete(&self, id: T::Id) -> TravelResult<bool>;

    /// Fetch an entity or fail with a not-found error
    fn get_required(&self, id: T::Id) -> TravelResult<T> {
        self.get(id)?.ok_or_else(|| TravelError::not_found(T::ENTITY_NAME, id.to_string()))
    }
}

/// In-memory map of entities backed by one JSON file
pub struct JsonRepository<T: Entity> {
    path: PathBuf,
    items: RwLock<HashMap<T::Id, T>>,
}

impl<T: Entity> JsonRepository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Load entities from disk, replacing what is in memory
    pub fn load(&self) -> TravelResult<()> {
        let file_data: Vec<T> = read_json(&self.path)?;

        let mut items = self.write_lock()?;
        items.clear();
        for item in file_data {
            items.insert(item.id(), item);
        }

        Ok(())
    }

    /// Save entities to disk, ordered by id
    pub fn save(&self) -> TravelResult<()> {
        let items = self.read_lock()?;
        let mut list: Vec<&T> = items.values().collect();
        list.sort_by_key(|item| item.id());
        write_json_atomic(&self.path, &list)
    }

    /// All entities matching a predicate, ordered by id
    pub fn filter<F>(&self, predicate: F) -> TravelResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        let items = self.read_lock()?;
        let mut list: Vec<T> = items.values().filter(|item| predicate(item)).cloned().collect();
        list.sort_by_key(|item| item.id());
        Ok(list)
    }

    /// Whether any entity matches a predicate
    pub fn any<F>(&self, predicate: F) -> TravelResult<bool>
    where
        F: Fn(&T) -> bool,
    {
        let items = self.read_lock()?;
        Ok(items.values().any(predicate))
    }

    /// Remove every entity matching a predicate, returning how many went
    pub fn delete_where<F>(&self, predicate: F) -> TravelResult<usize>
    where
        F: Fn(&T) -> bool,
    {
        let mut items = self.write_lock()?;
        let before = items.len();
        items.retain(|_, item| !predicate(item));
        Ok(before - items.len())
    }

    pub fn count(&self) -> TravelResult<usize> {
        Ok(self.read_lock()?.len())
    }

    fn read_lock(&self) -> TravelResult<RwLockReadGuard<'_, HashMap<T::Id, T>>> {
        self.items
            .read()
            .map_err(|e| TravelError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_lock(&self) -> TravelResult<RwLockWriteGuard<'_, HashMap<T::Id, T>>> {
        self.items
            .write()
            .map_err(|e| TravelError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

impl<T: Entity> Repository<T> for JsonRepository<T> {
    fn get(&self, id: T::Id) -> TravelResult<Option<T>> {
        Ok(self.read_lock()?.get(&id).cloned())
    }

    fn list(&self) -> TravelResult<Vec<T>> {
        self.filter(|_| true)
    }

    fn insert(&self, entity: T) -> TravelResult<()> {
        let mut items = self.write_lock()?;
        let id = entity.id();
        if items.contains_key(&id) {
            return Err(TravelError::Storage(format!(
                "{} {} already exists",
                T::ENTITY_NAME,
                id
            )));
        }
        items.insert(id, entity);
        Ok(())
    }

    fn update(&self, entity: T) -> TravelResult<()> {
        let mut items = self.write_lock()?;
        let id = entity.id();
        match items.get_mut(&id) {
            Some(existing) => {
                *existing = entity;
                Ok(())
            }
            None => Err(TravelError::not_found(T::ENTITY_NAME, id.to_string())),
        }
    }

    fn delete(&self, id: T::Id) -> TravelResult<bool> {
        Ok(self.write_lock()?.remove(&id).is_some())
    }
}

impl Entity for Travel {
    type Id = TravelId;
    const ENTITY_NAME: &'static str = "Travel";

    fn id(&self) -> TravelId {
        self.id
    }
}

impl Entity for Expense {
    type Id = ExpenseId;
    const ENTITY_NAME: &'static str = "Expense";

    fn id(&self) -> ExpenseId {
        self.id
    }
}

impl Entity for Category {
    type Id = CategoryId;
    const ENTITY_NAME: &'static str = "Category";

    fn id(&self) -> CategoryId {
        self.id
    }
}

impl Entity for CurrencyRate {
    type Id = CurrencyRateId;
    const ENTITY_NAME: &'static str = "Currency Rate";

    fn id(&self) -> CurrencyRateId {
        self.id
    }
}
