//! Storage layer for travel-expenses
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. One file per entity type.

pub mod file_io;
pub mod init;
pub mod repository;

pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use repository::{Entity, JsonRepository, Repository};

use crate::config::paths::{DataFile, TravelPaths};
use crate::error::TravelError;
use crate::models::{Category, CurrencyRate, Expense, Travel};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TravelPaths,
    pub travels: JsonRepository<Travel>,
    pub expenses: JsonRepository<Expense>,
    pub categories: JsonRepository<Category>,
    pub rates: JsonRepository<CurrencyRate>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TravelPaths) -> Result<Self, TravelError> {
        paths.ensure_directories()?;

        Ok(Self {
            travels: JsonRepository::new(paths.entity_file(DataFile::Travels)),
            expenses: JsonRepository::new(paths.entity_file(DataFile::Expenses)),
            categories: JsonRepository::new(paths.entity_file(DataFile::Categories)),
            rates: JsonRepository::new(paths.entity_file(DataFile::CurrencyRates)),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TravelPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), TravelError> {
        self.travels.load()?;
        self.expenses.load()?;
        self.categories.load()?;
        self.rates.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), TravelError> {
        self.travels.save()?;
        self.expenses.save()?;
        self.categories.save()?;
        self.rates.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
