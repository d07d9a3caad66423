//! Location of the settings and data files
//!
//! The base directory comes from `TRAVEX_DATA_DIR` when it is set and not
//! blank, otherwise from the platform config directory for `travex`, and
//! finally `./.travex` on systems without a home directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{TravelError, TravelResult};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "TRAVEX_DATA_DIR";

/// One JSON file per entity collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFile {
    Travels,
    Expenses,
    Categories,
    CurrencyRates,
}

impl DataFile {
    pub const ALL: [DataFile; 4] = [
        DataFile::Travels,
        DataFile::Expenses,
        DataFile::Categories,
        DataFile::CurrencyRates,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            DataFile::Travels => "travels.json",
            DataFile::Expenses => "expenses.json",
            DataFile::Categories => "categories.json",
            DataFile::CurrencyRates => "currency_rates.json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TravelPaths {
    base_dir: PathBuf,
}

impl TravelPaths {
    /// Resolve the base directory from `TRAVEX_DATA_DIR` or the platform default
    pub fn new() -> TravelResult<Self> {
        Ok(Self::from_override(std::env::var(DATA_DIR_ENV).ok()))
    }

    fn from_override(value: Option<String>) -> Self {
        let base_dir = value
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(platform_dir);
        Self { base_dir }
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn entity_file(&self, file: DataFile) -> PathBuf {
        self.data_dir().join(file.file_name())
    }

    pub fn ensure_directories(&self) -> TravelResult<()> {
        let data_dir = self.data_dir();
        std::fs::create_dir_all(&data_dir).map_err(|e| {
            TravelError::Io(format!("Cannot create {}: {}", data_dir.display(), e))
        })
    }

    /// `travex init` has seeded the system categories
    pub fn is_initialized(&self) -> bool {
        self.entity_file(DataFile::Categories).exists()
    }
}

fn platform_dir() -> PathBuf {
    match ProjectDirs::from("", "", "travex") {
        Some(dirs) => dirs.config_dir().to_path_buf(),
        None => PathBuf::from(".travex"),
    }
}
