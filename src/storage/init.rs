//! First-run setup of the data directory

use tracing::info;

use crate::config::paths::{DataFile, TravelPaths};
use crate::error::TravelResult;
use crate::models::{Category, DEFAULT_CATEGORIES};

use super::file_io::write_json_atomic;

/// Create the data directory and seed the system categories.
///
/// Returns how many categories were seeded; zero when the category file
/// already exists, so running `init` twice keeps user data.
pub fn initialize_storage(paths: &TravelPaths) -> TravelResult<usize> {
    paths.ensure_directories()?;
    if paths.is_initialized() {
        return Ok(0);
    }

    let categories = system_categories();
    write_json_atomic(paths.entity_file(DataFile::Categories), &categories)?;
    info!(count = categories.len(), "Seeded system categories");
    Ok(categories.len())
}

fn system_categories() -> Vec<Category> {
    let mut categories = Vec::with_capacity(DEFAULT_CATEGORIES.len());
    for (order, (name, icon, color)) in DEFAULT_CATEGORIES.iter().enumerate() {
        categories.push(
            Category::system(*name, order as i32)
                .with_icon(*icon)
                .with_color(*color),
        );
    }
    categories
}
