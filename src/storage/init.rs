//! Storage initialization
//!
//! Handles first-run setup and the starter taxonomy

use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::models::Vocabulary;

use super::file_io::write_json_atomic;
use super::taxonomy::TaxonomyData;

const DEFAULT_CATEGORIES: [&str; 6] = [
    "Salary",
    "Food",
    "Electricity",
    "Rent",
    "Transportation",
    "Entertainment",
];

const DEFAULT_ITEMS: [&str; 4] = ["Groceries", "Dining Out", "Utilities", "Fuel"];

/// Initialize storage for a fresh installation
///
/// Returns true if the starter taxonomy was written.
pub fn initialize_storage(paths: &TrackerPaths) -> Result<bool, TrackerError> {
    paths.ensure_directories()?;

    if paths.taxonomy_file().exists() {
        return Ok(false);
    }

    let data = TaxonomyData {
        categories: Vocabulary::from_names(DEFAULT_CATEGORIES),
        items: Vocabulary::from_names(DEFAULT_ITEMS),
    };
    write_json_atomic(paths.taxonomy_file(), &data)?;

    Ok(true)
}
