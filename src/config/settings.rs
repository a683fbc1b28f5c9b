//! User settings for the finance tracker
//!
//! Besides display preferences, the settings carry the referential-integrity
//! policies for the taxonomy and the budget registry.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;

/// How the taxonomy treats records that reference a category or item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaxonomyPolicy {
    /// Rewrite referencing transactions and budgets when a name is renamed
    #[serde(default)]
    pub cascade_renames: bool,

    /// Refuse to remove a name that is still referenced
    #[serde(default)]
    pub protect_referenced: bool,
}

/// How the budget registry treats repeated (category, item) pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BudgetPolicy {
    /// Fail `set` when the pair already has a budget
    #[serde(default)]
    pub reject_duplicates: bool,
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol prefixed to amounts in terminal output
    #[serde(default)]
    pub currency_symbol: String,

    /// Date format preference (strftime format) for terminal output
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub taxonomy: TaxonomyPolicy,

    #[serde(default)]
    pub budgets: BudgetPolicy,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: String::new(),
            date_format: default_date_format(),
            taxonomy: TaxonomyPolicy::default(),
            budgets: BudgetPolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Keys accepted by `set`
    pub const KEYS: [&'static str; 5] = [
        "currency_symbol",
        "date_format",
        "taxonomy.cascade_renames",
        "taxonomy.protect_referenced",
        "budgets.reject_duplicates",
    ];

    /// Change one setting by its dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        let flag = || {
            value.trim().parse::<bool>().map_err(|_| {
                TrackerError::Config(format!("'{}' expects true or false, got '{}'", key, value))
            })
        };

        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "date_format" => {
                if value.trim().is_empty() {
                    return Err(TrackerError::Config("date_format cannot be empty".into()));
                }
                self.date_format = value.to_string();
            }
            "taxonomy.cascade_renames" => self.taxonomy.cascade_renames = flag()?,
            "taxonomy.protect_referenced" => self.taxonomy.protect_referenced = flag()?,
            "budgets.reject_duplicates" => self.budgets.reject_duplicates = flag()?,
            _ => {
                return Err(TrackerError::Config(format!(
                    "Unknown setting '{}'. Known settings: {}",
                    key,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert!(!settings.taxonomy.cascade_renames);
        assert!(!settings.taxonomy.protect_referenced);
        assert!(!settings.budgets.reject_duplicates);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.taxonomy.cascade_renames = true;
        settings.budgets.reject_duplicates = true;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.taxonomy.cascade_renames);
        assert!(loaded.budgets.reject_duplicates);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.date_format, "%Y-%m-%d");
        assert!(!loaded.taxonomy.protect_referenced);
    }

    #[test]
    fn test_set_by_key() {
        let mut settings = Settings::default();
        settings.set("taxonomy.cascade_renames", "true").unwrap();
        settings.set("currency_symbol", "$").unwrap();
        assert!(settings.taxonomy.cascade_renames);
        assert_eq!(settings.currency_symbol, "$");

        assert!(settings.set("budgets.reject_duplicates", "yes").is_err());
        assert!(settings.set("date_format", " ").is_err());
        assert!(settings.set("colour", "red").is_err());
    }
}
