//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to data/budgets.json. Budget ids are
//! issued in creation order, so id order is registry order.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TrackerError;
use crate::models::{Budget, BudgetId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<BTreeMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.id, budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = BudgetData {
            budgets: budgets.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(&id).cloned())
    }

    /// Get all budgets in registry order
    pub fn get_all(&self) -> Result<Vec<Budget>, TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.values().cloned().collect())
    }

    /// Budgets covering one (category, item) pair
    pub fn find_by_pair(&self, category: &str, item: &str) -> Result<Vec<Budget>, TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets
            .values()
            .filter(|b| b.matches(category, item))
            .cloned()
            .collect())
    }

    pub fn upsert(&self, budget: Budget) -> Result<(), TrackerError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.insert(budget.id, budget);
        Ok(())
    }

    pub fn delete(&self, id: BudgetId) -> Result<Option<Budget>, TrackerError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(budgets.remove(&id))
    }

    /// Apply a change to every budget, returning how many changed
    pub fn update_where<F>(&self, mut change: F) -> Result<usize, TrackerError>
    where
        F: FnMut(&mut Budget) -> bool,
    {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut changed = 0;
        for budget in budgets.values_mut() {
            if change(budget) {
                changed += 1;
            }
        }
        Ok(changed)
    }

    pub fn max_id(&self) -> Result<Option<BudgetId>, TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.keys().next_back().copied())
    }

    pub fn count(&self) -> Result<usize, TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn budget(id: u64, category: &str, item: &str, cents: i64) -> Budget {
        Budget::new(BudgetId::from_raw(id), category, item, Money::from_cents(cents))
    }

    #[test]
    fn test_save_and_reload_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.json");
        let repo = BudgetRepository::new(path.clone());

        repo.upsert(budget(2, "Utilities", "Electricity", 5000)).unwrap();
        repo.upsert(budget(1, "Food", "Groceries", 10000)).unwrap();
        repo.save().unwrap();

        let repo2 = BudgetRepository::new(path);
        repo2.load().unwrap();
        let all = repo2.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].category, "Food");
        assert_eq!(all[1].category, "Utilities");
    }

    #[test]
    fn test_find_by_pair() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));

        repo.upsert(budget(1, "Food", "Groceries", 10000)).unwrap();
        repo.upsert(budget(2, "Food", "Snacks", 2000)).unwrap();
        repo.upsert(budget(3, "Food", "Groceries", 5000)).unwrap();

        assert_eq!(repo.find_by_pair("Food", "Groceries").unwrap().len(), 2);
        assert!(repo.find_by_pair("Food", "Coffee").unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));

        repo.upsert(budget(1, "Food", "Groceries", 10000)).unwrap();
        assert!(repo.delete(BudgetId::from_raw(1)).unwrap().is_some());
        assert_eq!(repo.count().unwrap(), 0);
        assert_eq!(repo.max_id().unwrap(), None);
    }
}
