//! Budget service
//!
//! Maintains the budget registry: ceilings for (category, item) pairs, kept
//! in creation order.

use tracing::debug;

use crate::audit::{diff_entities, EntityType};
use crate::config::BudgetPolicy;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{validate_limit, Budget, BudgetId, Money};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
    policy: BudgetPolicy,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage, policy: BudgetPolicy) -> Self {
        Self { storage, policy }
    }

    /// Append a budget for a pair
    ///
    /// Repeated pairs are kept unless the policy rejects duplicates.
    pub fn set(&self, category: &str, item: &str, limit: Money) -> TrackerResult<Budget> {
        validate_limit(limit).map_err(|e| TrackerError::Validation(e.to_string()))?;

        let category = category.trim();
        let item = item.trim();

        if self.policy.reject_duplicates
            && !self.storage.budgets.find_by_pair(category, item)?.is_empty()
        {
            return Err(TrackerError::Duplicate {
                entity_type: "Budget",
                identifier: format!("{} / {}", category, item),
            });
        }

        let id = self.storage.sequence.next_budget_id()?;
        let budget = Budget::new(id, category, item, limit);

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;
        self.storage.sequence.save()?;

        debug!(id = %id, category, item, limit = %limit, "budget set");

        self.storage.log_create(
            EntityType::Budget,
            id.to_string(),
            Some(format!("{} / {}", category, item)),
            &budget,
        )?;

        Ok(budget)
    }

    /// Budgets in registry order
    pub fn list(&self) -> TrackerResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    pub fn get(&self, id: BudgetId) -> TrackerResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    pub fn update_limit(&self, id: BudgetId, limit: Money) -> TrackerResult<Budget> {
        validate_limit(limit).map_err(|e| TrackerError::Validation(e.to_string()))?;

        let before = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| TrackerError::budget_not_found(id.to_string()))?;

        let mut budget = before.clone();
        budget.limit = limit;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        debug!(id = %id, limit = %limit, "budget limit updated");

        self.storage.log_update(
            EntityType::Budget,
            id.to_string(),
            Some(format!("{} / {}", budget.category, budget.item)),
            &before,
            &budget,
            diff_entities(&before, &budget),
        )?;

        Ok(budget)
    }

    pub fn delete(&self, id: BudgetId) -> TrackerResult<Budget> {
        let budget = self
            .storage
            .budgets
            .delete(id)?
            .ok_or_else(|| TrackerError::budget_not_found(id.to_string()))?;

        self.storage.budgets.save()?;

        debug!(id = %id, "budget deleted");

        self.storage.log_delete(
            EntityType::Budget,
            id.to_string(),
            Some(format!("{} / {}", budget.category, budget.item)),
            &budget,
        )?;

        Ok(budget)
    }
}
