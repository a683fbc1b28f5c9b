//! Budget model
//!
//! A spending ceiling for one (category, item) pair. The pair is free text and
//! is not required to exist in the taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub category: String,
    pub item: String,

    /// Non-negative ceiling
    pub limit: Money,
}

impl Budget {
    pub fn new(
        id: BudgetId,
        category: impl Into<String>,
        item: impl Into<String>,
        limit: Money,
    ) -> Self {
        Self {
            id,
            category: category.into().trim().to_string(),
            item: item.into().trim().to_string(),
            limit,
        }
    }

    /// Check whether this budget covers the given pair
    pub fn matches(&self, category: &str, item: &str) -> bool {
        self.category == category && self.item == item
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        validate_limit(self.limit)
    }
}

/// Check that a limit is usable as a ceiling
pub fn validate_limit(limit: Money) -> Result<(), BudgetValidationError> {
    if limit.is_negative() {
        return Err(BudgetValidationError::NegativeLimit(limit));
    }
    Ok(())
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}: {}", self.category, self.item, self.limit)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeLimit(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLimit(limit) => {
                write!(f, "Budget limit must not be negative (got {})", limit)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
