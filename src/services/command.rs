//! Explicit command handlers
//!
//! Every user action that mutates state is one `Command` variant. The
//! presentation layer builds a command and calls `execute`, which routes it to
//! the owning service and reports either an `Outcome` or the specific error.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    BudgetId, Money, TransactionDraft, TransactionId, TransactionPatch, VocabularyKind,
};
use crate::storage::Storage;

use super::budget::BudgetService;
use super::ledger::LedgerService;
use super::taxonomy::TaxonomyService;

/// A state-changing user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTransaction(TransactionDraft),
    UpdateTransaction {
        id: TransactionId,
        patch: TransactionPatch,
    },
    DeleteTransaction(TransactionId),
    AddCategory(String),
    RenameCategory {
        old: String,
        new: String,
    },
    RemoveCategory(String),
    AddItem(String),
    RenameItem {
        old: String,
        new: String,
    },
    RemoveItem(String),
    SetBudget {
        category: String,
        item: String,
        limit: Money,
    },
    UpdateBudget {
        id: BudgetId,
        limit: Money,
    },
    DeleteBudget(BudgetId),
}

impl Command {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTransaction(_) => "add-transaction",
            Self::UpdateTransaction { .. } => "update-transaction",
            Self::DeleteTransaction(_) => "delete-transaction",
            Self::AddCategory(_) => "add-category",
            Self::RenameCategory { .. } => "rename-category",
            Self::RemoveCategory(_) => "remove-category",
            Self::AddItem(_) => "add-item",
            Self::RenameItem { .. } => "rename-item",
            Self::RemoveItem(_) => "remove-item",
            Self::SetBudget { .. } => "set-budget",
            Self::UpdateBudget { .. } => "update-budget",
            Self::DeleteBudget(_) => "delete-budget",
        }
    }
}

/// What a successful command reports back: a message for the user and,
/// optionally, the affected record as structured data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    message: String,
    structure: Option<Value>,
}

impl Outcome {
    pub fn new<S, T>(message: S, structure: &T) -> Self
    where
        S: Into<String>,
        T: Serialize,
    {
        Self {
            message: message.into(),
            structure: serde_json::to_value(structure).ok(),
        }
    }

    pub fn new_message<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&Value> {
        self.structure.as_ref()
    }
}

impl<S> From<S> for Outcome
where
    S: Into<String>,
{
    fn from(message: S) -> Self {
        Self::new_message(message)
    }
}

/// Run a command against the store
pub fn execute(storage: &Storage, settings: &Settings, command: Command) -> TrackerResult<Outcome> {
    debug!(command = command.name(), "executing");

    let ledger = LedgerService::new(storage);
    let taxonomy = TaxonomyService::new(storage, settings.taxonomy);
    let budgets = BudgetService::new(storage, settings.budgets);

    match command {
        Command::AddTransaction(draft) => {
            let id = ledger.add(draft)?;
            let txn = ledger
                .get(id)?
                .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?;
            Ok(Outcome::new(format!("Added transaction {}", id), &txn))
        }
        Command::UpdateTransaction { id, patch } => {
            let txn = ledger.update(id, patch)?;
            Ok(Outcome::new(format!("Updated transaction {}", id), &txn))
        }
        Command::DeleteTransaction(id) => {
            let txn = ledger.delete(id)?;
            Ok(Outcome::new(format!("Deleted transaction {}", id), &txn))
        }
        Command::AddCategory(name) => add_name(&taxonomy, VocabularyKind::Category, &name),
        Command::RenameCategory { old, new } => {
            rename_name(&taxonomy, VocabularyKind::Category, &old, &new)
        }
        Command::RemoveCategory(name) => remove_name(&taxonomy, VocabularyKind::Category, &name),
        Command::AddItem(name) => add_name(&taxonomy, VocabularyKind::Item, &name),
        Command::RenameItem { old, new } => {
            rename_name(&taxonomy, VocabularyKind::Item, &old, &new)
        }
        Command::RemoveItem(name) => remove_name(&taxonomy, VocabularyKind::Item, &name),
        Command::SetBudget {
            category,
            item,
            limit,
        } => {
            let budget = budgets.set(&category, &item, limit)?;
            Ok(Outcome::new(
                format!(
                    "Set budget {} for {} / {}: {}",
                    budget.id, budget.category, budget.item, budget.limit
                ),
                &budget,
            ))
        }
        Command::UpdateBudget { id, limit } => {
            let budget = budgets.update_limit(id, limit)?;
            Ok(Outcome::new(
                format!("Updated budget {} limit to {}", id, budget.limit),
                &budget,
            ))
        }
        Command::DeleteBudget(id) => {
            let budget = budgets.delete(id)?;
            Ok(Outcome::new(format!("Deleted budget {}", id), &budget))
        }
    }
}

fn add_name(
    service: &TaxonomyService<'_>,
    kind: VocabularyKind,
    name: &str,
) -> TrackerResult<Outcome> {
    let name = name.trim();
    if service.add(kind, name)? {
        Ok(Outcome::new_message(format!("Added {} '{}'", kind_label(kind), name)))
    } else {
        Ok(Outcome::new_message(format!("Already listed: {} '{}'", kind_label(kind), name)))
    }
}

fn rename_name(
    service: &TaxonomyService<'_>,
    kind: VocabularyKind,
    old: &str,
    new: &str,
) -> TrackerResult<Outcome> {
    let rewritten = service.rename(kind, old, new)?;
    let mut message = format!("Renamed {} '{}' to '{}'", kind_label(kind), old.trim(), new.trim());
    if rewritten > 0 {
        message.push_str(&format!(" ({} record(s) updated)", rewritten));
    }
    Ok(Outcome::new_message(message))
}

fn remove_name(
    service: &TaxonomyService<'_>,
    kind: VocabularyKind,
    name: &str,
) -> TrackerResult<Outcome> {
    service.remove(kind, name)?;
    Ok(Outcome::new_message(format!(
        "Removed {} '{}'",
        kind_label(kind),
        name.trim()
    )))
}

fn kind_label(kind: VocabularyKind) -> &'static str {
    match kind {
        VocabularyKind::Category => "category",
        VocabularyKind::Item => "item",
    }
}
