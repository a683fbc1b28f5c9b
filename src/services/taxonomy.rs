//! Taxonomy service
//!
//! Manages the category and item vocabularies. Whether renames cascade into
//! the ledger and budgets, and whether referenced names may be removed, is
//! decided by the `TaxonomyPolicy` from the settings.

use tracing::debug;

use crate::audit::EntityType;
use crate::config::TaxonomyPolicy;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{VocabularyError, VocabularyKind};
use crate::storage::Storage;

/// Service for vocabulary management
pub struct TaxonomyService<'a> {
    storage: &'a Storage,
    policy: TaxonomyPolicy,
}

impl<'a> TaxonomyService<'a> {
    pub fn new(storage: &'a Storage, policy: TaxonomyPolicy) -> Self {
        Self { storage, policy }
    }

    /// Append a name; returns false if it was already present
    pub fn add(&self, kind: VocabularyKind, name: &str) -> TrackerResult<bool> {
        let added = self
            .storage
            .taxonomy
            .modify(kind, |vocab| vocab.add(name).map_err(|e| map_error(kind, e)))?;

        if added {
            let name = name.trim();
            self.storage.taxonomy.save()?;
            debug!(%kind, name, "taxonomy name added");
            self.storage
                .log_create(entity_type(kind), name, None, &name)?;
        }

        Ok(added)
    }

    /// Rename in place, returning how many records were rewritten
    ///
    /// Referencing transactions and budgets are only rewritten when the
    /// policy asks for cascading renames.
    pub fn rename(&self, kind: VocabularyKind, old: &str, new: &str) -> TrackerResult<usize> {
        let new = new.trim();
        let previous = self
            .storage
            .taxonomy
            .modify(kind, |vocab| vocab.rename(old, new).map_err(|e| map_error(kind, e)))?;
        self.storage.taxonomy.save()?;

        let rewritten = if self.policy.cascade_renames && previous != new {
            self.cascade_rename(kind, &previous, new)?
        } else {
            0
        };

        debug!(%kind, old = %previous, new, rewritten, "taxonomy name renamed");

        self.storage.log_update(
            entity_type(kind),
            new,
            None,
            &previous,
            &new.to_string(),
            Some(format!(
                "renamed '{}' -> '{}' ({} record(s) rewritten)",
                previous, new, rewritten
            )),
        )?;

        Ok(rewritten)
    }

    /// Remove a name, shifting later names forward
    pub fn remove(&self, kind: VocabularyKind, name: &str) -> TrackerResult<()> {
        let name = name.trim();
        if !self.storage.taxonomy.get(kind)?.contains(name) {
            return Err(map_error(kind, VocabularyError::NotFound(name.to_string())));
        }

        if self.policy.protect_referenced {
            let references = self.references(kind, name)?;
            if references > 0 {
                return Err(TrackerError::InUse {
                    entity_type: kind.as_str(),
                    identifier: name.to_string(),
                    references,
                });
            }
        }

        let removed = self
            .storage
            .taxonomy
            .modify(kind, |vocab| vocab.remove(name).map_err(|e| map_error(kind, e)))?;
        self.storage.taxonomy.save()?;

        debug!(%kind, name = %removed, "taxonomy name removed");

        self.storage
            .log_delete(entity_type(kind), removed.as_str(), None, &removed)?;

        Ok(())
    }

    /// Names in insertion order
    pub fn list(&self, kind: VocabularyKind) -> TrackerResult<Vec<String>> {
        Ok(self.storage.taxonomy.get(kind)?.list().to_vec())
    }

    pub fn contains(&self, kind: VocabularyKind, name: &str) -> TrackerResult<bool> {
        Ok(self.storage.taxonomy.get(kind)?.contains(name.trim()))
    }

    /// Number of transactions and budgets that reference a name
    pub fn references(&self, kind: VocabularyKind, name: &str) -> TrackerResult<usize> {
        let transactions = self
            .storage
            .ledger
            .get_all()?
            .iter()
            .filter(|t| match kind {
                VocabularyKind::Category => t.category == name,
                VocabularyKind::Item => t.has_item(name),
            })
            .count();

        let budgets = self
            .storage
            .budgets
            .get_all()?
            .iter()
            .filter(|b| match kind {
                VocabularyKind::Category => b.category == name,
                VocabularyKind::Item => b.item == name,
            })
            .count();

        Ok(transactions + budgets)
    }

    fn cascade_rename(&self, kind: VocabularyKind, old: &str, new: &str) -> TrackerResult<usize> {
        let transactions = self.storage.ledger.update_where(|txn| match kind {
            VocabularyKind::Category if txn.category == old => {
                txn.category = new.to_string();
                true
            }
            VocabularyKind::Item if txn.has_item(old) => {
                txn.item = Some(new.to_string());
                true
            }
            _ => false,
        })?;

        let budgets = self.storage.budgets.update_where(|budget| match kind {
            VocabularyKind::Category if budget.category == old => {
                budget.category = new.to_string();
                true
            }
            VocabularyKind::Item if budget.item == old => {
                budget.item = new.to_string();
                true
            }
            _ => false,
        })?;

        if transactions > 0 {
            self.storage.ledger.save()?;
        }
        if budgets > 0 {
            self.storage.budgets.save()?;
        }

        Ok(transactions + budgets)
    }
}

fn entity_type(kind: VocabularyKind) -> EntityType {
    match kind {
        VocabularyKind::Category => EntityType::Category,
        VocabularyKind::Item => EntityType::Item,
    }
}

fn map_error(kind: VocabularyKind, err: VocabularyError) -> TrackerError {
    match err {
        VocabularyError::EmptyName => {
            TrackerError::Validation(format!("{} name cannot be empty", kind))
        }
        VocabularyError::NotFound(name) => TrackerError::NotFound {
            entity_type: kind.as_str(),
            identifier: name,
        },
        VocabularyError::Duplicate(name) => TrackerError::Duplicate {
            entity_type: kind.as_str(),
            identifier: name,
        },
    }
}
