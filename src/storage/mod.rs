//! Storage layer for the finance tracker
//!
//! Provides CSV and JSON file storage with atomic writes and automatic
//! directory creation. One `Storage` value owns every repository and is passed
//! by reference to the services.

pub mod budgets;
pub mod file_io;
pub mod init;
pub mod ledger;
pub mod sequence;
pub mod taxonomy;

pub use budgets::BudgetRepository;
pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use init::initialize_storage;
pub use ledger::LedgerRepository;
pub use sequence::SequenceRepository;
pub use taxonomy::{TaxonomyData, TaxonomyRepository};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TrackerPaths,
    pub ledger: LedgerRepository,
    pub taxonomy: TaxonomyRepository,
    pub budgets: BudgetRepository,
    pub sequence: SequenceRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerRepository::new(paths.ledger_file()),
            taxonomy: TaxonomyRepository::new(paths.taxonomy_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            sequence: SequenceRepository::new(paths.sequence_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TrackerError> {
        self.ledger.load()?;
        self.taxonomy.load()?;
        self.budgets.load()?;
        self.sequence.load()?;
        self.sequence
            .observe(self.ledger.max_id()?, self.budgets.max_id()?)?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), TrackerError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), TrackerError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), TrackerError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_import(
        &self,
        source: impl Into<String>,
        summary: impl Into<String>,
    ) -> Result<(), TrackerError> {
        self.audit.log(&AuditEntry::import(source, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Kind, Money, Transaction, TransactionDraft, TransactionId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("exports").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_load_all_raises_sequence_past_existing_ids() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        {
            let storage = Storage::new(paths.clone()).unwrap();
            let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
            storage
                .ledger
                .upsert(Transaction::from_draft(
                    TransactionId::from_raw(41),
                    TransactionDraft::new(date, Kind::Income, "Salary", Money::from_cents(1)),
                ))
                .unwrap();
            // Ledger only; no sequence file on disk
            storage.ledger.save().unwrap();
        }

        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        assert_eq!(storage.sequence.next_transaction_id().unwrap().get(), 42);
    }
}
