//! Id sequence for JSON storage
//!
//! Keeps the next transaction and budget ids in data/sequence.json so ids are
//! never reissued, even after the highest entry is deleted.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::models::{BudgetId, TransactionId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct SequenceData {
    next_transaction_id: u64,
    next_budget_id: u64,
}

impl Default for SequenceData {
    fn default() -> Self {
        Self {
            next_transaction_id: 1,
            next_budget_id: 1,
        }
    }
}

/// Monotonic id issuer
pub struct SequenceRepository {
    path: PathBuf,
    data: RwLock<SequenceData>,
}

impl SequenceRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(SequenceData::default()),
        }
    }

    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: SequenceData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data;

        Ok(())
    }

    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)
    }

    /// Raise the counters past ids already present in the stores
    ///
    /// Covers ledgers written by hand or by an older version without a
    /// sequence file.
    pub fn observe(
        &self,
        max_transaction: Option<TransactionId>,
        max_budget: Option<BudgetId>,
    ) -> Result<(), TrackerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(id) = max_transaction {
            data.next_transaction_id = data.next_transaction_id.max(id.get() + 1);
        }
        if let Some(id) = max_budget {
            data.next_budget_id = data.next_budget_id.max(id.get() + 1);
        }
        Ok(())
    }

    /// Issue the next transaction id
    pub fn next_transaction_id(&self) -> Result<TransactionId, TrackerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let id = TransactionId::from_raw(data.next_transaction_id);
        data.next_transaction_id += 1;
        Ok(id)
    }

    /// Issue the next budget id
    pub fn next_budget_id(&self) -> Result<BudgetId, TrackerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let id = BudgetId::from_raw(data.next_budget_id);
        data.next_budget_id += 1;
        Ok(id)
    }
}
