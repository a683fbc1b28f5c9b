//! JSON Export functionality
//!
//! Exports the complete store (ledger, taxonomy, budgets) to JSON with schema
//! versioning.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Budget, Transaction};
use crate::storage::{Storage, TaxonomyData};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full store export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Every transaction in id order
    pub transactions: Vec<Transaction>,

    /// Category and item vocabularies in display order
    pub taxonomy: TaxonomyData,

    /// Budgets in registry order
    pub budgets: Vec<Budget>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub category_count: usize,
    pub item_count: usize,
    pub budget_count: usize,

    /// Earliest known transaction date
    pub earliest_transaction: Option<String>,

    /// Latest known transaction date
    pub latest_transaction: Option<String>,

    /// Transactions whose date is unknown
    pub undated_count: usize,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> TrackerResult<Self> {
        let transactions = storage.ledger.get_all()?;
        let taxonomy = storage.taxonomy.get_all()?;
        let budgets = storage.budgets.get_all()?;

        let dates = || transactions.iter().filter_map(|t| t.date);
        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            category_count: taxonomy.categories.len(),
            item_count: taxonomy.items.len(),
            budget_count: budgets.len(),
            earliest_transaction: dates().min().map(|d| d.to_string()),
            latest_transaction: dates().max().map(|d| d.to_string()),
            undated_count: transactions.iter().filter(|t| t.date.is_none()).count(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            taxonomy,
            budgets,
            metadata,
        })
    }

    /// Check the structure of a snapshot read back from disk
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut seen = HashSet::new();
        for txn in &self.transactions {
            if !seen.insert(txn.id) {
                return Err(format!("Duplicate transaction id {}", txn.id));
            }
            if let Err(e) = txn.validate() {
                return Err(format!("Transaction {}: {}", txn.id, e));
            }
        }

        let mut seen = HashSet::new();
        for budget in &self.budgets {
            if !seen.insert(budget.id) {
                return Err(format!("Duplicate budget id {}", budget.id));
            }
            if let Err(e) = budget.validate() {
                return Err(format!("Budget {}: {}", budget.id, e));
            }
        }

        if self.metadata.transaction_count != self.transactions.len() {
            return Err(format!(
                "Metadata lists {} transaction(s) but {} are present",
                self.metadata.transaction_count,
                self.transactions.len()
            ));
        }

        Ok(())
    }
}

/// Export the full store to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: W, pretty: bool) -> TrackerResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a JSON export (for verification)
pub fn read_json_export(json_str: &str) -> TrackerResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| TrackerError::Import(e.to_string()))?;

    export.validate().map_err(TrackerError::Import)?;

    Ok(export)
}
