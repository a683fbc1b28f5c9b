//! CSV Export functionality
//!
//! Writes the ledger as the six interchange columns. Ids are internal and are
//! not exported, so the output can be fed straight back into import.

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::storage::ledger::LEDGER_DATE_FORMAT;
use crate::storage::Storage;

/// Interchange column order
pub const EXPORT_COLUMNS: [&str; 6] = ["Date", "Type", "Category", "Item", "Amount", "Description"];

/// Export all transactions to CSV
pub fn export_ledger_csv<W: Write>(storage: &Storage, writer: W) -> TrackerResult<usize> {
    let transactions = storage.ledger.get_all()?;
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(EXPORT_COLUMNS)?;
    for txn in &transactions {
        let date = txn
            .date
            .map(|d| d.format(LEDGER_DATE_FORMAT).to_string())
            .unwrap_or_default();
        csv.write_record([
            date.as_str(),
            txn.kind.as_str(),
            txn.category.as_str(),
            txn.item.as_deref().unwrap_or(""),
            &txn.amount.to_decimal_string(),
            txn.description.as_deref().unwrap_or(""),
        ])?;
    }

    csv.flush().map_err(|e| TrackerError::Export(e.to_string()))?;
    Ok(transactions.len())
}
