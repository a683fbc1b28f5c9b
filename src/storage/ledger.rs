//! Ledger repository backed by a CSV file
//!
//! Manages loading and saving transactions to data/ledger.csv. The file keeps
//! the interchange column order with a leading Id column so ids survive a
//! reload.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::models::{Kind, Money, Transaction, TransactionId};

use super::file_io::write_atomic;

/// Column order of the ledger file
pub const LEDGER_HEADER: [&str; 7] = [
    "Id",
    "Date",
    "Type",
    "Category",
    "Item",
    "Amount",
    "Description",
];

/// Date format used in the ledger file
pub const LEDGER_DATE_FORMAT: &str = "%Y-%m-%d";

/// One ledger file row, with every cell as text
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerRow {
    #[serde(rename = "Id")]
    id: u64,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Description")]
    description: String,
}

impl LedgerRow {
    fn from_transaction(txn: &Transaction) -> Self {
        Self {
            id: txn.id.get(),
            date: txn
                .date
                .map(|d| d.format(LEDGER_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            item: txn.item.clone().unwrap_or_default(),
            amount: txn.amount.to_decimal_string(),
            description: txn.description.clone().unwrap_or_default(),
        }
    }

    fn into_transaction(self, line: usize) -> Result<Transaction, TrackerError> {
        let date = if self.date.trim().is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(self.date.trim(), LEDGER_DATE_FORMAT).map_err(|e| {
                    TrackerError::Storage(format!("Ledger line {}: bad date: {}", line, e))
                })?,
            )
        };
        let kind: Kind = self
            .kind
            .parse()
            .map_err(|e| TrackerError::Storage(format!("Ledger line {}: {}", line, e)))?;
        let amount = Money::parse(&self.amount)
            .map_err(|e| TrackerError::Storage(format!("Ledger line {}: {}", line, e)))?;

        Ok(Transaction {
            id: TransactionId::from_raw(self.id),
            date,
            kind,
            category: self.category,
            item: non_empty(self.item),
            amount,
            description: non_empty(self.description),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Repository for ledger persistence, ordered by id
pub struct LedgerRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<TransactionId, Transaction>>,
}

impl LedgerRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), TrackerError> {
        let mut loaded = BTreeMap::new();

        if self.path.exists() {
            let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
                TrackerError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

            for (index, record) in reader.deserialize::<LedgerRow>().enumerate() {
                // Header is line 1
                let line = index + 2;
                let row = record.map_err(|e| {
                    TrackerError::Storage(format!("Ledger line {}: {}", line, e))
                })?;
                let txn = row.into_transaction(line)?;
                loaded.insert(txn.id, txn);
            }
        }

        let mut data = self.data.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = loaded;

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        write_atomic(&self.path, |writer| {
            let mut csv_writer = csv::Writer::from_writer(writer);
            if data.is_empty() {
                // serde only emits the header alongside the first record
                csv_writer.write_record(LEDGER_HEADER)?;
            }
            for txn in data.values() {
                csv_writer.serialize(LedgerRow::from_transaction(txn))?;
            }
            csv_writer.flush()?;
            Ok(())
        })
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions in id order
    pub fn get_all(&self) -> Result<Vec<Transaction>, TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().cloned().collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), TrackerError> {
        let mut data = self.data.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, TrackerError> {
        let mut data = self.data.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id))
    }

    /// Drop every transaction
    pub fn clear(&self) -> Result<(), TrackerError> {
        let mut data = self.data.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        Ok(())
    }

    /// Apply a change to every stored transaction, returning how many changed
    pub fn update_where<F>(&self, mut change: F) -> Result<usize, TrackerError>
    where
        F: FnMut(&mut Transaction) -> bool,
    {
        let mut data = self.data.write().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut changed = 0;
        for txn in data.values_mut() {
            if change(txn) {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Highest id currently stored
    pub fn max_id(&self) -> Result<Option<TransactionId>, TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.keys().next_back().copied())
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, TrackerError> {
        let data = self.data.read().map_err(|e| {
            TrackerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionDraft;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, LedgerRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.csv");
        let repo = LedgerRepository::new(path);
        (temp_dir, repo)
    }

    fn txn(id: u64, kind: Kind, category: &str, cents: i64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        Transaction::from_draft(
            TransactionId::from_raw(id),
            TransactionDraft::new(date, kind, category, Money::from_cents(cents)),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert_eq!(repo.max_id().unwrap(), None);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(txn(1, Kind::Income, "Salary", 100000)).unwrap();

        let retrieved = repo.get(TransactionId::from_raw(1)).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 100000);
    }

    #[test]
    fn test_get_all_in_id_order() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(txn(3, Kind::Usage, "Food", 300)).unwrap();
        repo.upsert(txn(1, Kind::Usage, "Food", 100)).unwrap();
        repo.upsert(txn(2, Kind::Usage, "Food", 200)).unwrap();

        let ids: Vec<u64> = repo.get_all().unwrap().iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(repo.max_id().unwrap(), Some(TransactionId::from_raw(3)));
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        let mut with_text = txn(4, Kind::Usage, "Food", 4050);
        with_text.item = Some("Groceries".into());
        with_text.description = Some("weekly, big shop".into());
        repo.upsert(with_text.clone()).unwrap();

        let mut undated = txn(9, Kind::Expense, "Rent", 90000);
        undated.date = None;
        repo.upsert(undated.clone()).unwrap();
        repo.save().unwrap();

        let contents = std::fs::read_to_string(temp_dir.path().join("ledger.csv")).unwrap();
        assert!(contents.starts_with("Id,Date,Type,Category,Item,Amount,Description"));
        assert!(contents.contains("40.50"));

        let repo2 = LedgerRepository::new(temp_dir.path().join("ledger.csv"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 2);
        assert_eq!(repo2.get(with_text.id).unwrap().unwrap(), with_text);
        assert_eq!(repo2.get(undated.id).unwrap().unwrap(), undated);
    }

    #[test]
    fn test_save_empty_writes_header() {
        let (temp_dir, repo) = create_test_repo();
        repo.save().unwrap();

        let contents = std::fs::read_to_string(temp_dir.path().join("ledger.csv")).unwrap();
        assert_eq!(contents.trim_end(), LEDGER_HEADER.join(","));

        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_corrupt_amount_is_reported() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(
            temp_dir.path().join("ledger.csv"),
            "Id,Date,Type,Category,Item,Amount,Description\n1,2025-01-01,Income,Salary,,lots,\n",
        )
        .unwrap();

        let err = repo.load().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(txn(1, Kind::Income, "Salary", 100)).unwrap();

        assert!(repo.delete(TransactionId::from_raw(1)).unwrap().is_some());
        assert!(repo.delete(TransactionId::from_raw(1)).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_update_where() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(txn(1, Kind::Usage, "Food", 100)).unwrap();
        repo.upsert(txn(2, Kind::Usage, "Rent", 100)).unwrap();

        let changed = repo
            .update_where(|t| {
                if t.category == "Food" {
                    t.category = "Groceries".into();
                    true
                } else {
                    false
                }
            })
            .unwrap();

        assert_eq!(changed, 1);
        assert_eq!(
            repo.get(TransactionId::from_raw(1)).unwrap().unwrap().category,
            "Groceries"
        );
    }
}
