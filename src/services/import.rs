//! CSV Import service
//!
//! Loads transactions from CSV text in the interchange schema. Headers are
//! matched by name, ignoring case. Unreadable dates become the null date;
//! any unreadable kind or amount rejects the whole file before the ledger is
//! touched.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Kind, Money, Transaction, TransactionDraft, TransactionId};
use crate::storage::Storage;

/// Columns an import must have, in schema order
pub const REQUIRED_COLUMNS: [&str; 4] = ["Date", "Type", "Category", "Amount"];

/// Columns an import may have
pub const OPTIONAL_COLUMNS: [&str; 2] = ["Item", "Description"];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// What to do with the existing ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImportMode {
    /// Add the imported rows after the existing ones
    Append,
    /// Discard the existing ledger first
    Replace,
}

/// Positions of the schema columns in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date: usize,
    pub kind: usize,
    pub category: usize,
    pub amount: usize,
    pub item: Option<usize>,
    pub description: Option<usize>,
}

impl ColumnMapping {
    /// Locate the schema columns in a header record
    ///
    /// # Errors
    ///
    /// `ImportSchema` listing every missing required column.
    pub fn from_headers(headers: &StringRecord) -> TrackerResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let required: Vec<Option<usize>> = REQUIRED_COLUMNS.iter().map(|&c| find(c)).collect();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .zip(&required)
            .filter(|(_, pos)| pos.is_none())
            .map(|(name, _)| name.to_string())
            .collect();

        match required.as_slice() {
            [Some(date), Some(kind), Some(category), Some(amount)] => Ok(Self {
                date: *date,
                kind: *kind,
                category: *category,
                amount: *amount,
                item: find(OPTIONAL_COLUMNS[0]),
                description: find(OPTIONAL_COLUMNS[1]),
            }),
            _ => Err(TrackerError::ImportSchema { missing }),
        }
    }
}

/// Result of a completed import
#[derive(Debug, Clone, Serialize)]
pub struct ImportResult {
    pub mode: ImportMode,
    pub imported: usize,
    /// Rows whose date could not be read
    pub undated: usize,
    /// Transactions removed by a replace
    pub replaced: usize,
    pub imported_ids: Vec<TransactionId>,
}

/// Parse a date in any of the accepted layouts
pub fn parse_import_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
                .map(|dt| dt.date())
        })
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse every row of a CSV input into drafts
    ///
    /// Nothing is returned unless every row is valid.
    pub fn parse<R: Read>(&self, input: R) -> TrackerResult<Vec<TransactionDraft>> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers = reader
            .headers()
            .map_err(|e| TrackerError::Import(format!("Failed to read header row: {}", e)))?
            .clone();
        let mapping = ColumnMapping::from_headers(&headers)?;

        let mut drafts = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let row = index + 1;
            let record =
                record.map_err(|e| TrackerError::Import(format!("Row {}: {}", row, e)))?;
            drafts.push(parse_record(&record, &mapping, row)?);
        }

        debug!(rows = drafts.len(), "import parsed");
        Ok(drafts)
    }

    /// Import from any reader
    pub fn import_reader<R: Read>(
        &self,
        input: R,
        mode: ImportMode,
        source: &str,
    ) -> TrackerResult<ImportResult> {
        let drafts = self.parse(input)?;
        let undated = drafts.iter().filter(|d| d.date.is_none()).count();

        let replaced = match mode {
            ImportMode::Append => 0,
            ImportMode::Replace => {
                let existing = self.storage.ledger.count()?;
                self.storage.ledger.clear()?;
                existing
            }
        };

        let mut imported_ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = self.storage.sequence.next_transaction_id()?;
            self.storage.ledger.upsert(Transaction::from_draft(id, draft))?;
            imported_ids.push(id);
        }

        self.storage.ledger.save()?;
        self.storage.sequence.save()?;

        let summary = match mode {
            ImportMode::Append => format!("appended {} transaction(s)", imported_ids.len()),
            ImportMode::Replace => format!(
                "replaced {} transaction(s) with {}",
                replaced,
                imported_ids.len()
            ),
        };
        info!(source, imported = imported_ids.len(), undated, ?mode, "import complete");
        self.storage.log_import(source, summary)?;

        Ok(ImportResult {
            mode,
            imported: imported_ids.len(),
            undated,
            replaced,
            imported_ids,
        })
    }

    /// Import a CSV file
    pub fn import_file(&self, path: &Path, mode: ImportMode) -> TrackerResult<ImportResult> {
        let file = File::open(path).map_err(|e| {
            TrackerError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import_reader(file, mode, &path.display().to_string())
    }
}

fn parse_record(
    record: &StringRecord,
    mapping: &ColumnMapping,
    row: usize,
) -> TrackerResult<TransactionDraft> {
    let cell = |index: usize| record.get(index).unwrap_or("");
    let optional = |index: Option<usize>| {
        index
            .map(cell)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let kind: Kind = cell(mapping.kind)
        .parse()
        .map_err(|e| TrackerError::Validation(format!("Row {}: {}", row, e)))?;

    let raw_amount = cell(mapping.amount);
    let amount = Money::parse(raw_amount)
        .map_err(|e| TrackerError::Validation(format!("Row {}: {}", row, e)))?;

    let draft = TransactionDraft {
        date: parse_import_date(cell(mapping.date)),
        kind,
        category: cell(mapping.category).to_string(),
        item: optional(mapping.item),
        amount,
        description: optional(mapping.description),
    }
    .normalized();

    draft
        .validate()
        .map_err(|e| TrackerError::Validation(format!("Row {}: {}", row, e)))?;

    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::services::{LedgerService, TransactionFilter};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn seed(storage: &Storage) -> TransactionId {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        LedgerService::new(storage)
            .add(TransactionDraft::new(date, Kind::Income, "Salary", Money::from_cents(100000)))
            .unwrap()
    }

    #[test]
    fn test_parse_dates() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(parse_import_date("2025-03-14"), Some(expected));
        assert_eq!(parse_import_date("2025-03-14 08:30:00"), Some(expected));
        assert_eq!(parse_import_date("03/14/2025"), Some(expected));
        assert_eq!(parse_import_date("14/03/2025"), Some(expected));
        assert_eq!(parse_import_date("2025/03/14"), Some(expected));
        assert_eq!(parse_import_date("yesterday"), None);
        assert_eq!(parse_import_date(""), None);
    }

    #[test]
    fn test_mapping_ignores_case_and_order() {
        let headers =
            StringRecord::from(vec!["amount", " TYPE ", "Description", "category", "date"]);
        let mapping = ColumnMapping::from_headers(&headers).unwrap();

        assert_eq!(mapping.amount, 0);
        assert_eq!(mapping.kind, 1);
        assert_eq!(mapping.date, 4);
        assert_eq!(mapping.item, None);
        assert_eq!(mapping.description, Some(2));
    }

    #[test]
    fn test_missing_amount_column_rejected_and_ledger_unchanged() {
        let (_temp_dir, storage) = create_test_storage();
        let existing = seed(&storage);
        let service = ImportService::new(&storage);

        let csv = "Date,Type,Category,Item\n2025-01-02,Usage,Food,Groceries\n";
        let err = service
            .import_reader(csv.as_bytes(), ImportMode::Replace, "test")
            .unwrap_err();

        match err {
            TrackerError::ImportSchema { missing } => assert_eq!(missing, vec!["Amount"]),
            other => panic!("expected ImportSchema, got {:?}", other),
        }
        let all = LedgerService::new(&storage).query(&TransactionFilter::new()).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, existing);
    }

    #[test]
    fn test_missing_columns_listed_in_schema_order() {
        let headers = StringRecord::from(vec!["Category", "Description"]);
        match ColumnMapping::from_headers(&headers) {
            Err(TrackerError::ImportSchema { missing }) => {
                assert_eq!(missing, vec!["Date", "Type", "Amount"])
            }
            other => panic!("expected ImportSchema, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_row_rejects_whole_file() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);
        let service = ImportService::new(&storage);

        let csv = "Date,Type,Category,Amount\n\
                   2025-01-02,Usage,Food,10.00\n\
                   2025-01-03,Refund,Food,5.00\n";
        let err = service
            .import_reader(csv.as_bytes(), ImportMode::Append, "test")
            .unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("Row 2"));
        assert_eq!(storage.ledger.count().unwrap(), 1);
    }

    #[test]
    fn test_negative_amount_rejects_file() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let csv = "Date,Type,Category,Amount\n2025-01-02,Usage,Food,-3.00\n";
        let err = service
            .import_reader(csv.as_bytes(), ImportMode::Append, "test")
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.ledger.count().unwrap(), 0);
    }

    #[test]
    fn test_append_with_null_dates() {
        let (_temp_dir, storage) = create_test_storage();
        let existing = seed(&storage);
        let service = ImportService::new(&storage);

        let csv = "Id,Date,Type,Category,Item,Amount,Description\n\
                   77,2025-02-01,usage,Food,Groceries,40.00,\n\
                   78,not a date,Expense,Rent,,900,February\n";
        let result = service
            .import_reader(csv.as_bytes(), ImportMode::Append, "test")
            .unwrap();

        assert_eq!(result.imported, 2);
        assert_eq!(result.undated, 1);

        let all = LedgerService::new(&storage).query(&TransactionFilter::new()).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, existing);
        // Source ids are ignored; fresh ids follow the existing ones
        assert!(all[1].id > existing);
        assert_eq!(all[1].kind, Kind::Usage);
        assert_eq!(all[1].item.as_deref(), Some("Groceries"));
        assert_eq!(all[1].description, None);
        assert_eq!(all[2].date, None);
        assert_eq!(all[2].amount.cents(), 90000);
        assert_eq!(all[2].description.as_deref(), Some("February"));
    }

    #[test]
    fn test_replace_discards_existing_and_never_reuses_ids() {
        let (_temp_dir, storage) = create_test_storage();
        let existing = seed(&storage);
        let service = ImportService::new(&storage);

        let csv = "Date,Type,Category,Amount\n2025-02-01,Income,Bonus,500\n";
        let result = service
            .import_reader(csv.as_bytes(), ImportMode::Replace, "test")
            .unwrap();

        assert_eq!(result.replaced, 1);
        let all = LedgerService::new(&storage).query(&TransactionFilter::new()).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].category, "Bonus");
        assert!(all[0].id > existing);

        let audit = storage.audit().read_all().unwrap();
        assert!(audit
            .last()
            .unwrap()
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("replaced 1"));
    }
}
