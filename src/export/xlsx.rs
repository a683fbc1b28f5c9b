//! XLSX Export functionality
//!
//! Writes the ledger to a single-sheet workbook named `FinanceData`. The header
//! row is bold and amounts are numeric cells formatted with two decimals.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::error::TrackerResult;
use crate::storage::ledger::LEDGER_DATE_FORMAT;
use crate::storage::Storage;

use super::csv::EXPORT_COLUMNS;

/// Name of the only worksheet
pub const SHEET_NAME: &str = "FinanceData";

/// Number format applied to the Amount column
pub const AMOUNT_FORMAT: &str = "0.00";

/// Build the workbook in memory
pub fn export_ledger_xlsx_buffer(storage: &Storage) -> TrackerResult<Vec<u8>> {
    let mut workbook = build_workbook(storage)?;
    Ok(workbook.save_to_buffer()?)
}

/// Write the workbook to `path`, returning the number of transactions written
pub fn export_ledger_xlsx(storage: &Storage, path: &Path) -> TrackerResult<usize> {
    let mut workbook = build_workbook(storage)?;
    workbook.save(path)?;
    storage.ledger.count()
}

fn build_workbook(storage: &Storage) -> TrackerResult<Workbook> {
    let transactions = storage.ledger.get_all()?;

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let amount = Format::new().set_num_format(AMOUNT_FORMAT);

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in EXPORT_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (index, txn) in transactions.iter().enumerate() {
        let row = index as u32 + 1;
        if let Some(date) = txn.date {
            sheet.write_string(row, 0, date.format(LEDGER_DATE_FORMAT).to_string())?;
        }
        sheet.write_string(row, 1, txn.kind.as_str())?;
        sheet.write_string(row, 2, &txn.category)?;
        if let Some(item) = &txn.item {
            sheet.write_string(row, 3, item)?;
        }
        sheet.write_number_with_format(row, 4, txn.amount.as_f64(), &amount)?;
        if let Some(description) = &txn.description {
            sheet.write_string(row, 5, description)?;
        }
    }

    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::models::{Kind, Money, TransactionDraft};
    use crate::services::LedgerService;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_export_ledger_xlsx() {
        let (temp_dir, storage) = create_test_storage();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let draft = TransactionDraft::new(date, Kind::Usage, "Food", Money::from_cents(4550))
            .item("Groceries");
        LedgerService::new(&storage).add(draft).unwrap();
        LedgerService::new(&storage)
            .add(TransactionDraft::new(date, Kind::Income, "Salary", Money::from_cents(300000)))
            .unwrap();

        let path = temp_dir.path().join("ledger.xlsx");
        assert_eq!(export_ledger_xlsx(&storage, &path).unwrap(), 2);

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);

        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.get_size(), (3, 6));
        assert_eq!(range.get((0, 0)), Some(&Data::String("Date".into())));
        assert_eq!(range.get((0, 5)), Some(&Data::String("Description".into())));
        assert_eq!(range.get((1, 0)), Some(&Data::String("2025-01-15".into())));
        assert_eq!(range.get((1, 3)), Some(&Data::String("Groceries".into())));
        assert_eq!(range.get((1, 4)), Some(&Data::Float(45.5)));
        assert_eq!(range.get((2, 4)), Some(&Data::Float(3000.0)));
    }

    #[test]
    fn test_empty_ledger_still_has_header() {
        let (_temp_dir, storage) = create_test_storage();
        let buffer = export_ledger_xlsx_buffer(&storage).unwrap();
        assert!(!buffer.is_empty());

        let mut workbook = Xlsx::new(std::io::Cursor::new(buffer)).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.height(), 1);
        assert_eq!(range.get((0, 4)), Some(&Data::String("Amount".into())));
    }
}
