//! Export module for the finance tracker
//!
//! Exports always cover the full, unfiltered store:
//! - CSV: the six interchange columns, readable by import
//! - XLSX: one `FinanceData` sheet with numeric amounts
//! - JSON / YAML: full snapshot of ledger, taxonomy and budgets

pub mod csv;
pub mod json;
pub mod xlsx;
pub mod yaml;

pub use self::csv::{export_ledger_csv, EXPORT_COLUMNS};
pub use json::{export_full_json, read_json_export, FullExport, EXPORT_SCHEMA_VERSION};
pub use xlsx::{export_ledger_xlsx, export_ledger_xlsx_buffer, SHEET_NAME};
pub use yaml::{export_full_yaml, read_yaml_export};
