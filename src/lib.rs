//! Finance Tracker - personal income, expense and usage ledger
//!
//! This library provides the core of the finance tracker: a ledger of dated
//! transactions, the category and item vocabularies used to tag them, a
//! registry of (category, item) budgets, and a reconciliation engine that
//! compares each budget with recorded usage.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, vocabularies, budgets, money)
//! - `storage`: CSV and JSON file storage layer
//! - `services`: Ledger, taxonomy, budget, reconciliation and import logic
//! - `reports`: Summary, monthly roll-up and category breakdown
//! - `export`: CSV, XLSX, JSON and YAML export
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command-line handlers
//!
//! # Example
//!
//! ```rust,no_run
//! use finance_tracker::config::{Settings, TrackerPaths};
//! use finance_tracker::services::ReconciliationService;
//! use finance_tracker::storage::Storage;
//!
//! # fn main() -> Result<(), finance_tracker::TrackerError> {
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let report = ReconciliationService::new(&storage).reconcile(None)?;
//! # let _ = settings;
//! # let _ = report;
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
