//! Service layer for the finance tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, audit logging, and cross-entity operations.

pub mod budget;
pub mod command;
pub mod import;
pub mod ledger;
pub mod reconciliation;
pub mod taxonomy;

pub use budget::BudgetService;
pub use command::{execute, Command, Outcome};
pub use import::{ImportMode, ImportResult, ImportService};
pub use ledger::{DateRange, KindTotals, LedgerService, TransactionFilter};
pub use reconciliation::{
    Progress, ReconciliationReport, ReconciliationRow, ReconciliationService, UnbudgetedUsage,
};
pub use taxonomy::TaxonomyService;
