//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the clap
//! argument parsing with the service layer. Mutations go through
//! `services::execute` so every action reports one success banner or the
//! specific failure.

pub mod audit;
pub mod budget;
pub mod config;
pub mod export;
pub mod import;
pub mod reconcile;
pub mod report;
pub mod taxonomy;
pub mod transaction;

pub use audit::{handle_audit_command, AuditArgs};
pub use budget::{handle_budget_command, BudgetCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use export::{handle_export_command, ExportCommands};
pub use import::{handle_import_command, ImportArgs};
pub use reconcile::{handle_reconcile_command, ReconcileArgs};
pub use report::{handle_report_command, ReportCommands};
pub use taxonomy::{handle_taxonomy_command, TaxonomyCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;
use clap::Args;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Kind, Money};
use crate::services::{DateRange, TransactionFilter};

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(input: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        TrackerError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", input))
    })
}

/// Parse an amount argument such as "45.50" or "1,200"
pub fn parse_amount(input: &str) -> TrackerResult<Money> {
    Money::parse(input).map_err(|e| {
        TrackerError::Validation(format!(
            "Invalid amount format: '{}'. Use a format like '45.50' or '100'. Error: {}",
            input, e
        ))
    })
}

/// Build an inclusive range from optional bounds
///
/// A missing bound is open on that side.
pub fn parse_date_range(from: Option<&str>, to: Option<&str>) -> TrackerResult<Option<DateRange>> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let start = from.map(parse_date).transpose()?.unwrap_or(NaiveDate::MIN);
    let end = to.map(parse_date).transpose()?.unwrap_or(NaiveDate::MAX);
    if start > end {
        return Err(TrackerError::Validation(format!(
            "Start date {} is after end date {}",
            start, end
        )));
    }
    Ok(Some(DateRange::new(start, end)))
}

/// Filter flags shared by the listing and report commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Restrict to these types (repeatable: --type income --type usage)
    #[arg(short = 't', long = "type")]
    pub kinds: Vec<Kind>,

    /// Restrict to these categories (repeatable)
    #[arg(short = 'c', long = "category")]
    pub categories: Vec<String>,

    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub to: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> TrackerResult<TransactionFilter> {
        let mut filter = TransactionFilter::new()
            .kinds(self.kinds.iter().copied())
            .categories(self.categories.iter().map(|c| c.trim().to_string()));
        filter.date_range = parse_date_range(self.from.as_deref(), self.to.as_deref())?;
        Ok(filter)
    }
}
