//! Reconciliation CLI command
//!
//! Compares every budget with the usage recorded against it.

use clap::Args;

use crate::config::Settings;
use crate::display::format_reconciliation;
use crate::error::{TrackerError, TrackerResult};
use crate::services::ReconciliationService;
use crate::storage::Storage;

use super::parse_date_range;

/// Arguments for `tracker reconcile`
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Only count usage on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Only count usage on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle the reconcile command
pub fn handle_reconcile_command(
    storage: &Storage,
    settings: &Settings,
    args: ReconcileArgs,
) -> TrackerResult<()> {
    let range = parse_date_range(args.from.as_deref(), args.to.as_deref())?;
    let report = ReconciliationService::new(storage).reconcile(range)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| TrackerError::Json(e.to_string()))?;
        println!("{}", json);
    } else {
        print!("{}", format_reconciliation(&report, &settings.currency_symbol));
    }

    Ok(())
}
