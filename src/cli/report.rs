//! CLI commands for reports
//!
//! Provides commands for the kind summary, the monthly roll-up and the
//! per-category breakdown.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::Kind;
use crate::reports::{BreakdownReport, MonthlyRollup, SummaryReport};
use crate::storage::Storage;

use super::FilterArgs;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expense and usage totals with net
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Totals per month and type over the full ledger
    Monthly,

    /// Totals per category for one type
    Breakdown {
        /// Type to break down (expense or usage are the usual choices)
        kind: Kind,

        #[command(flatten)]
        filter: FilterArgs,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TrackerResult<()> {
    match cmd {
        ReportCommands::Summary { filter } => {
            let report = SummaryReport::generate(storage, &filter.to_filter()?)?;
            print!("{}", report.format_terminal(&settings.currency_symbol));
        }

        ReportCommands::Monthly => {
            let report = MonthlyRollup::generate(storage)?;
            print!("{}", report.format_terminal());
        }

        ReportCommands::Breakdown {
            kind,
            filter,
            output,
            top,
        } => {
            let mut report = BreakdownReport::generate(storage, kind, &filter.to_filter()?)?;
            if let Some(top) = top {
                report.keep_top(top);
            }

            match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| {
                        TrackerError::Export(format!(
                            "Failed to create file {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    report.export_csv(BufWriter::new(file))?;
                    println!("Breakdown exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal()),
            }
        }
    }

    Ok(())
}
