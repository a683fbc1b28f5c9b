//! CLI commands for data export
//!
//! Exports always cover the whole store. Without an output path, files are
//! written to the exports directory.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_full_json, export_full_yaml, export_ledger_csv, export_ledger_xlsx};
use crate::storage::Storage;

/// Snapshot format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SnapshotFormat {
    /// JSON format (full store)
    Json,
    /// YAML format (full store, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export transactions to CSV
    Csv {
        /// Output file path
        output: Option<PathBuf>,
    },

    /// Export transactions to an Excel workbook
    Xlsx {
        /// Output file path
        output: Option<PathBuf>,
    },

    /// Export ledger, taxonomy and budgets to one file
    All {
        /// Output file path
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: SnapshotFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> TrackerResult<()> {
    let export_dir = storage.paths().export_dir();

    match cmd {
        ExportCommands::Csv { output } => {
            let output = output.unwrap_or_else(|| export_dir.join("finance_data.csv"));
            let count = export_ledger_csv(storage, create_file(&output)?)?;
            println!("Exported {} transaction(s) to: {}", count, output.display());
        }
        ExportCommands::Xlsx { output } => {
            let output = output.unwrap_or_else(|| export_dir.join("finance_data.xlsx"));
            let count = export_ledger_xlsx(storage, &output)?;
            println!("Exported {} transaction(s) to: {}", count, output.display());
        }
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let output = output.unwrap_or_else(|| match format {
                SnapshotFormat::Json => export_dir.join("finance_export.json"),
                SnapshotFormat::Yaml => export_dir.join("finance_export.yaml"),
            });
            let writer = create_file(&output)?;
            match format {
                SnapshotFormat::Json => export_full_json(storage, writer, pretty)?,
                SnapshotFormat::Yaml => export_full_yaml(storage, writer)?,
            }
            println!("Full export written to: {}", output.display());
        }
    }

    Ok(())
}

fn create_file(path: &Path) -> TrackerResult<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).map_err(|e| {
        TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
