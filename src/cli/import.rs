//! CLI command handler for CSV import
//!
//! The file must carry Date, Type, Category and Amount columns. Any invalid
//! row rejects the whole file.

use std::fs::File;
use std::path::PathBuf;

use clap::Args;

use crate::error::{TrackerError, TrackerResult};
use crate::services::{ImportMode, ImportService};
use crate::storage::Storage;

/// Arguments for `tracker import`
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to CSV file
    pub file: PathBuf,

    /// Replace the whole ledger instead of appending
    #[arg(long)]
    pub replace: bool,

    /// Validate the file and report what would be imported without writing
    #[arg(long)]
    pub dry_run: bool,
}

/// Handle the import command
pub fn handle_import_command(storage: &Storage, args: ImportArgs) -> TrackerResult<()> {
    let service = ImportService::new(storage);

    if !args.file.exists() {
        return Err(TrackerError::Import(format!(
            "File not found: {}",
            args.file.display()
        )));
    }

    if args.dry_run {
        let file = File::open(&args.file)?;
        let drafts = service.parse(file)?;
        let undated = drafts.iter().filter(|d| d.date.is_none()).count();
        println!("Import Preview for '{}'", args.file.display());
        println!("{}", "=".repeat(40));
        println!("  Valid rows:         {}", drafts.len());
        println!("  Rows without date:  {}", undated);
        if args.replace {
            println!("  Would replace:      {}", storage.ledger.count()?);
        }
        println!();
        println!("Run again without --dry-run to import.");
        return Ok(());
    }

    let mode = if args.replace {
        ImportMode::Replace
    } else {
        ImportMode::Append
    };
    let result = service.import_file(&args.file, mode)?;

    match result.mode {
        ImportMode::Append => println!("Imported {} transaction(s)", result.imported),
        ImportMode::Replace => println!(
            "Replaced {} transaction(s) with {} imported",
            result.replaced, result.imported
        ),
    }
    if result.undated > 0 {
        println!(
            "  {} row(s) had an unreadable date and were stored without one",
            result.undated
        );
    }

    Ok(())
}
