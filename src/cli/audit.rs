//! Audit log CLI command

use clap::Args;

use crate::error::TrackerResult;
use crate::storage::Storage;

/// Arguments for `tracker audit`
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Number of most recent entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Print the most recent audit entries, newest last
pub fn handle_audit_command(storage: &Storage, args: AuditArgs) -> TrackerResult<()> {
    let entries = storage.audit().read_recent(args.limit)?;

    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
