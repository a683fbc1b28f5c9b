//! Configuration CLI commands

use clap::Subcommand;

use crate::config::{Settings, TrackerPaths};
use crate::error::TrackerResult;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,
    /// Change a setting (e.g. `taxonomy.cascade_renames true`)
    Set { key: String, value: String },
}

/// Handle config commands
pub fn handle_config_command(
    paths: &TrackerPaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> TrackerResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("Finance Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  currency_symbol:             {:?}", settings.currency_symbol);
            println!("  date_format:                 {:?}", settings.date_format);
            println!(
                "  taxonomy.cascade_renames:    {}",
                settings.taxonomy.cascade_renames
            );
            println!(
                "  taxonomy.protect_referenced: {}",
                settings.taxonomy.protect_referenced
            );
            println!(
                "  budgets.reject_duplicates:   {}",
                settings.budgets.reject_duplicates
            );
        }
        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}
