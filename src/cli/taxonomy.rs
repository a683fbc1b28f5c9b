//! Category and item CLI commands
//!
//! Both vocabularies share one set of subcommands; `tracker category ...` and
//! `tracker item ...` differ only in which list they act on.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_vocabulary;
use crate::error::TrackerResult;
use crate::models::VocabularyKind;
use crate::services::{execute, Command, TaxonomyService};
use crate::storage::Storage;

/// Vocabulary subcommands
#[derive(Subcommand, Debug)]
pub enum TaxonomyCommands {
    /// List names in display order
    List,
    /// Add a name (no-op if already present)
    Add {
        name: String,
    },
    /// Rename a name, keeping its position
    Rename {
        old: String,
        new: String,
    },
    /// Remove a name
    Remove {
        name: String,
    },
    /// Count transactions and budgets that use a name
    Usage {
        name: String,
    },
}

/// Handle a category or item command
pub fn handle_taxonomy_command(
    storage: &Storage,
    settings: &Settings,
    kind: VocabularyKind,
    cmd: TaxonomyCommands,
) -> TrackerResult<()> {
    let service = TaxonomyService::new(storage, settings.taxonomy);

    let command = match cmd {
        TaxonomyCommands::List => {
            print!("{}", format_vocabulary(kind, &service.list(kind)?));
            return Ok(());
        }
        TaxonomyCommands::Usage { name } => {
            let references = service.references(kind, name.trim())?;
            println!("{} '{}' is used by {} record(s)", kind, name.trim(), references);
            return Ok(());
        }
        TaxonomyCommands::Add { name } => match kind {
            VocabularyKind::Category => Command::AddCategory(name),
            VocabularyKind::Item => Command::AddItem(name),
        },
        TaxonomyCommands::Rename { old, new } => match kind {
            VocabularyKind::Category => Command::RenameCategory { old, new },
            VocabularyKind::Item => Command::RenameItem { old, new },
        },
        TaxonomyCommands::Remove { name } => match kind {
            VocabularyKind::Category => Command::RemoveCategory(name),
            VocabularyKind::Item => Command::RemoveItem(name),
        },
    };

    let outcome = execute(storage, settings, command)?;
    println!("{}", outcome.message());
    Ok(())
}
