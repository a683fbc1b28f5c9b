//! Transaction CLI commands
//!
//! Implements CLI commands for ledger management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Kind, TransactionDraft, TransactionId, TransactionPatch};
use crate::services::{execute, Command, LedgerService};
use crate::storage::Storage;

use super::{parse_amount, parse_date, FilterArgs};

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Type: income, expense or usage
        kind: Kind,
        /// Category name
        category: String,
        /// Amount (non-negative, e.g. "45.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Item name
        #[arg(short, long)]
        item: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List transactions
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Show at most this many (newest ids last)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (e.g. "txn-3" or "3")
        id: TransactionId,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: TransactionId,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<Kind>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New item ("" clears it)
        #[arg(short, long)]
        item: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description ("" clears it)
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: TransactionId,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TrackerResult<()> {
    let service = LedgerService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            category,
            amount,
            item,
            date,
            description,
        } => {
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => chrono::Local::now().date_naive(),
            };

            let mut draft = TransactionDraft::new(date, kind, category, amount);
            if let Some(item) = item {
                draft = draft.item(item);
            }
            if let Some(description) = description {
                draft = draft.description(description);
            }

            let outcome = execute(storage, settings, Command::AddTransaction(draft))?;
            println!("{}", outcome.message());
        }

        TransactionCommands::List { filter, limit } => {
            let transactions = service.query(&filter.to_filter()?)?;
            let shown = match limit {
                Some(limit) if limit < transactions.len() => {
                    &transactions[transactions.len() - limit..]
                }
                _ => &transactions[..],
            };
            print!("{}", format_transaction_table(shown, settings));
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .get(id)?
                .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?;
            print!("{}", format_transaction_details(&txn, settings));
        }

        TransactionCommands::Edit {
            id,
            date,
            kind,
            category,
            item,
            amount,
            description,
        } => {
            let patch = TransactionPatch {
                date: date.as_deref().map(parse_date).transpose()?,
                kind,
                category,
                item: item.map(clearable),
                amount: amount.as_deref().map(parse_amount).transpose()?,
                description: description.map(clearable),
            };
            if patch.is_empty() {
                return Err(TrackerError::Validation(
                    "Nothing to change. Pass at least one field to edit".into(),
                ));
            }

            let outcome = execute(storage, settings, Command::UpdateTransaction { id, patch })?;
            println!("{}", outcome.message());
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service
                .get(id)?
                .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?;

            if !force {
                println!("About to delete transaction:");
                print!("{}", format_transaction_details(&txn, settings));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let outcome = execute(storage, settings, Command::DeleteTransaction(id))?;
            println!("{}", outcome.message());
        }
    }

    Ok(())
}

/// An empty argument clears an optional field
fn clearable(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearable() {
        assert_eq!(clearable("  ".into()), None);
        assert_eq!(clearable(" Fuel ".into()), Some("Fuel".into()));
    }
}
