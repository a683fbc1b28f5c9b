//! Budget CLI commands
//!
//! Implements CLI commands for the budget registry.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_budget_table;
use crate::error::TrackerResult;
use crate::models::BudgetId;
use crate::services::{execute, BudgetService, Command};
use crate::storage::Storage;

use super::parse_amount;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set a spending ceiling for a (category, item) pair
    Set {
        /// Category name
        category: String,
        /// Item name
        item: String,
        /// Limit (e.g., "100" or "100.00")
        limit: String,
    },

    /// List budgets in the order they were set
    List,

    /// Change the limit of an existing budget
    Update {
        /// Budget ID (e.g. "bud-2" or "2")
        id: BudgetId,
        /// New limit
        limit: String,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: BudgetId,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TrackerResult<()> {
    let command = match cmd {
        BudgetCommands::List => {
            let budgets = BudgetService::new(storage, settings.budgets).list()?;
            print!("{}", format_budget_table(&budgets, &settings.currency_symbol));
            return Ok(());
        }
        BudgetCommands::Set {
            category,
            item,
            limit,
        } => Command::SetBudget {
            category,
            item,
            limit: parse_amount(&limit)?,
        },
        BudgetCommands::Update { id, limit } => Command::UpdateBudget {
            id,
            limit: parse_amount(&limit)?,
        },
        BudgetCommands::Delete { id } => Command::DeleteBudget(id),
    };

    let outcome = execute(storage, settings, command)?;
    println!("{}", outcome.message());
    Ok(())
}
