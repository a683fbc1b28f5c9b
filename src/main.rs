use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use finance_tracker::cli::{
    handle_audit_command, handle_budget_command, handle_config_command, handle_export_command,
    handle_import_command, handle_reconcile_command, handle_report_command,
    handle_taxonomy_command, handle_transaction_command,
};
use finance_tracker::config::{Settings, TrackerPaths};
use finance_tracker::models::VocabularyKind;
use finance_tracker::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "tracker",
    version,
    about = "Personal finance ledger with categories, items and budgets",
    long_about = "Record income, expenses and usage, organise them by category and \
                  item, set budgets for category/item pairs and compare them with \
                  what was actually used."
)]
struct Cli {
    /// Diagnostic log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(finance_tracker::cli::TransactionCommands),

    /// Category list management
    #[command(subcommand)]
    Category(finance_tracker::cli::TaxonomyCommands),

    /// Item list management
    #[command(subcommand)]
    Item(finance_tracker::cli::TaxonomyCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(finance_tracker::cli::BudgetCommands),

    /// Compare budgets with recorded usage
    Reconcile(finance_tracker::cli::ReconcileArgs),

    /// Summary, monthly and breakdown reports
    #[command(subcommand)]
    Report(finance_tracker::cli::ReportCommands),

    /// Import transactions from CSV
    Import(finance_tracker::cli::ImportArgs),

    /// Export data to CSV, XLSX, JSON or YAML
    #[command(subcommand)]
    Export(finance_tracker::cli::ExportCommands),

    /// Show recent audit log entries
    Audit(finance_tracker::cli::AuditArgs),

    /// Initialize the data directory with default categories and items
    Init,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<finance_tracker::cli::ConfigCommands>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.log_level);
    debug!("Log level set to {}", cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = TrackerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => {
            handle_taxonomy_command(&storage, &settings, VocabularyKind::Category, cmd)?
        }
        Some(Commands::Item(cmd)) => {
            handle_taxonomy_command(&storage, &settings, VocabularyKind::Item, cmd)?
        }
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Reconcile(args)) => handle_reconcile_command(&storage, &settings, args)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Import(args)) => handle_import_command(&storage, args)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Audit(args)) => handle_audit_command(&storage, args)?,
        Some(Commands::Init) => {
            println!("Initializing finance tracker at: {}", paths.base_dir().display());
            let seeded = initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            if seeded {
                println!();
                println!(
                    "Default categories: Salary, Food, Electricity, Rent, Transportation, \
                     Entertainment"
                );
                println!("Default items:      Groceries, Dining Out, Utilities, Fuel");
            }
            println!();
            println!("Run 'tracker category list' to see all categories.");
        }
        Some(Commands::Config { command }) => {
            handle_config_command(&paths, &mut settings, command)?
        }
        None => {
            println!("Finance Tracker - income, expenses, usage and budgets");
            println!();
            println!("Run 'tracker --help' for usage information.");
        }
    }

    Ok(())
}

/// Install the tracing subscriber
///
/// RUST_LOG wins when set; otherwise `level` applies to this crate only.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "{}={},{}={}",
            env!("CARGO_CRATE_NAME"),
            level,
            "finance_tracker",
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}
