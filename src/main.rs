use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use household_ledger::cli::{
    handle_category_command, handle_person_command, handle_report_command,
    handle_transaction_command, CategoryCommands, PersonCommands, ReportCommands,
    TransactionCommands,
};
use household_ledger::config::{LedgerPaths, Settings};
use household_ledger::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "LEDGER_LOG";

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Household ledger: income and expenses per person and category",
    long_about = "Records income and expense transactions for the people in a household, \
                  classifies them by category and summarizes totals and balances per \
                  person, per category and overall."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Person management commands
    #[command(subcommand)]
    Person(PersonCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Summary reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Create the data directory and default settings
    Init,

    /// Show or change configuration
    Config {
        /// Currency symbol used when printing amounts
        #[arg(long)]
        currency: Option<String>,

        /// Age below which a person may not record income
        #[arg(long)]
        minor_age_threshold: Option<u32>,
    },

    /// Show the most recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Person(cmd)) => {
            handle_person_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing ledger at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  ledger person add <name> --age <age>");
            println!("  ledger category add <description> --purpose <expense|income|both>");
            println!("  ledger transaction add <person> <category> <amount> -d <description>");
        }
        Some(Commands::Config {
            currency,
            minor_age_threshold,
        }) => {
            let changed = currency.is_some() || minor_age_threshold.is_some();
            if let Some(currency) = currency {
                settings.currency_symbol = currency;
            }
            if let Some(threshold) = minor_age_threshold {
                settings.minor_age_threshold = threshold;
            }
            if changed {
                settings.save(&paths)?;
                tracing::info!("settings updated");
            }

            println!("Ledger Configuration");
            println!("====================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("Initialized:     {}", if paths.is_initialized() { "yes" } else { "no" });
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Date format:         {}", settings.date_format);
            println!("  Minor age threshold: {}", settings.minor_age_threshold);
        }
        Some(Commands::Audit { limit }) => {
            let total = storage.audit().entry_count()?;
            if total == 0 {
                println!("No audit entries.");
            } else {
                let entries = storage.audit().read_recent(limit)?;
                println!("Showing {} of {} audit entries", entries.len(), total);
                for entry in entries {
                    println!("{}", entry.format_human_readable());
                }
            }
        }
        None => {
            println!("Household ledger");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
