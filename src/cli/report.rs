//! CLI commands for reports

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::reports::{CategorySummaryReport, PersonSummaryReport, SummarySort};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expense and balance per person, with a general total
    #[command(alias = "persons")]
    People {
        /// Row order (insertion, name, balance)
        #[arg(short, long, default_value = "insertion")]
        sort: String,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Income, expense and balance per category, with a general total
    Categories {
        /// Row order (insertion, name, balance)
        #[arg(short, long, default_value = "insertion")]
        sort: String,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_sort(sort: &str) -> LedgerResult<SummarySort> {
    sort.parse().map_err(|e: String| LedgerError::validation("sort", e))
}

fn create_output(path: &Path) -> LedgerResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    match cmd {
        ReportCommands::People { sort, output } => {
            let report = PersonSummaryReport::generate(storage)?.sorted(parse_sort(&sort)?);

            if let Some(path) = output {
                report.export_csv(create_output(&path)?)?;
                println!("Person report exported to: {}", path.display());
            } else {
                print!("{}", report.format_terminal(&settings.currency_symbol));
            }
        }

        ReportCommands::Categories { sort, output } => {
            let report = CategorySummaryReport::generate(storage)?.sorted(parse_sort(&sort)?);

            if let Some(path) = output {
                report.export_csv(create_output(&path)?)?;
                println!("Category report exported to: {}", path.display());
            } else {
                print!("{}", report.format_terminal(&settings.currency_symbol));
            }
        }
    }

    Ok(())
}
