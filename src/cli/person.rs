//! Person CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::person::{format_person_details, format_person_list};
use crate::error::LedgerResult;
use crate::reports::Totals;
use crate::services::PersonService;
use crate::storage::Storage;

/// Person subcommands
#[derive(Subcommand)]
pub enum PersonCommands {
    /// Register a new person
    Add {
        /// Full name
        name: String,
        /// Age in whole years (1-150)
        #[arg(short, long)]
        age: u32,
    },
    /// List all people
    List,
    /// Show a person with their totals
    Show {
        /// Person name or ID
        person: String,
    },
    /// Delete a person and all of their transactions
    #[command(alias = "rm")]
    Delete {
        /// Person name or ID
        person: String,
    },
}

/// Handle a person command
pub fn handle_person_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PersonCommands,
) -> LedgerResult<()> {
    let service = PersonService::new(storage);

    match cmd {
        PersonCommands::Add { name, age } => {
            let person = service.create(&name, age)?;

            println!("Created person: {}", person.name);
            println!("  Age: {}", person.age);
            if person.is_minor_under(settings.minor_age_threshold) {
                println!("  Minor: income transactions will be refused");
            }
            println!("  ID: {}", person.id);
        }

        PersonCommands::List => {
            let people = service.list()?;
            print!("{}", format_person_list(&people, settings.minor_age_threshold));
        }

        PersonCommands::Show { person } => {
            let found = service.resolve(&person)?;
            let transactions = storage.transactions.get_by_person(found.id)?;
            let totals = Totals::from_transactions(&transactions);

            print!(
                "{}",
                format_person_details(
                    &found,
                    &totals,
                    settings.minor_age_threshold,
                    &settings.currency_symbol
                )
            );
        }

        PersonCommands::Delete { person } => {
            let found = service.resolve(&person)?;
            let deleted = service.delete(found.id)?;

            println!("Deleted person: {}", deleted.person.name);
            println!("  Removed {} transaction(s)", deleted.transactions.len());
        }
    }

    Ok(())
}
