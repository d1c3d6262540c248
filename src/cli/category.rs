//! Category CLI commands

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::{LedgerError, LedgerResult};
use crate::models::CategoryPurpose;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Add {
        /// Category description
        description: String,
        /// What the category accepts (expense, income, both)
        #[arg(short, long, default_value = "expense")]
        purpose: String,
    },
    /// List categories
    List {
        /// Only categories usable for this purpose (categories accepting both are always listed)
        #[arg(short, long)]
        purpose: Option<String>,
    },
    /// Show category details
    Show {
        /// Category description or ID
        category: String,
    },
    /// Delete a category that no transaction uses
    #[command(alias = "rm")]
    Delete {
        /// Category description or ID
        category: String,
    },
}

fn parse_purpose(purpose: &str) -> LedgerResult<CategoryPurpose> {
    purpose
        .parse()
        .map_err(|e: String| LedgerError::validation("purpose", e))
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> LedgerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add {
            description,
            purpose,
        } => {
            let purpose = parse_purpose(&purpose)?;
            let category = service.create(&description, purpose)?;

            println!("Created category: {}", category.description);
            println!("  Purpose: {}", category.purpose);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List { purpose } => {
            let categories = match purpose {
                Some(purpose) => service.list_by_purpose(parse_purpose(&purpose)?)?,
                None => service.list()?,
            };
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Show { category } => {
            let found = service.resolve(&category)?;
            let count = storage.transactions.count_by_category(found.id)?;
            print!("{}", format_category_details(&found, count));
        }

        CategoryCommands::Delete { category } => {
            let found = service.resolve(&category)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted category: {}", deleted.description);
        }
    }

    Ok(())
}
