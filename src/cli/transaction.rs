//! Transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_list};
use crate::error::{LedgerError, LedgerResult};
use crate::models::transaction::validate_fields;
use crate::models::{Money, TransactionKind};
use crate::services::{
    CategoryService, CreateTransactionInput, PersonService, TransactionFilter, TransactionService,
};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Person name or ID
        person: String,
        /// Category description or ID
        category: String,
        /// Amount, strictly positive (e.g., "120.50")
        amount: String,
        /// Transaction kind (expense or income)
        #[arg(short, long, default_value = "expense")]
        kind: String,
        /// What the transaction was for
        #[arg(short, long)]
        description: String,
    },
    /// List transactions, newest first
    List {
        /// Only transactions of this person (name or ID)
        #[arg(short, long)]
        person: Option<String>,
        /// Only transactions in this category (description or ID)
        #[arg(short, long)]
        category: Option<String>,
        /// Only this kind (expense or income)
        #[arg(short, long)]
        kind: Option<String>,
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show a transaction
    Show {
        /// Transaction ID
        id: String,
    },
}

fn parse_kind(kind: &str) -> LedgerResult<TransactionKind> {
    kind.parse().map_err(|e: String| LedgerError::validation("kind", e))
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let service = TransactionService::new(storage).with_policy(settings.posting_policy());
    let people = PersonService::new(storage);
    let categories = CategoryService::new(storage);

    match cmd {
        TransactionCommands::Add {
            person,
            category,
            amount,
            kind,
            description,
        } => {
            let kind = parse_kind(&kind)?;
            let amount = Money::parse(&amount).map_err(|e| {
                LedgerError::validation(
                    "amount",
                    format!("'{}' is not a valid amount: {}", amount, e),
                )
            })?;

            // Field shape is checked before any lookup
            validate_fields(&description, amount)?;

            // Unknown references are refused as business rule violations
            let person_id = match people.find(&person)? {
                Some(found) => found.id,
                None => return Err(LedgerError::unresolved_reference("Person", person)),
            };
            let category_id = match categories.find(&category)? {
                Some(found) => found.id,
                None => return Err(LedgerError::unresolved_reference("Category", category)),
            };

            let txn = service.create(CreateTransactionInput {
                person_id,
                category_id,
                description,
                amount,
                kind,
            })?;

            println!("Recorded {}: {}", txn.kind, txn.description);
            println!(
                "  Amount: {}",
                txn.amount.format_with_symbol(&settings.currency_symbol)
            );
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List {
            person,
            category,
            kind,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(person) = person {
                filter = filter.person(people.resolve(&person)?.id);
            }
            if let Some(category) = category {
                filter = filter.category(categories.resolve(&category)?.id);
            }
            if let Some(kind) = kind {
                filter = filter.kind(parse_kind(&kind)?);
            }

            let views = service.list_views(&filter)?;
            print!(
                "{}",
                format_transaction_list(&views, &settings.currency_symbol, &settings.date_format)
            );
        }

        TransactionCommands::Show { id } => {
            let view = service
                .find_view(&id)?
                .ok_or_else(|| LedgerError::transaction_not_found(&id))?;
            print!(
                "{}",
                format_transaction_details(&view, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}
