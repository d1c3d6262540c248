//! Transaction display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::services::TransactionView;

use super::truncate;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Person")]
    person: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format transactions as a table, newest first as given
pub fn format_transaction_list(
    views: &[TransactionView],
    currency: &str,
    date_format: &str,
) -> String {
    if views.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = views.iter().map(|v| {
        let txn = &v.transaction;
        TransactionRow {
            id: txn.id.to_string(),
            date: txn.created_at.format(date_format).to_string(),
            person: truncate(&v.person_name, 20),
            category: truncate(&v.category_description, 20),
            description: truncate(&txn.description, 30),
            kind: txn.kind.to_string(),
            amount: txn.signed_amount().format_with_symbol(currency),
        }
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::last(), Alignment::right());
    format!("{}\n", table)
}

/// Format a single transaction
pub fn format_transaction_details(view: &TransactionView, currency: &str) -> String {
    let txn = &view.transaction;
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("  Description: {}\n", txn.description));
    output.push_str(&format!("  Kind:        {}\n", txn.kind));
    output.push_str(&format!(
        "  Amount:      {}\n",
        txn.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "  Person:      {} ({})\n",
        view.person_name, txn.person_id
    ));
    output.push_str(&format!(
        "  Category:    {} ({})\n",
        view.category_description, txn.category_id
    ));
    output.push_str(&format!(
        "  Recorded:    {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money, PersonId, Transaction, TransactionKind};

    fn view(kind: TransactionKind, cents: i64) -> TransactionView {
        TransactionView {
            transaction: Transaction::new(
                PersonId::new(),
                CategoryId::new(),
                "Mercado",
                Money::from_cents(cents),
                kind,
            ),
            person_name: "Bruno".to_string(),
            category_description: "Alimentação".to_string(),
        }
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_transaction_list(&[], "$", "%Y-%m-%d"),
            "No transactions found.\n"
        );
    }

    #[test]
    fn test_expense_shown_negative() {
        let output = format_transaction_list(
            &[view(TransactionKind::Expense, 12050)],
            "$",
            "%Y-%m-%d",
        );

        assert!(output.contains("Bruno"));
        assert!(output.contains("Alimentação"));
        assert!(output.contains("-$120.50"));
    }

    #[test]
    fn test_details() {
        let output = format_transaction_details(&view(TransactionKind::Income, 500), "R$");
        assert!(output.contains("Amount:      R$5.00"));
        assert!(output.contains("Kind:        Income"));
    }
}
