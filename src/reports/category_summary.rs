//! Per-category summary report

use std::collections::HashMap;
use std::io::Write;

use crate::display::truncate;
use crate::error::LedgerResult;
use crate::models::{Category, CategoryId, CategoryPurpose, Money, Transaction};
use crate::storage::{Repository, Storage};

use super::{SummarySort, Totals};

/// Summary for a single category
#[derive(Debug, Clone)]
pub struct CategorySummaryRow {
    pub category_id: CategoryId,
    pub description: String,
    pub purpose: CategoryPurpose,
    pub totals: Totals,
}

impl CategorySummaryRow {
    pub fn balance(&self) -> Money {
        self.totals.balance()
    }
}

/// Per-category totals and their general total
#[derive(Debug, Clone)]
pub struct CategorySummaryReport {
    pub rows: Vec<CategorySummaryRow>,
    pub total: Totals,
}

/// Roll `transactions` up per category, one row per entry of `categories`
/// in the same order. Transactions under unlisted categories are ignored.
pub fn summarize_by_category(
    transactions: &[Transaction],
    categories: &[Category],
) -> CategorySummaryReport {
    let mut by_category: HashMap<CategoryId, Totals> = categories
        .iter()
        .map(|c| (c.id, Totals::zero()))
        .collect();

    for txn in transactions {
        if let Some(totals) = by_category.get_mut(&txn.category_id) {
            totals.record(txn);
        }
    }

    let rows: Vec<_> = categories
        .iter()
        .map(|c| CategorySummaryRow {
            category_id: c.id,
            description: c.description.clone(),
            purpose: c.purpose,
            totals: by_category.get(&c.id).copied().unwrap_or_default(),
        })
        .collect();

    let total = rows.iter().map(|r| r.totals).sum();
    CategorySummaryReport { rows, total }
}

impl CategorySummaryReport {
    pub fn generate(storage: &Storage) -> LedgerResult<Self> {
        let categories = storage.categories.get_all()?;
        let transactions = storage.transactions.get_all()?;
        Ok(summarize_by_category(&transactions, &categories))
    }

    pub fn sorted(mut self, sort: SummarySort) -> Self {
        match sort {
            SummarySort::Insertion => {}
            SummarySort::Name => self.rows.sort_by_key(|r| r.description.to_lowercase()),
            SummarySort::Balance => self.rows.sort_by(|a, b| b.balance().cmp(&a.balance())),
        }
        self
    }

    pub fn row(&self, category_id: CategoryId) -> Option<&CategorySummaryRow> {
        self.rows.iter().find(|r| r.category_id == category_id)
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Totals by Category\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:<8} {:>12} {:>12} {:>12}\n",
            "Category", "Purpose", "Income", "Expense", "Balance"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<30} {:<8} {:>12} {:>12} {:>12}\n",
                truncate(&row.description, 30),
                row.purpose.to_string(),
                row.totals.total_income.format_with_symbol(currency),
                row.totals.total_expense.format_with_symbol(currency),
                row.balance().format_with_symbol(currency),
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<39} {:>12} {:>12} {:>12}\n",
            "GENERAL TOTAL",
            self.total.total_income.format_with_symbol(currency),
            self.total.total_expense.format_with_symbol(currency),
            self.total.balance().format_with_symbol(currency),
        ));

        output
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "Category",
            "Purpose",
            "Income",
            "Expense",
            "Balance",
            "Transactions",
        ])?;

        for row in &self.rows {
            csv.write_record([
                row.description.clone(),
                row.purpose.to_string(),
                row.totals.total_income.to_decimal_string(),
                row.totals.total_expense.to_decimal_string(),
                row.balance().to_decimal_string(),
                row.totals.transaction_count.to_string(),
            ])?;
        }

        csv.write_record([
            "TOTAL".to_string(),
            String::new(),
            self.total.total_income.to_decimal_string(),
            self.total.total_expense.to_decimal_string(),
            self.total.balance().to_decimal_string(),
            self.total.transaction_count.to_string(),
        ])?;

        csv.flush()?;
        Ok(())
    }
}
