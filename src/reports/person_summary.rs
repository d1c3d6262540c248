//! Per-person summary report
//!
//! One row per person, including people without transactions, plus a
//! general total across all rows.

use std::collections::HashMap;
use std::io::Write;

use crate::display::truncate;
use crate::error::LedgerResult;
use crate::models::{Money, Person, PersonId, Transaction};
use crate::storage::{Repository, Storage};

use super::{SummarySort, Totals};

/// Summary for a single person
#[derive(Debug, Clone)]
pub struct PersonSummaryRow {
    pub person_id: PersonId,
    pub name: String,
    pub age: u32,
    pub totals: Totals,
}

impl PersonSummaryRow {
    pub fn balance(&self) -> Money {
        self.totals.balance()
    }
}

/// Per-person totals and their general total
#[derive(Debug, Clone)]
pub struct PersonSummaryReport {
    pub rows: Vec<PersonSummaryRow>,
    pub total: Totals,
}

/// Roll `transactions` up per person.
///
/// Rows follow the order of `persons`. Transactions owned by someone not in
/// `persons` are left out of both the rows and the total.
pub fn summarize_by_person(
    transactions: &[Transaction],
    persons: &[Person],
) -> PersonSummaryReport {
    let mut by_person: HashMap<PersonId, Totals> = persons
        .iter()
        .map(|p| (p.id, Totals::zero()))
        .collect();

    for txn in transactions {
        if let Some(totals) = by_person.get_mut(&txn.person_id) {
            totals.record(txn);
        }
    }

    let rows: Vec<_> = persons
        .iter()
        .map(|p| PersonSummaryRow {
            person_id: p.id,
            name: p.name.clone(),
            age: p.age,
            totals: by_person.get(&p.id).copied().unwrap_or_default(),
        })
        .collect();

    let total = rows.iter().map(|r| r.totals).sum();
    PersonSummaryReport { rows, total }
}

impl PersonSummaryReport {
    /// Build the report from everything in storage
    pub fn generate(storage: &Storage) -> LedgerResult<Self> {
        let people = storage.people.get_all()?;
        let transactions = storage.transactions.get_all()?;
        Ok(summarize_by_person(&transactions, &people))
    }

    /// Reorder rows; the total is unaffected
    pub fn sorted(mut self, sort: SummarySort) -> Self {
        match sort {
            SummarySort::Insertion => {}
            SummarySort::Name => self.rows.sort_by_key(|r| r.name.to_lowercase()),
            SummarySort::Balance => self.rows.sort_by(|a, b| b.balance().cmp(&a.balance())),
        }
        self
    }

    pub fn row(&self, person_id: PersonId) -> Option<&PersonSummaryRow> {
        self.rows.iter().find(|r| r.person_id == person_id)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Totals by Person\n");
        output.push_str(&"=".repeat(78));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>5} {:>12} {:>12} {:>12}\n",
            "Person", "Age", "Income", "Expense", "Balance"
        ));
        output.push_str(&"-".repeat(78));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<30} {:>5} {:>12} {:>12} {:>12}\n",
                truncate(&row.name, 30),
                row.age,
                row.totals.total_income.format_with_symbol(currency),
                row.totals.total_expense.format_with_symbol(currency),
                row.balance().format_with_symbol(currency),
            ));
        }

        output.push_str(&"-".repeat(78));
        output.push('\n');
        output.push_str(&format!(
            "{:<36} {:>12} {:>12} {:>12}\n",
            "GENERAL TOTAL",
            self.total.total_income.format_with_symbol(currency),
            self.total.total_expense.format_with_symbol(currency),
            self.total.balance().format_with_symbol(currency),
        ));

        output
    }

    /// Export the report to CSV, total row last
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Person", "Age", "Income", "Expense", "Balance", "Transactions"])?;

        for row in &self.rows {
            csv.write_record([
                row.name.clone(),
                row.age.to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, TransactionKind};

    fn txn(person: &Person, kind: TransactionKind, amount: &str) -> Transaction {
        Transaction::new(
            person.id,
            CategoryId::new(),
            "x",
            Money::parse(amount).unwrap(),
            kind,
        )
    }

    #[test]
    fn test_single_expense_gives_negative_balance() {
        let bruno = Person::new("Bruno", 30);
        let transactions = vec![txn(&bruno, TransactionKind::Expense, "120.50")];

        let report = summarize_by_person(&transactions, &[bruno.clone()]);

        let row = report.row(bruno.id).unwrap();
        assert_eq!(row.totals.total_expense, Money::from_cents(12050));
        assert_eq!(row.balance(), Money::from_cents(-12050));
    }

    #[test]
    fn test_totals_for_mixed_person() {
        let carla = Person::new("Carla", 45);
        let transactions = vec![
            txn(&carla, TransactionKind::Income, "1000.00"),
            txn(&carla, TransactionKind::Expense, "200.00"),
            txn(&carla, TransactionKind::Expense, "50.00"),
        ];

        let report = summarize_by_person(&transactions, &[carla.clone()]);

        let row = report.row(carla.id).unwrap();
        assert_eq!(row.totals.total_income, Money::from_cents(100_000));
        assert_eq!(row.totals.total_expense, Money::from_cents(25_000));
        assert_eq!(row.balance(), Money::from_cents(75_000));
    }

    #[test]
    fn test_people_without_transactions_are_listed_in_order() {
        let people = vec![
            Person::new("Carla", 45),
            Person::new("Ana", 16),
            Person::new("Bruno", 30),
        ];
        let transactions = vec![txn(&people[2], TransactionKind::Expense, "10.00")];

        let report = summarize_by_person(&transactions, &people);

        let names: Vec<_> = report.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Carla", "Ana", "Bruno"]);
        assert_eq!(report.rows[0].totals, Totals::zero());
    }

    #[test]
    fn test_general_total_is_sum_of_rows() {
        let people = vec![Person::new("Ana", 16), Person::new("Bruno", 30)];
        let stranger = Person::new("Unknown", 50);
        let transactions = vec![
            txn(&people[0], TransactionKind::Expense, "15.00"),
            txn(&people[1], TransactionKind::Income, "300.00"),
            txn(&people[1], TransactionKind::Expense, "99.99"),
            txn(&stranger, TransactionKind::Income, "1000.00"),
        ];

        let report = summarize_by_person(&transactions, &people);

        let income: Money = report.rows.iter().map(|r| r.totals.total_income).sum();
        let expense: Money = report.rows.iter().map(|r| r.totals.total_expense).sum();
        assert_eq!(report.total.total_income, income);
        assert_eq!(report.total.total_expense, expense);
        assert_eq!(report.total.balance(), income - expense);
        assert_eq!(report.total.transaction_count, 3);
    }

    #[test]
    fn test_sort_by_balance_descending() {
        let people = vec![Person::new("Ana", 16), Person::new("Bruno", 30)];
        let transactions = vec![
            txn(&people[0], TransactionKind::Expense, "15.00"),
            txn(&people[1], TransactionKind::Income, "300.00"),
        ];

        let report = summarize_by_person(&transactions, &people).sorted(SummarySort::Balance);

        assert_eq!(report.rows[0].name, "Bruno");
        assert_eq!(report.total.balance(), Money::from_cents(28_500));
    }

    #[test]
    fn test_export_csv() {
        let bruno = Person::new("Bruno", 30);
        let transactions = vec![txn(&bruno, TransactionKind::Expense, "120.50")];
        let report = summarize_by_person(&transactions, &[bruno]);

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Person,Age,Income,Expense,Balance,Transactions");
        assert_eq!(lines[1], "Bruno,30,0.00,120.50,-120.50,1");
        assert_eq!(lines[2], "TOTAL,,0.00,120.50,-120.50,1");
    }

    #[test]
    fn test_format_terminal_shows_total() {
        let report = summarize_by_person(&[], &[Person::new("Ana", 16)]);
        let output = report.format_terminal("$");
        assert!(output.contains("Ana"));
        assert!(output.contains("GENERAL TOTAL"));
        assert!(output.contains("$0.00"));
    }
}
