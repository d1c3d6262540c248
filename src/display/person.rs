//! Person display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Person;
use crate::reports::Totals;

#[derive(Tabled)]
struct PersonRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Age")]
    age: u32,
    #[tabled(rename = "Minor")]
    minor: &'static str,
}

/// Format people as a table; minors are flagged against `minor_age_threshold`
pub fn format_person_list(people: &[Person], minor_age_threshold: u32) -> String {
    if people.is_empty() {
        return "No people found.\n\nAdd one with 'ledger person add <name> --age <age>'.\n"
            .to_string();
    }

    let rows = people.iter().map(|p| PersonRow {
        id: p.id.to_string(),
        name: p.name.clone(),
        age: p.age,
        minor: if p.is_minor_under(minor_age_threshold) {
            "yes"
        } else {
            "no"
        },
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format a person with their running totals
pub fn format_person_details(
    person: &Person,
    totals: &Totals,
    minor_age_threshold: u32,
    currency: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Person: {}\n", person.name));
    output.push_str(&format!("  ID:       {}\n", person.id));
    output.push_str(&format!("  Age:      {}\n", person.age));
    output.push_str(&format!(
        "  Minor:    {}\n",
        if person.is_minor_under(minor_age_threshold) {
            "Yes (income not allowed)"
        } else {
            "No"
        }
    ));
    output.push('\n');
    output.push_str(&format!(
        "  Income:   {}\n",
        totals.total_income.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "  Expense:  {}\n",
        totals.total_expense.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "  Balance:  {}\n",
        totals.balance().format_with_symbol(currency)
    ));
    output.push_str(&format!("  Transactions: {}\n", totals.transaction_count));
    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        person.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
