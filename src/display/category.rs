//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Purpose")]
    purpose: String,
}

/// Format categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.to_string(),
        description: c.description.clone(),
        purpose: c.purpose.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format category details, including how many transactions use it
pub fn format_category_details(category: &Category, transaction_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.description));
    output.push_str(&format!("  ID:           {}\n", category.id));
    output.push_str(&format!("  Purpose:      {}\n", category.purpose));
    output.push_str(&format!("  Transactions: {}\n", transaction_count));
    output.push_str(&format!(
        "  Created:      {}\n",
        category.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
