//! Display formatting for terminal output
//!
//! Lists render as `tabled` tables; detail views are plain aligned text.

pub mod category;
pub mod person;
pub mod transaction;

pub use category::{format_category_details, format_category_list};
pub use person::{format_person_details, format_person_list};
pub use transaction::{format_transaction_details, format_transaction_list};

/// Shorten `s` to at most `max_len` characters, marking the cut with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Mercado", 10), "Mercado");
        assert_eq!(truncate("Alimentação e bebidas", 10), "Aliment...");
    }
}
