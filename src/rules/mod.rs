//! Business rules for posting transactions
//!
//! - `compatibility`: the person/category/kind decision function
//! - `request`: full validation of a proposed transaction

pub mod compatibility;
pub mod request;

pub use compatibility::{can_post, can_post_with, PostingDecision, PostingPolicy};
pub use request::{validate_transaction_request, validate_transaction_request_with};
