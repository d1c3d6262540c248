//! Validation of a proposed transaction against its person and category
//!
//! Shape checks run first and produce validation errors naming the field.
//! Only a well-formed request reaches the compatibility rules.

use crate::error::LedgerResult;
use crate::models::transaction::validate_fields;
use crate::models::{Category, Money, Person, Transaction, TransactionKind};

use super::compatibility::{can_post_with, PostingPolicy};

/// Validate a transaction request under the default policy and build the
/// transaction it describes.
pub fn validate_transaction_request(
    person: &Person,
    category: &Category,
    kind: TransactionKind,
    amount: Money,
    description: &str,
) -> LedgerResult<Transaction> {
    validate_transaction_request_with(
        &PostingPolicy::default(),
        person,
        category,
        kind,
        amount,
        description,
    )
}

/// Validate a transaction request and build the transaction it describes.
///
/// The returned transaction is stamped with the current time and has not
/// been persisted.
pub fn validate_transaction_request_with(
    policy: &PostingPolicy,
    person: &Person,
    category: &Category,
    kind: TransactionKind,
    amount: Money,
    description: &str,
) -> LedgerResult<Transaction> {
    validate_fields(description, amount)?;

    can_post_with(policy, person, category, kind).into_result()?;

    Ok(Transaction::new(
        person.id,
        category.id,
        description.trim(),
        amount,
        kind,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::models::CategoryPurpose;

    #[test]
    fn test_minor_income_is_denied() {
        let person = Person::new("A", 16);
        let category = Category::new("Salário", CategoryPurpose::Income);

        let err = validate_transaction_request(
            &person,
            &category,
            TransactionKind::Income,
            Money::from_cents(5000),
            "Mesada",
        )
        .unwrap_err();

        match err {
            LedgerError::BusinessRule(reason) => {
                assert_eq!(reason, "minors cannot record income")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_adult_expense_is_built() {
        let person = Person::new("B", 30);
        let category = Category::new("Alimentação", CategoryPurpose::Expense);

        let txn = validate_transaction_request(
            &person,
            &category,
            TransactionKind::Expense,
            Money::from_cents(12050),
            "  Mercado  ",
        )
        .unwrap();

        assert_eq!(txn.person_id, person.id);
        assert_eq!(txn.category_id, category.id);
        assert_eq!(txn.amount, Money::from_cents(12050));
        assert_eq!(txn.description, "Mercado");
    }

    #[test]
    fn test_shape_errors_come_before_rule_errors() {
        let minor = Person::new("A", 16);
        let category = Category::new("Salário", CategoryPurpose::Income);

        let err = validate_transaction_request(
            &minor,
            &category,
            TransactionKind::Income,
            Money::zero(),
            "Mesada",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::Validation {
                field: "amount",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_description_names_field() {
        let person = Person::new("B", 30);
        let category = Category::new("Geral", CategoryPurpose::Both);

        let err = validate_transaction_request(
            &person,
            &category,
            TransactionKind::Expense,
            Money::from_cents(100),
            "",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            LedgerError::Validation {
                field: "description",
                ..
            }
        ));
    }
}
