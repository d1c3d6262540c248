//! Transaction service
//!
//! Posting goes through two checks. Field shape is validated before any
//! lookup, then the referenced person and category are resolved under the
//! store's locks and the posting rules are applied to them.

use std::collections::HashMap;

use crate::audit::EntityType;
use crate::error::LedgerResult;
use crate::models::transaction::validate_fields;
use crate::models::{CategoryId, Money, PersonId, Transaction, TransactionId, TransactionKind};
use crate::rules::{validate_transaction_request_with, PostingPolicy};
use crate::storage::{Repository, Storage};

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    policy: PostingPolicy,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub person_id: Option<PersonId>,
    pub category_id: Option<CategoryId>,
    pub kind: Option<TransactionKind>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn person(mut self, person_id: PersonId) -> Self {
        self.person_id = Some(person_id);
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        self.person_id.map_or(true, |id| txn.person_id == id)
            && self.category_id.map_or(true, |id| txn.category_id == id)
            && self.kind.map_or(true, |kind| txn.kind == kind)
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub person_id: PersonId,
    pub category_id: CategoryId,
    pub description: String,
    pub amount: Money,
    pub kind: TransactionKind,
}

/// A transaction with its references resolved for display
#[derive(Debug, Clone)]
pub struct TransactionView {
    pub transaction: Transaction,
    pub person_name: String,
    pub category_description: String,
}

impl<'a> TransactionService<'a> {
    /// Create a transaction service using the default posting policy
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            policy: PostingPolicy::default(),
        }
    }

    /// Use `policy` instead of the default posting rules
    pub fn with_policy(mut self, policy: PostingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate and record a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> LedgerResult<Transaction> {
        validate_fields(&input.description, input.amount)?;

        let result = self
            .storage
            .post_transaction(input.person_id, input.category_id, |person, category| {
                validate_transaction_request_with(
                    &self.policy,
                    person,
                    category,
                    input.kind,
                    input.amount,
                    &input.description,
                )
            });

        let txn = match result {
            Ok(txn) => txn,
            Err(e) => {
                if e.is_business_rule() {
                    tracing::warn!(
                        person = %input.person_id,
                        category = %input.category_id,
                        kind = %input.kind,
                        error = %e,
                        "transaction rejected"
                    );
                }
                return Err(e);
            }
        };

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.description.clone()),
            &txn,
        );

        tracing::info!(
            transaction = %txn.id,
            person = %txn.person_id,
            kind = %txn.kind,
            amount = %txn.amount,
            "recorded transaction"
        );
        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Transactions matching `filter`, newest first
    pub fn list(&self, filter: &TransactionFilter) -> LedgerResult<Vec<Transaction>> {
        let mut transactions = match (filter.person_id, filter.category_id) {
            (Some(person_id), _) => self.storage.transactions.get_by_person(person_id)?,
            (None, Some(category_id)) => self.storage.transactions.get_by_category(category_id)?,
            (None, None) => self.storage.transactions.get_all()?,
        };
        transactions.retain(|txn| filter.matches(txn));

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Like [`TransactionService::list`], with person names and category
    /// descriptions attached
    pub fn list_views(&self, filter: &TransactionFilter) -> LedgerResult<Vec<TransactionView>> {
        let transactions = self.list(filter)?;
        self.attach_names(transactions)
    }

    /// Find a transaction by its full or short ID
    pub fn find_view(&self, identifier: &str) -> LedgerResult<Option<TransactionView>> {
        let matches = self
            .storage
            .transactions
            .find_all(|txn| txn.id.matches(identifier))?;
        Ok(self.attach_names(matches)?.into_iter().next())
    }

    fn attach_names(&self, transactions: Vec<Transaction>) -> LedgerResult<Vec<TransactionView>> {
        let people: HashMap<_, _> = self
            .storage
            .people
            .get_all()?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();
        let categories: HashMap<_, _> = self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .map(|c| (c.id, c.description))
            .collect();

        Ok(transactions
            .into_iter()
            .map(|transaction| TransactionView {
                person_name: people
                    .get(&transaction.person_id)
                    .cloned()
                    .unwrap_or_else(|| transaction.person_id.to_string()),
                category_description: categories
                    .get(&transaction.category_id)
                    .cloned()
                    .unwrap_or_else(|| transaction.category_id.to_string()),
                transaction,
            })
            .collect())
    }

    pub fn count(&self) -> LedgerResult<usize> {
        self.storage.transactions.count()
    }
}
