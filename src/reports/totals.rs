//! Income/expense rollup shared by every summary

use std::ops::AddAssign;

use crate::models::{Money, Transaction, TransactionKind};

/// Income, expense and count over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub total_income: Money,
    pub total_expense: Money,
    pub transaction_count: usize,
}

impl Totals {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Roll up `transactions`
    pub fn from_transactions<'t, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'t Transaction>,
    {
        let mut totals = Self::zero();
        for txn in transactions {
            totals.record(txn);
        }
        totals
    }

    /// Add one transaction
    pub fn record(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionKind::Income => self.total_income += txn.amount,
            TransactionKind::Expense => self.total_expense += txn.amount,
        }
        self.transaction_count += 1;
    }

    /// `total_income - total_expense`
    pub fn balance(&self) -> Money {
        self.total_income - self.total_expense
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Self) {
        self.total_income += other.total_income;
        self.total_expense += other.total_expense;
        self.transaction_count += other.transaction_count;
    }
}

impl std::iter::Sum for Totals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut acc, totals| {
            acc += totals;
            acc
        })
    }
}
