use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::core::error::InvalidInputError;
use crate::core::transaction::{format_amount, within_limit, Amount, Transaction, TransactionId};

/// Balance, income and expense totals of a ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Aggregates {
    pub balance: Amount,
    pub income: Amount,
    pub expense: Amount,
}

impl Aggregates {
    pub fn of(transactions: &[Transaction]) -> Aggregates {
        let amounts = || transactions.iter().map(|t| t.amount);

        Aggregates {
            balance: amounts().sum(),
            income: amounts().filter(|a| *a > Decimal::ZERO).sum(),
            expense: amounts().filter(|a| *a < Decimal::ZERO).sum(),
        }
    }

    pub fn balance_display(&self) -> String {
        format_amount(self.balance)
    }

    pub fn income_display(&self) -> String {
        format_amount(self.income)
    }

    pub fn expense_display(&self) -> String {
        format_amount(self.expense)
    }
}

/// Reasons a stored list of transactions cannot be adopted as a ledger.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidLedger {
    #[error("duplicate transaction id: {0}")]
    DuplicateId(TransactionId),
    #[error("transaction {0} has an empty description")]
    EmptyDescription(TransactionId),
    #[error("transaction {0} has an amount out of range")]
    AmountOutOfRange(TransactionId),
}

/// The ordered list of transactions. Insertion order is display order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    last_id: TransactionId,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger::default()
    }

    /// Adopts a previously stored list, checking that ids are unique,
    /// descriptions are non-empty and amounts are within range.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Result<Ledger, InvalidLedger> {
        let mut seen = HashSet::with_capacity(transactions.len());
        for transaction in &transactions {
            if !seen.insert(transaction.id) {
                return Err(InvalidLedger::DuplicateId(transaction.id));
            }
            if transaction.description.trim().is_empty() {
                return Err(InvalidLedger::EmptyDescription(transaction.id));
            }
            if !within_limit(transaction.amount) {
                return Err(InvalidLedger::AmountOutOfRange(transaction.id));
            }
        }

        let last_id = transactions.iter().map(|t| t.id).max().unwrap_or(0);
        Ok(Ledger { transactions, last_id })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// A fresh copy of the transactions, in insertion order.
    pub fn list(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn add(&mut self, description: &str, amount: f64) -> Result<&Transaction, InvalidInputError> {
        self.add_at(Utc::now().timestamp_millis(), description, amount)
    }

    /// Same as [`Ledger::add`], with the creation time given explicitly
    /// in epoch milliseconds.
    pub fn add_at(&mut self, now_millis: i64, description: &str, amount: f64) -> Result<&Transaction, InvalidInputError> {
        let id = self.next_id(now_millis);
        let transaction = Transaction::new(id, description, amount)?;

        self.last_id = id;
        self.transactions.push(transaction);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Removes the transaction with the given id. Returns whether one was found.
    pub fn remove(&mut self, id: TransactionId) -> bool {
        match self.transactions.iter().position(|t| t.id == id) {
            Some(index) => {
                self.transactions.remove(index);
                true
            },
            None => false
        }
    }

    /// Empties the ledger. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    pub fn aggregates(&self) -> Aggregates {
        Aggregates::of(&self.transactions)
    }

    fn next_id(&self, now_millis: i64) -> TransactionId {
        now_millis.max(self.last_id.saturating_add(1))
    }
}
