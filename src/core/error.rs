use thiserror::Error;

use crate::backend::StoreError;

/// Rejected input to [`Ledger::add`](crate::core::Ledger::add).
/// The ledger is never modified when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidInputError {
    /// The description was empty, or only whitespace.
    #[error("description must not be empty")]
    EmptyDescription,
    /// The amount was NaN or infinite.
    #[error("amount must be a finite number, got {0}")]
    NonFiniteAmount(f64),
    /// The amount is finite but too large to be represented as a decimal.
    #[error("amount {0} is out of range")]
    AmountOutOfRange(f64),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
    /// Occurs when the storage backend rejects the write that follows
    /// a mutation. The mutation has been undone.
    #[error("failed to persist ledger: {0}")]
    Persistence(#[from] StoreError),
    #[error("failed to serialize ledger: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
