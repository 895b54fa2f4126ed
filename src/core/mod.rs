pub mod error;
pub mod transaction;
pub mod ledger;

pub use error::{InvalidInputError, LedgerError, LedgerResult};
pub use transaction::{format_amount, Amount, Transaction, TransactionId};
pub use ledger::{Aggregates, InvalidLedger, Ledger};
