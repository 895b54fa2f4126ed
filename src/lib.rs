mod core;
pub mod backend;
pub mod export;
pub mod config;

pub use crate::core::{Ledger, Transaction, Aggregates, format_amount};
pub use crate::core::{error, ledger, transaction};
pub use crate::backend::{KeyValueStore, LedgerStore, JsonStore, MemoryStore};
