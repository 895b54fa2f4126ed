mod interface;
mod memory_store;
mod json_store;
mod ledger_store;

pub use interface::{KeyValueStore, Result, StoreError};
pub use memory_store::MemoryStore;
pub use json_store::JsonStore;
pub use ledger_store::{LedgerStore, DEFAULT_STORAGE_KEY};
