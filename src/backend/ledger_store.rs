use log::{debug, info, warn};

use crate::backend::interface::KeyValueStore;
use crate::core::{Aggregates, Ledger, LedgerError, LedgerResult, Transaction, TransactionId};

pub const DEFAULT_STORAGE_KEY: &str = "budget_transactions_v1";

/// A ledger bound to a key in a key-value store. Every mutation is written
/// through as one JSON array before it returns.
pub struct LedgerStore<S: KeyValueStore> {
    store: S,
    key: String,
    ledger: Ledger,
}

impl<S: KeyValueStore> LedgerStore<S> {
    /// Loads the ledger stored under `key`. An absent, unreadable or
    /// malformed value yields an empty ledger.
    pub fn load(store: S, key: &str) -> LedgerStore<S> {
        let ledger = Self::read_ledger(&store, key);
        info!("loaded {} transactions from '{}'", ledger.len(), key);
        LedgerStore { store, key: key.to_owned(), ledger }
    }

    fn read_ledger(store: &S, key: &str) -> Ledger {
        let blob = match store.get(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Ledger::new(),
            Err(err) => {
                warn!("could not read '{}', starting empty: {}", key, err);
                return Ledger::new();
            }
        };

        let transactions = match serde_json::from_str::<Vec<Transaction>>(&blob) {
            Ok(transactions) => transactions,
            Err(err) => {
                warn!("discarding malformed ledger under '{}': {}", key, err);
                return Ledger::new();
            }
        };

        Ledger::from_transactions(transactions).unwrap_or_else(|err| {
            warn!("discarding invalid ledger under '{}': {}", key, err);
            Ledger::new()
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn list(&self) -> Vec<Transaction> {
        self.ledger.list()
    }

    pub fn aggregates(&self) -> Aggregates {
        self.ledger.aggregates()
    }

    pub fn add(&mut self, description: &str, amount: f64) -> LedgerResult<Transaction> {
        self.mutate(|ledger| ledger.add(description, amount).map(Transaction::clone))
    }

    /// Removes a transaction by id. Nothing is written when the id is unknown.
    pub fn remove(&mut self, id: TransactionId) -> LedgerResult<bool> {
        if self.ledger.get(id).is_none() {
            return Ok(false);
        }
        self.mutate(|ledger| Ok::<_, LedgerError>(ledger.remove(id)))
    }

    pub fn clear(&mut self) -> LedgerResult<()> {
        self.mutate(|ledger| {
            ledger.clear();
            Ok::<_, LedgerError>(())
        })
    }

    /// Applies `change` and persists the result. If either step fails the
    /// ledger is put back the way it was.
    fn mutate<T, E>(&mut self, change: impl FnOnce(&mut Ledger) -> Result<T, E>) -> LedgerResult<T>
    where
        E: Into<LedgerError>,
    {
        let previous = self.ledger.clone();
        let outcome = change(&mut self.ledger)
            .map_err(Into::into)
            .and_then(|value| self.persist().map(|_| value));

        if outcome.is_err() {
            self.ledger = previous;
        }
        outcome
    }

    fn persist(&mut self) -> LedgerResult<()> {
        let blob = serde_json::to_string(self.ledger.transactions())?;
        self.store.set(&self.key, &blob)?;
        debug!("persisted {} transactions to '{}'", self.ledger.len(), self.key);
        Ok(())
    }
}
