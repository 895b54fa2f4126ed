use std::collections::HashMap;

use crate::backend::interface::{KeyValueStore, Result, StoreError};

/// In-process key-value store. With a quota it behaves like browser
/// local storage: a write that would push the total size of keys and
/// values past the quota is rejected and the old value is kept.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn with_quota(quota: usize) -> MemoryStore {
        MemoryStore { entries: HashMap::new(), quota: Some(quota) }
    }

    fn used_except(&self, key: &str) -> usize {
        self.entries.iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(self.used_except(key));
            if needed > available {
                return Err(StoreError::QuotaExceeded { needed, available });
            }
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
