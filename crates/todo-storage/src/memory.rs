//! In-process store

use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::store::{KeyValueStore, WriteGuard};
use crate::Result;

/// Volatile store backed by a shared ordered map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
    writer: Arc<Mutex<()>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn set_many(&self, entries: &[(String, String)]) -> Result<()> {
        let mut map = self.entries.write();
        for (key, value) in entries {
            map.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .entries
            .read()
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }

    fn write_guard(&self) -> WriteGuard<'_> {
        self.writer.lock()
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            writer: Arc::clone(&self.writer),
        }
    }
}
