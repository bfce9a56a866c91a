use std::collections::BTreeMap;

use crate::error::DbResult;
use crate::storage::engine::KvStore;

/// In-memory store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    /// Creates a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemStore {
    fn put(&mut self, key: &[u8], value: &[u8]) -> DbResult<()> {
        self.entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> DbResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn iterate(&self) -> DbResult<Vec<(Vec<u8>, Vec<u8>)>> {
        Ok(self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
