use crate::error::DbResult;

/// Byte-oriented key-value store behind the catalog. Keys are table names,
/// values are encoded table records. No ordering is promised by `iterate`.
pub trait KvStore {
    /// Stores `value` under `key`, replacing any previous value
    fn put(&mut self, key: &[u8], value: &[u8]) -> DbResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> DbResult<()>;

    /// Returns every stored pair
    fn iterate(&self) -> DbResult<Vec<(Vec<u8>, Vec<u8>)>>;
}
