pub mod schema;
pub mod table;
pub mod engine;
pub mod mem;
pub mod disk;
pub mod repository;

// Re-export main types for convenience
pub use schema::{CatalogLookup, ColumnDefinition, KeyType, Schema, TableConstraint};
pub use table::{Table, TableRecord};
pub use engine::KvStore;
pub use mem::MemStore;
pub use disk::FileStore;
pub use repository::{Repository, SelectResult};
