//! Error and response types shared by every catalog operation.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type for catalog operations.
pub type DbResult<T> = Result<T, DbError>;

/// Failures a statement can end in. Only the first violation found is
/// ever reported.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Syntax error")]
    Syntax,

    #[error("Create table has failed: column definition is duplicated")]
    DuplicateColumnDef,

    #[error("Create table has failed: primary key definition is duplicated")]
    DuplicatePrimaryKeyDef,

    #[error("Create table has failed: foreign key references wrong type")]
    ReferenceType,

    #[error("Create table has failed: foreign key references non primary key column")]
    ReferenceNonPrimaryKey,

    #[error("Create table has failed: foreign key references non existing column")]
    ReferenceColumnExistence,

    #[error("Create table has failed: foreign key references non existing table")]
    ReferenceTableExistence,

    #[error("Create table has failed: '{0}' does not exist in column definition")]
    NonExistingColumnDef(String),

    #[error("Create table has failed: table with the same name already exists")]
    TableExistence,

    #[error("Char length should be over 0")]
    CharLength,

    #[error("No such table")]
    NoSuchTable,

    /// `table` is still the target of a foreign key declared by
    /// `referenced_by`.
    #[error("Drop table has failed: '{table}' is referenced by other table")]
    DropReferenced { table: String, referenced_by: String },

    #[error("Insertion has failed: expected {expected} values but got {actual}")]
    InsertColumnCount { expected: usize, actual: usize },

    #[error("Insertion has failed: '{0}' does not exist")]
    InsertColumnExistence(String),

    #[error("'{0}' is not supported")]
    Unsupported(&'static str),

    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode table record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupted table record '{key}': {reason}")]
    CorruptRecord { key: String, reason: String },
}

/// Successful outcome of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Created(String),
    Dropped(String),
    Inserted,
    /// Pre-rendered multi-line output (reports and result grids).
    Rendered(String),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Created(table) => write!(f, "'{table}' table is created"),
            Response::Dropped(table) => write!(f, "'{table}' table is dropped"),
            Response::Inserted => f.write_str("The row is inserted"),
            Response::Rendered(text) => f.write_str(text),
        }
    }
}
