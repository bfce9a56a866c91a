//! Typed statement arguments, as handed over by a statement parser.

use crate::storage::schema::{ColumnDefinition, TableConstraint};
use crate::types::Row;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReference {
    pub table: String,
    pub alias: Option<String>,
}

impl TableReference {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// `None` for `*`.
    pub columns: Option<Vec<String>>,
    pub from: Vec<TableReference>,
    /// Raw WHERE text; predicates are never evaluated.
    pub filter: Option<String>,
}

impl Query {
    pub fn all_from(tables: &[&str]) -> Self {
        Self {
            columns: None,
            from: tables.iter().map(|t| TableReference::new(*t)).collect(),
            filter: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateTable {
        table: String,
        columns: Vec<ColumnDefinition>,
        constraints: Vec<TableConstraint>,
    },
    DropTable {
        table: String,
    },
    Select(Query),
    Insert {
        table: String,
        columns: Option<Vec<String>>,
        values: Row,
    },
    Explain {
        table: String,
    },
    ShowTables,
    Update {
        table: String,
    },
    Delete {
        table: String,
    },
}
