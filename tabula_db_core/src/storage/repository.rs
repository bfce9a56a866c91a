use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::command::Query;
use crate::engine::format::{format_explain, format_show_tables};
use crate::error::{DbError, DbResult, Response};
use crate::storage::engine::KvStore;
use crate::storage::schema::{CatalogLookup, ColumnDefinition, Schema, TableConstraint};
use crate::storage::table::Table;
use crate::types::Row;
use crate::types::value::value_to_string;

/// Flattened output of a SELECT, ready for the grid formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Per column: the widest of the upper-cased header and every cell.
    pub widths: Vec<usize>,
}

/// Owns every table and keeps the store identical to the in-memory map.
/// A mutating call either updates both or neither.
#[derive(Debug)]
pub struct Repository<S: KvStore> {
    tables: BTreeMap<String, Table>,
    store: S,
}

impl<S: KvStore> CatalogLookup for Repository<S> {
    fn schema_of(&self, table: &str) -> Option<&Schema> {
        self.tables.get(table).map(|t| &t.schema)
    }
}

impl<S: KvStore> Repository<S> {
    /// Builds the catalog from every record currently in `store`.
    pub fn load(store: S) -> DbResult<Self> {
        let mut tables = BTreeMap::new();
        for (key, value) in store.iterate()? {
            let name = String::from_utf8(key).map_err(|e| DbError::CorruptRecord {
                key: hex::encode(e.as_bytes()),
                reason: "table name is not valid UTF-8".to_string(),
            })?;
            let table = Table::decode(&name, &value)?;
            tables.insert(name, table);
        }
        debug!(tables = tables.len(), "catalog loaded");
        Ok(Self { tables, store })
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Table names in name order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_table(
        &mut self,
        name: &str,
        columns: Vec<ColumnDefinition>,
        constraints: Vec<TableConstraint>,
    ) -> DbResult<Response> {
        if self.tables.contains_key(name) {
            return Err(DbError::TableExistence);
        }
        let schema = Schema::new(columns, constraints).validate(&*self)?;
        let table = Table::new(name, schema);
        self.persist(&table)?;
        self.tables.insert(name.to_string(), table);
        info!(table = name, "table created");
        Ok(Response::Created(name.to_string()))
    }

    /// Refuses while any other table still declares a foreign key to
    /// `name`; only the first such table (in name order) is reported.
    pub fn drop_table(&mut self, name: &str) -> DbResult<Response> {
        if !self.tables.contains_key(name) {
            return Err(DbError::NoSuchTable);
        }
        if let Some(referrer) = self
            .tables
            .values()
            .find(|t| t.name() != name && t.references(name))
        {
            return Err(DbError::DropReferenced {
                table: name.to_string(),
                referenced_by: referrer.name().to_string(),
            });
        }
        self.store.delete(name.as_bytes()).inspect_err(|e| {
            warn!(table = name, error = %e, "store delete failed, table kept");
        })?;
        self.tables.remove(name);
        info!(table = name, "table dropped");
        Ok(Response::Dropped(name.to_string()))
    }

    pub fn insert(
        &mut self,
        name: &str,
        row: Row,
        column_order: Option<&[String]>,
    ) -> DbResult<Response> {
        let table = self.tables.get(name).ok_or(DbError::NoSuchTable)?;
        let mut updated = table.clone();
        updated.insert_row(row, column_order)?;
        self.persist(&updated)?;
        self.tables.insert(name.to_string(), updated);
        info!(table = name, "row inserted");
        Ok(Response::Inserted)
    }

    /// Concatenates the columns of every table in `FROM`. Each source row
    /// fills its own table's columns and leaves the others blank. The
    /// select list is not applied and filters are refused.
    pub fn select(&self, query: &Query) -> DbResult<SelectResult> {
        let mut sources: Vec<&Table> = Vec::with_capacity(query.from.len());
        for reference in &query.from {
            let table = self.tables.get(&reference.table).ok_or(DbError::NoSuchTable)?;
            sources.push(table);
        }
        if query.filter.is_some() {
            return Err(DbError::Unsupported("WHERE"));
        }

        let columns: Vec<String> = sources
            .iter()
            .flat_map(|t| t.schema.columns())
            .map(str::to_string)
            .collect();
        let total = columns.len();

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut offset = 0;
        for table in &sources {
            let width = table.schema.column_count();
            for row in &table.rows {
                let mut cells = vec![String::new(); total];
                for (i, value) in row.iter().take(width).enumerate() {
                    cells[offset + i] = value_to_string(value);
                }
                rows.push(cells);
            }
            offset += width;
        }

        let widths = columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                // headers print upper-cased, which can change their length
                let header = name.to_uppercase().chars().count();
                rows.iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(header))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        Ok(SelectResult {
            columns,
            rows,
            widths,
        })
    }

    pub fn explain(&self, name: &str) -> DbResult<String> {
        let table = self.tables.get(name).ok_or(DbError::NoSuchTable)?;
        Ok(format_explain(table))
    }

    pub fn show_tables(&self) -> String {
        format_show_tables(self.table_names())
    }

    fn persist(&mut self, table: &Table) -> DbResult<()> {
        let bytes = table.encode()?;
        self.store
            .put(table.name().as_bytes(), &bytes)
            .inspect_err(|e| {
                warn!(table = table.name(), error = %e, "store write failed, change discarded");
            })
    }
}
