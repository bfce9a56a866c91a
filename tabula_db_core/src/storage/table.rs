use serde::{Deserialize, Serialize};

use crate::error::{DbError, DbResult};
use crate::storage::schema::Schema;
use crate::types::Row;
use crate::types::value::Value;

/// A named schema and its rows. Rows are append-only and always in the
/// schema's canonical column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    table_name: String,
    pub schema: Schema,
    pub rows: Vec<Row>,
}

/// On-store shape of a table. The name is the record's key, not part of
/// the value.
#[derive(Debug, Serialize, Deserialize)]
pub struct TableRecord {
    pub schema: Schema,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(table_name: impl Into<String>, schema: Schema) -> Self {
        Self {
            table_name: table_name.into(),
            schema,
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.table_name
    }

    /// Appends a row. With `column_order` the values are given in that
    /// order and get permuted into canonical order; the list must name
    /// every column exactly once. Values are not checked against column
    /// types, lengths or NOT NULL.
    pub fn insert_row(&mut self, row: Row, column_order: Option<&[String]>) -> DbResult<()> {
        let expected = self.schema.column_count();
        if row.len() != expected {
            return Err(DbError::InsertColumnCount {
                expected,
                actual: row.len(),
            });
        }

        let row = match column_order {
            None => row,
            Some(order) => self.to_canonical(row, order)?,
        };
        self.rows.push(row);
        Ok(())
    }

    fn to_canonical(&self, row: Row, order: &[String]) -> DbResult<Row> {
        if order.len() != row.len() {
            return Err(DbError::InsertColumnCount {
                expected: order.len(),
                actual: row.len(),
            });
        }
        let mut slots: Vec<Option<Value>> = vec![None; self.schema.column_count()];
        for (name, value) in order.iter().zip(row) {
            let pos = self
                .schema
                .column_position(name)
                .ok_or_else(|| DbError::InsertColumnExistence(name.clone()))?;
            if slots[pos].is_some() {
                return Err(DbError::InsertColumnExistence(name.clone()));
            }
            slots[pos] = Some(value);
        }
        // Lengths match and every slot was filled at most once, so every
        // slot is filled.
        Ok(slots.into_iter().map(|v| v.unwrap_or(Value::Null)).collect())
    }

    /// True iff one of this table's foreign keys targets `other`.
    pub fn references(&self, other: &str) -> bool {
        self.schema
            .foreign_keys()
            .any(|fk| fk.reference_table.as_deref() == Some(other))
    }

    pub fn to_record(&self) -> TableRecord {
        TableRecord {
            schema: self.schema.clone(),
            rows: self.rows.clone(),
        }
    }

    pub fn from_record(table_name: impl Into<String>, record: TableRecord) -> Self {
        let mut schema = record.schema;
        schema.normalize();
        Self {
            table_name: table_name.into(),
            schema,
            rows: record.rows,
        }
    }

    pub fn encode(&self) -> DbResult<Vec<u8>> {
        Ok(serde_json::to_vec(&self.to_record())?)
    }

    pub fn decode(table_name: &str, bytes: &[u8]) -> DbResult<Self> {
        let record: TableRecord =
            serde_json::from_slice(bytes).map_err(|e| DbError::CorruptRecord {
                key: table_name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_record(table_name, record))
    }
}
