use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::types::datatype::DataType;

/// Represents a single column in a table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub column_name: String,
    pub data_type: DataType,
    /// Declared length, only meaningful for `char`.
    pub data_len: Option<i64>,
    pub not_null: bool,
}

impl ColumnDefinition {
    pub fn new(
        column_name: impl Into<String>,
        data_type: DataType,
        data_len: Option<i64>,
        not_null: bool,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            data_type,
            data_len,
            not_null,
        }
    }

    pub fn int(column_name: impl Into<String>) -> Self {
        Self::new(column_name, DataType::Int, None, false)
    }

    pub fn char(column_name: impl Into<String>, len: i64) -> Self {
        Self::new(column_name, DataType::Char, Some(len), false)
    }

    pub fn date(column_name: impl Into<String>) -> Self {
        Self::new(column_name, DataType::Date, None, false)
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Foreign keys pair columns by type and length, not nullability.
    pub fn same_type_as(&self, other: &ColumnDefinition) -> bool {
        self.data_type == other.data_type && self.data_len == other.data_len
    }

    fn has_valid_length(&self) -> bool {
        self.data_len.is_none_or(|len| len > 0)
    }

    /// `char(10)`, `int`, `date`
    pub fn type_label(&self) -> String {
        match (self.data_type, self.data_len) {
            (DataType::Char, Some(len)) => format!("char({len})"),
            (dtype, _) => dtype.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    PrimaryKey,
    ForeignKey,
}

/// A PRIMARY KEY or FOREIGN KEY clause. The `reference_*` fields are only
/// set for foreign keys and name the parent table by key, never by pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConstraint {
    pub key_type: KeyType,
    pub column_list: Vec<String>,
    pub reference_table: Option<String>,
    pub reference_column_list: Option<Vec<String>>,
}

impl TableConstraint {
    pub fn primary_key(column_list: Vec<String>) -> Self {
        Self {
            key_type: KeyType::PrimaryKey,
            column_list,
            reference_table: None,
            reference_column_list: None,
        }
    }

    pub fn foreign_key(
        column_list: Vec<String>,
        reference_table: impl Into<String>,
        reference_column_list: Vec<String>,
    ) -> Self {
        Self {
            key_type: KeyType::ForeignKey,
            column_list,
            reference_table: Some(reference_table.into()),
            reference_column_list: Some(reference_column_list),
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.key_type == KeyType::PrimaryKey
    }

    fn reference_columns(&self) -> &[String] {
        self.reference_column_list.as_deref().unwrap_or(&[])
    }
}

/// Read-only view of the existing catalog, used to resolve the parent side
/// of foreign keys while a new schema is checked.
pub trait CatalogLookup {
    fn schema_of(&self, table: &str) -> Option<&Schema>;
}

/// Column definitions plus key constraints, both in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub column_definitions: Vec<ColumnDefinition>,
    pub table_constraints: Vec<TableConstraint>,
}

impl Schema {
    pub fn new(
        column_definitions: Vec<ColumnDefinition>,
        table_constraints: Vec<TableConstraint>,
    ) -> Self {
        Self {
            column_definitions,
            table_constraints,
        }
    }

    /// Column names in canonical order.
    pub fn columns(&self) -> Vec<&str> {
        self.column_definitions
            .iter()
            .map(|c| c.column_name.as_str())
            .collect()
    }

    /// Returns the number of columns in this schema
    pub fn column_count(&self) -> usize {
        self.column_definitions.len()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.column_definitions.iter().find(|c| c.column_name == name)
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.column_definitions
            .iter()
            .position(|c| c.column_name == name)
    }

    pub fn primary_key(&self) -> Option<&TableConstraint> {
        self.table_constraints.iter().find(|c| c.is_primary_key())
    }

    pub fn primary_key_columns(&self) -> HashSet<&str> {
        self.primary_key()
            .map(|pk| pk.column_list.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether `column` takes part in a primary key and/or a foreign key.
    pub fn column_key(&self, column: &str) -> (bool, bool) {
        let mut is_primary = false;
        let mut is_foreign = false;
        for tc in &self.table_constraints {
            if tc.column_list.iter().any(|c| c == column) {
                match tc.key_type {
                    KeyType::PrimaryKey => is_primary = true,
                    KeyType::ForeignKey => is_foreign = true,
                }
            }
        }
        (is_primary, is_foreign)
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = &TableConstraint> {
        self.table_constraints.iter().filter(|c| !c.is_primary_key())
    }

    /// Checks this proposed schema against the existing catalog without
    /// touching it. Checks run in a fixed order and stop at the first
    /// failure.
    pub fn check(&self, catalog: &dyn CatalogLookup) -> DbResult<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for c in &self.column_definitions {
            if !seen.insert(c.column_name.as_str()) {
                return Err(DbError::DuplicateColumnDef);
            }
        }

        if self
            .table_constraints
            .iter()
            .filter(|c| c.is_primary_key())
            .count()
            > 1
        {
            return Err(DbError::DuplicatePrimaryKeyDef);
        }

        for tc in &self.table_constraints {
            match tc.key_type {
                KeyType::PrimaryKey => {
                    for name in &tc.column_list {
                        self.key_column(name)?;
                    }
                }
                KeyType::ForeignKey => self.check_foreign_key(tc, catalog)?,
            }
        }

        if self
            .column_definitions
            .iter()
            .any(|c| c.data_type == DataType::Char && !c.has_valid_length())
        {
            return Err(DbError::CharLength);
        }
        Ok(())
    }

    fn check_foreign_key(&self, fk: &TableConstraint, catalog: &dyn CatalogLookup) -> DbResult<()> {
        let parent = fk
            .reference_table
            .as_deref()
            .and_then(|t| catalog.schema_of(t))
            .ok_or(DbError::ReferenceTableExistence)?;
        let ref_columns = fk.reference_columns();

        if ref_columns.iter().any(|c| parent.column(c).is_none()) {
            return Err(DbError::ReferenceColumnExistence);
        }

        let referenced: HashSet<&str> = ref_columns.iter().map(String::as_str).collect();
        if referenced != parent.primary_key_columns() {
            return Err(DbError::ReferenceNonPrimaryKey);
        }

        for (i, name) in fk.column_list.iter().enumerate() {
            let local = self.key_column(name)?;
            let paired = ref_columns
                .get(i)
                .and_then(|r| parent.column(r))
                .ok_or(DbError::ReferenceType)?;
            if !local.same_type_as(paired) {
                return Err(DbError::ReferenceType);
            }
        }
        if ref_columns.len() != fk.column_list.len() {
            return Err(DbError::ReferenceType);
        }
        Ok(())
    }

    fn key_column(&self, name: &str) -> DbResult<&ColumnDefinition> {
        let col = self
            .column(name)
            .ok_or_else(|| DbError::NonExistingColumnDef(name.to_string()))?;
        if !col.has_valid_length() {
            return Err(DbError::CharLength);
        }
        Ok(col)
    }

    /// Forces NOT NULL on every primary-key column. Only meaningful after
    /// `check` has passed; applying it twice changes nothing.
    pub fn normalize(&mut self) {
        let pk: HashSet<String> = self
            .primary_key_columns()
            .into_iter()
            .map(str::to_string)
            .collect();
        for c in &mut self.column_definitions {
            if pk.contains(&c.column_name) {
                c.not_null = true;
            }
        }
    }

    /// `check` followed by `normalize`.
    pub fn validate(mut self, catalog: &dyn CatalogLookup) -> DbResult<Schema> {
        self.check(catalog)?;
        self.normalize();
        debug!(columns = self.column_count(), "schema validated");
        Ok(self)
    }
}
