//! In-memory schema model.
//!
//! The model mirrors the YAML document one to one: field declaration order
//! is emission order, and the `skip_serializing_if` attributes decide which
//! empty attributes disappear from the output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name MySQL gives to every primary key index.
pub const PRIMARY_INDEX_NAME: &str = "PRIMARY";

/// A database schema: table name to table.
///
/// Backed by a `BTreeMap`, so iteration and serialization are ordered by
/// table name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    tables: BTreeMap<String, Table>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a table keyed by its name, replacing any previous entry.
    pub fn insert_table(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }

    /// Looks up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Looks up a table by name for appending columns or indexes.
    pub fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }

    /// Tables in name order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true when the schema has no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// A base table with its columns, indexes and DDL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
    pub comment: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ddl: String,
}

impl Table {
    /// Creates a table with no columns or indexes yet.
    pub fn new(name: impl Into<String>, comment: impl Into<String>, ddl: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
            comment: comment.into(),
            ddl: ddl.into(),
        }
    }

    /// Appends a column after the existing ones.
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Appends an index after the existing ones.
    pub fn add_index(&mut self, index: Index) {
        self.indexes.push(index);
    }

    /// Finds a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Finds an index by name.
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// The primary key index, if the table has one.
    pub fn primary_key(&self) -> Option<&Index> {
        self.indexes.iter().find(|i| i.is_primary())
    }
}

/// Database column information.
///
/// Zero-valued attributes are omitted from the rendered document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    /// Maximum character length; 0 when the catalog reports none
    #[serde(skip_serializing_if = "is_zero")]
    pub length: u64,
    #[serde(skip_serializing_if = "is_false")]
    pub auto_increment: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub nullable: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

/// Index information. Columns are kept in index sequence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Index {
    pub name: String,
    pub unique: bool,
    pub columns: Vec<IndexColumn>,
}

impl Index {
    /// Creates an index with no columns yet.
    pub fn new(name: impl Into<String>, unique: bool) -> Self {
        Self {
            name: name.into(),
            unique,
            columns: Vec::new(),
        }
    }

    /// Appends a column to the index.
    pub fn add_column(&mut self, name: impl Into<String>) {
        self.columns.push(IndexColumn { name: name.into() });
    }

    /// Returns true for the primary key index.
    pub fn is_primary(&self) -> bool {
        self.name == PRIMARY_INDEX_NAME
    }

    /// Column names in index order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// A column participating in an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumn {
    pub name: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &u64) -> bool {
    *value == 0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}
