//! Catalog rows and the rules that fold them into a [`Schema`].
//!
//! Rows come straight from `INFORMATION_SCHEMA` (one struct per listing
//! query). Nothing here talks to a database, so the normalization and
//! ordering rules can be tested without one.

use crate::models::{Column, Index, PRIMARY_INDEX_NAME, Schema, Table};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// One row of the base table listing, with the DDL already fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub table_name: String,
    pub table_comment: Option<String>,
    /// Raw `SHOW CREATE TABLE` output
    pub ddl: String,
}

/// One row of `INFORMATION_SCHEMA.COLUMNS`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRow {
    pub table_name: String,
    pub column_name: String,
    pub is_nullable: String,
    pub data_type: String,
    pub character_maximum_length: Option<i64>,
    pub column_default: Option<String>,
    pub column_comment: Option<String>,
    pub extra: Option<String>,
    pub ordinal_position: i64,
}

/// One row of `INFORMATION_SCHEMA.STATISTICS`: a single (index, column) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexRow {
    pub table_name: String,
    pub index_name: String,
    /// 0 for unique indexes, nonzero otherwise
    pub non_unique: i64,
    pub column_name: String,
    pub seq_in_index: i64,
}

impl IndexRow {
    fn is_unique(&self) -> bool {
        self.non_unique == 0
    }
}

impl From<ColumnRow> for Column {
    fn from(row: ColumnRow) -> Self {
        Self {
            name: row.column_name,
            data_type: row.data_type,
            length: row
                .character_maximum_length
                .and_then(|len| u64::try_from(len).ok())
                .unwrap_or(0),
            auto_increment: row.extra.as_deref() == Some("auto_increment"),
            nullable: row.is_nullable == "YES",
            default: row.column_default.unwrap_or_default(),
            comment: row.column_comment.unwrap_or_default(),
        }
    }
}

#[allow(clippy::expect_used)]
fn auto_increment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"AUTO_INCREMENT=\d+ ").expect("Invalid AUTO_INCREMENT pattern")
    })
}

/// Removes the `AUTO_INCREMENT=<n> ` table option from a DDL statement.
///
/// The counter changes on every insert, so leaving it in would make
/// snapshots of an unchanged schema differ.
///
/// ```rust
/// use db2yaml_core::catalog::strip_auto_increment;
///
/// let ddl = ") ENGINE=InnoDB AUTO_INCREMENT=42 DEFAULT CHARSET=utf8";
/// assert_eq!(strip_auto_increment(ddl), ") ENGINE=InnoDB DEFAULT CHARSET=utf8");
/// ```
pub fn strip_auto_increment(ddl: &str) -> String {
    auto_increment_pattern().replace_all(ddl, "").into_owned()
}

/// Creates one table per listing row.
pub fn apply_table_rows(schema: &mut Schema, rows: Vec<TableRow>) {
    for row in rows {
        let ddl = strip_auto_increment(&row.ddl);
        schema.insert_table(Table::new(
            row.table_name,
            row.table_comment.unwrap_or_default(),
            ddl,
        ));
    }
}

/// Appends columns to their tables in ordinal order.
///
/// Rows are sorted by (table, ordinal position) first, so the result does
/// not depend on the order the rows arrived in. Rows for tables missing
/// from the schema (views, mostly) are dropped.
///
/// # Returns
/// Number of dropped rows
pub fn apply_column_rows(schema: &mut Schema, mut rows: Vec<ColumnRow>) -> usize {
    rows.sort_by(|a, b| {
        a.table_name
            .cmp(&b.table_name)
            .then(a.ordinal_position.cmp(&b.ordinal_position))
    });

    let mut dropped = 0_usize;
    for row in rows {
        match schema.table_mut(&row.table_name) {
            Some(table) => table.add_column(Column::from(row)),
            None => {
                tracing::debug!(
                    "Skipping column '{}' of unlisted table '{}'",
                    row.column_name,
                    row.table_name
                );
                dropped = dropped.saturating_add(1);
            }
        }
    }

    dropped
}

/// Rows of one (table, index name) pair, gathered before ordering.
#[derive(Debug)]
struct IndexGroup {
    table_name: String,
    index_name: String,
    unique: bool,
    columns: Vec<(i64, String)>,
}

impl IndexGroup {
    /// Sort key: unique first, then `PRIMARY`, then name.
    ///
    /// Names compare case-insensitively, as the catalog collation does, with
    /// the exact bytes breaking ties between names differing only in case.
    fn order_key(&self) -> (&str, bool, bool, String, &str) {
        (
            self.table_name.as_str(),
            !self.unique,
            self.index_name != PRIMARY_INDEX_NAME,
            self.index_name.to_lowercase(),
            self.index_name.as_str(),
        )
    }
}

/// Groups flat index rows into indexes and appends them to their tables.
///
/// Grouping is by an explicit (table, index name) key, so it holds for any
/// row order. Each table then gets its unique indexes before non-unique
/// ones, the primary key ahead of other indexes of the same uniqueness,
/// the rest by name; each index lists its columns by sequence position.
///
/// # Returns
/// Number of dropped rows (rows whose table is not in the schema)
pub fn apply_index_rows(schema: &mut Schema, rows: Vec<IndexRow>) -> usize {
    let mut positions: HashMap<(String, String), usize> = HashMap::new();
    let mut groups: Vec<IndexGroup> = Vec::new();
    let mut dropped = 0_usize;

    for row in rows {
        if schema.table(&row.table_name).is_none() {
            tracing::debug!(
                "Skipping index '{}' of unlisted table '{}'",
                row.index_name,
                row.table_name
            );
            dropped = dropped.saturating_add(1);
            continue;
        }

        let key = (row.table_name.clone(), row.index_name.clone());
        let position = *positions.entry(key).or_insert_with(|| {
            groups.push(IndexGroup {
                table_name: row.table_name.clone(),
                index_name: row.index_name.clone(),
                unique: row.is_unique(),
                columns: Vec::new(),
            });
            groups.len().saturating_sub(1)
        });

        if let Some(group) = groups.get_mut(position) {
            group.columns.push((row.seq_in_index, row.column_name));
        }
    }

    groups.sort_by(|a, b| a.order_key().cmp(&b.order_key()));

    for mut group in groups {
        group.columns.sort_by_key(|(seq, _)| *seq);

        let mut index = Index::new(group.index_name, group.unique);
        for (_, column_name) in group.columns {
            index.add_column(column_name);
        }

        if let Some(table) = schema.table_mut(&group.table_name) {
            table.add_index(index);
        }
    }

    dropped
}
