//! Helper utilities for the MySQL catalog reader.

use crate::{
    Result,
    error::{CollectionPhase, Db2YamlError},
};
use sqlx::{MySql, Row, mysql::MySqlRow};

/// Extension trait for extracting typed values from catalog rows
/// with consistent error handling.
///
/// # Example
/// ```rust,ignore
/// use db2yaml_core::adapters::helpers::RowExt;
///
/// let name: String = row.get_field(CollectionPhase::Columns, "COLUMN_NAME", Some("users"))?;
/// let length: Option<i64> = row.get_field(CollectionPhase::Columns, "CHARACTER_MAXIMUM_LENGTH", None)?;
/// ```
pub trait RowExt {
    /// Extracts a typed field from the row, tagging failures with the
    /// extraction phase and (optionally) the table being read.
    fn get_field<'r, T>(
        &'r self,
        phase: CollectionPhase,
        field_name: &str,
        table_context: Option<&str>,
    ) -> Result<T>
    where
        T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>;
}

impl RowExt for MySqlRow {
    fn get_field<'r, T>(
        &'r self,
        phase: CollectionPhase,
        field_name: &str,
        table_context: Option<&str>,
    ) -> Result<T>
    where
        T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
    {
        self.try_get(field_name)
            .map_err(|e| Db2YamlError::parse_field(phase, field_name, table_context, e))
    }
}

/// Quotes a MySQL identifier with backticks, doubling embedded backticks.
///
/// Identifiers cannot be bound as parameters, so this is the only way a
/// name reaches SQL text.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
