//! MySQL catalog listings.
//!
//! One query per extraction phase against `INFORMATION_SCHEMA`, each scoped
//! to a bound schema name. Rows are fully fetched before they are decoded,
//! so a statement never outlives its function.

use crate::Result;
use crate::adapters::helpers::{RowExt, quote_identifier};
use crate::catalog::{ColumnRow, IndexRow, TableRow};
use crate::error::{CollectionPhase, Db2YamlError};
use sqlx::mysql::MySqlConnection;
use sqlx::Row;

// Every text column is cast to CHAR and every number to SIGNED so MySQL 8
// hands back utf8 strings and BIGINTs instead of VARBINARY and unsigned
// types.

const TABLES_QUERY: &str = r#"
    SELECT
        CAST(t.TABLE_NAME AS CHAR) AS TABLE_NAME,
        CAST(t.TABLE_COMMENT AS CHAR) AS TABLE_COMMENT
    FROM INFORMATION_SCHEMA.TABLES t
    LEFT JOIN INFORMATION_SCHEMA.VIEWS v
        ON t.TABLE_SCHEMA = v.TABLE_SCHEMA
        AND t.TABLE_NAME = v.TABLE_NAME
    WHERE t.TABLE_SCHEMA = ?
    AND v.TABLE_NAME IS NULL
    ORDER BY t.TABLE_NAME
"#;

const COLUMNS_QUERY: &str = r#"
    SELECT
        CAST(TABLE_NAME AS CHAR) AS TABLE_NAME,
        CAST(COLUMN_NAME AS CHAR) AS COLUMN_NAME,
        CAST(IS_NULLABLE AS CHAR) AS IS_NULLABLE,
        CAST(DATA_TYPE AS CHAR) AS DATA_TYPE,
        CAST(CHARACTER_MAXIMUM_LENGTH AS SIGNED) AS CHARACTER_MAXIMUM_LENGTH,
        CAST(COLUMN_DEFAULT AS CHAR) AS COLUMN_DEFAULT,
        CAST(COLUMN_COMMENT AS CHAR) AS COLUMN_COMMENT,
        CAST(EXTRA AS CHAR) AS EXTRA,
        CAST(ORDINAL_POSITION AS SIGNED) AS ORDINAL_POSITION
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_SCHEMA = ?
    ORDER BY TABLE_NAME, ORDINAL_POSITION
"#;

const INDEXES_QUERY: &str = r#"
    SELECT
        CAST(TABLE_NAME AS CHAR) AS TABLE_NAME,
        CAST(INDEX_NAME AS CHAR) AS INDEX_NAME,
        CAST(NON_UNIQUE AS SIGNED) AS NON_UNIQUE,
        CAST(COLUMN_NAME AS CHAR) AS COLUMN_NAME,
        CAST(SEQ_IN_INDEX AS SIGNED) AS SEQ_IN_INDEX
    FROM INFORMATION_SCHEMA.STATISTICS
    WHERE INDEX_SCHEMA = ?
    ORDER BY TABLE_NAME, NON_UNIQUE, INDEX_NAME != 'PRIMARY', INDEX_NAME, SEQ_IN_INDEX
"#;

/// Builds the DDL statement for one table, qualified by schema.
pub(crate) fn show_create_table_sql(schema_name: &str, table_name: &str) -> String {
    format!(
        "SHOW CREATE TABLE {}.{}",
        quote_identifier(schema_name),
        quote_identifier(table_name)
    )
}

/// Lists base tables with their comment and creation DDL.
pub(crate) async fn list_tables(
    conn: &mut MySqlConnection,
    schema_name: &str,
) -> Result<Vec<TableRow>> {
    let phase = CollectionPhase::Tables;

    let table_rows = sqlx::query(TABLES_QUERY)
        .bind(schema_name)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            Db2YamlError::collection_failed(
                phase,
                "failed to execute query to read table information",
                e,
            )
        })?;

    let mut tables = Vec::with_capacity(table_rows.len());

    for row in &table_rows {
        let table_name: String = row.get_field(phase, "TABLE_NAME", None)?;
        let table_comment: Option<String> =
            row.get_field(phase, "TABLE_COMMENT", Some(table_name.as_str()))?;

        let ddl = fetch_table_ddl(conn, schema_name, &table_name).await?;

        tracing::trace!("Listed table '{}'", table_name);
        tables.push(TableRow {
            table_name,
            table_comment,
            ddl,
        });
    }

    Ok(tables)
}

/// Fetches the `Create Table` column of `SHOW CREATE TABLE`.
async fn fetch_table_ddl(
    conn: &mut MySqlConnection,
    schema_name: &str,
    table_name: &str,
) -> Result<String> {
    let phase = CollectionPhase::Tables;
    let sql = show_create_table_sql(schema_name, table_name);

    let row = sqlx::query(&sql)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            Db2YamlError::collection_failed(
                phase,
                format!("failed to read DDL of table '{}'", table_name),
                e,
            )
        })?;

    row.try_get::<String, _>(1)
        .map_err(|e| Db2YamlError::parse_field(phase, "Create Table", Some(table_name), e))
}

/// Lists every column in the schema, ordered by table then ordinal position.
pub(crate) async fn list_columns(
    conn: &mut MySqlConnection,
    schema_name: &str,
) -> Result<Vec<ColumnRow>> {
    let phase = CollectionPhase::Columns;

    let column_rows = sqlx::query(COLUMNS_QUERY)
        .bind(schema_name)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            Db2YamlError::collection_failed(
                phase,
                "failed to execute query to read column information",
                e,
            )
        })?;

    let mut columns = Vec::with_capacity(column_rows.len());

    for row in &column_rows {
        let table_name: String = row.get_field(phase, "TABLE_NAME", None)?;
        let table = Some(table_name.as_str());

        columns.push(ColumnRow {
            column_name: row.get_field(phase, "COLUMN_NAME", table)?,
            is_nullable: row.get_field(phase, "IS_NULLABLE", table)?,
            data_type: row.get_field(phase, "DATA_TYPE", table)?,
            character_maximum_length: row.get_field(phase, "CHARACTER_MAXIMUM_LENGTH", table)?,
            column_default: row.get_field(phase, "COLUMN_DEFAULT", table)?,
            column_comment: row.get_field(phase, "COLUMN_COMMENT", table)?,
            extra: row.get_field(phase, "EXTRA", table)?,
            ordinal_position: row.get_field(phase, "ORDINAL_POSITION", table)?,
            table_name: table_name.clone(),
        });
    }

    Ok(columns)
}

/// Lists every (index, column) pair in the schema.
pub(crate) async fn list_indexes(
    conn: &mut MySqlConnection,
    schema_name: &str,
) -> Result<Vec<IndexRow>> {
    let phase = CollectionPhase::Indexes;

    let index_rows = sqlx::query(INDEXES_QUERY)
        .bind(schema_name)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            Db2YamlError::collection_failed(
                phase,
                "failed to execute query to read index information",
                e,
            )
        })?;

    let mut indexes = Vec::with_capacity(index_rows.len());

    for row in &index_rows {
        let table_name: String = row.get_field(phase, "TABLE_NAME", None)?;
        let table = Some(table_name.as_str());
        // NULL for functional key parts (MySQL 8.0.13+)
        let column_name: Option<String> = row.get_field(phase, "COLUMN_NAME", table)?;

        indexes.push(IndexRow {
            index_name: row.get_field(phase, "INDEX_NAME", table)?,
            non_unique: row.get_field(phase, "NON_UNIQUE", table)?,
            column_name: column_name.unwrap_or_default(),
            seq_in_index: row.get_field(phase, "SEQ_IN_INDEX", table)?,
            table_name: table_name.clone(),
        });
    }

    Ok(indexes)
}
