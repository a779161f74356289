//! MySQL catalog reader over a single connection.
//!
//! # Module Structure
//! - `connection`: Connection URL composition and session setup
//! - `schema_collection`: The table, column and index listings
//!
//! # Security Guarantees
//! - All operations are read-only (SELECT/SHOW only)
//! - The schema name is always a bound parameter
//! - Connection strings are redacted in logs and error messages

pub mod connection;
pub mod schema_collection;


use super::{CatalogSource, ConnectionConfig};
use crate::Result;
use crate::catalog::{ColumnRow, IndexRow, TableRow};
use async_trait::async_trait;
use sqlx::MySqlConnection;

pub use connection::build_mysql_connection_url;

/// MySQL catalog reader holding one open connection.
///
/// The three listings run one after another on this connection; nothing
/// else uses it while extraction is in progress.
pub struct MySqlAdapter {
    /// Open connection to the server
    conn: MySqlConnection,
    /// Connection configuration (never holds credentials)
    pub config: ConnectionConfig,
}

impl std::fmt::Debug for MySqlAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlAdapter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CatalogSource for MySqlAdapter {
    async fn list_tables(&mut self, schema_name: &str) -> Result<Vec<TableRow>> {
        schema_collection::list_tables(&mut self.conn, schema_name).await
    }

    async fn list_columns(&mut self, schema_name: &str) -> Result<Vec<ColumnRow>> {
        schema_collection::list_columns(&mut self.conn, schema_name).await
    }

    async fn list_indexes(&mut self, schema_name: &str) -> Result<Vec<IndexRow>> {
        schema_collection::list_indexes(&mut self.conn, schema_name).await
    }
}
