//! Catalog access and the three-phase extraction pipeline.
//!
//! # Module Structure
//! - `config`: Connection configuration
//! - `helpers`: Row decoding and identifier quoting
//! - `mysql`: `INFORMATION_SCHEMA` reader over a single MySQL connection
//!
//! [`CatalogSource`] is the seam between the driver and the model: it hands
//! back raw catalog rows, and [`load_schema`] folds them into a [`Schema`].

use crate::Result;
use crate::catalog::{
    ColumnRow, IndexRow, TableRow, apply_column_rows, apply_index_rows, apply_table_rows,
};
use crate::models::Schema;
use async_trait::async_trait;

pub mod config;
pub mod helpers;
pub mod mysql;

pub use config::ConnectionConfig;

/// Read-only source of catalog rows for one schema.
///
/// Each listing is one phase of the extraction. Implementations must fail
/// with a [`crate::error::Db2YamlError::Collection`] tagged with the phase
/// instead of returning partial rows.
#[async_trait]
pub trait CatalogSource: Send {
    /// Lists base tables (views excluded) with their comment and DDL.
    async fn list_tables(&mut self, schema_name: &str) -> Result<Vec<TableRow>>;

    /// Lists every column of every table and view in the schema.
    async fn list_columns(&mut self, schema_name: &str) -> Result<Vec<ColumnRow>>;

    /// Lists every (index, column) pair in the schema.
    async fn list_indexes(&mut self, schema_name: &str) -> Result<Vec<IndexRow>>;
}

/// Extracts the full schema model: tables, then columns, then indexes.
///
/// The first failing phase aborts the run; nothing collected before it is
/// returned.
///
/// # Errors
/// Returns the phase-tagged error of the failing listing.
pub async fn load_schema<S>(source: &mut S, schema_name: &str) -> Result<Schema>
where
    S: CatalogSource + ?Sized,
{
    let start_time = std::time::Instant::now();
    let mut schema = Schema::new();

    tracing::debug!("Listing tables of schema '{}'", schema_name);
    let table_rows = source.list_tables(schema_name).await?;
    tracing::info!("Found {} tables", table_rows.len());
    apply_table_rows(&mut schema, table_rows);

    tracing::debug!("Listing columns of schema '{}'", schema_name);
    let column_rows = source.list_columns(schema_name).await?;
    let column_count = column_rows.len();
    let dropped_columns = apply_column_rows(&mut schema, column_rows);
    tracing::info!(
        "Collected {} column rows ({} for unlisted tables)",
        column_count,
        dropped_columns
    );

    tracing::debug!("Listing indexes of schema '{}'", schema_name);
    let index_rows = source.list_indexes(schema_name).await?;
    let index_count = index_rows.len();
    let dropped_indexes = apply_index_rows(&mut schema, index_rows);
    tracing::info!(
        "Collected {} index rows ({} for unlisted tables)",
        index_count,
        dropped_indexes
    );

    tracing::info!(
        "Schema '{}' loaded in {:.2}s",
        schema_name,
        start_time.elapsed().as_secs_f64()
    );

    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::render_yaml;
    use crate::error::{CollectionPhase, Db2YamlError};
    use proptest::prelude::*;

    /// In-memory catalog; `fail_at` makes one listing error out.
    #[derive(Default, Clone)]
    struct FakeCatalog {
        tables: Vec<TableRow>,
        columns: Vec<ColumnRow>,
        indexes: Vec<IndexRow>,
        fail_at: Option<CollectionPhase>,
        calls: Vec<(CollectionPhase, String)>,
    }

    impl FakeCatalog {
        fn check(&mut self, phase: CollectionPhase, schema_name: &str) -> Result<()> {
            self.calls.push((phase, schema_name.to_string()));
            if self.fail_at == Some(phase) {
                return Err(Db2YamlError::collection_failed(
                    phase,
                    "failed to execute query",
                    std::io::Error::other("connection reset"),
                ));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CatalogSource for FakeCatalog {
        async fn list_tables(&mut self, schema_name: &str) -> Result<Vec<TableRow>> {
            self.check(CollectionPhase::Tables, schema_name)?;
            Ok(self.tables.clone())
        }

        async fn list_columns(&mut self, schema_name: &str) -> Result<Vec<ColumnRow>> {
            self.check(CollectionPhase::Columns, schema_name)?;
            Ok(self.columns.clone())
        }

        async fn list_indexes(&mut self, schema_name: &str) -> Result<Vec<IndexRow>> {
            self.check(CollectionPhase::Indexes, schema_name)?;
            Ok(self.indexes.clone())
        }
    }

    fn table(name: &str, comment: &str, ddl: &str) -> TableRow {
        TableRow {
            table_name: name.to_string(),
            table_comment: Some(comment.to_string()),
            ddl: ddl.to_string(),
        }
    }

    fn id_column(table: &str, comment: &str) -> ColumnRow {
        ColumnRow {
            table_name: table.to_string(),
            column_name: "id".to_string(),
            is_nullable: "NO".to_string(),
            data_type: "int".to_string(),
            character_maximum_length: None,
            column_default: None,
            column_comment: Some(comment.to_string()),
            extra: Some("auto_increment".to_string()),
            ordinal_position: 1,
        }
    }

    fn primary(table: &str) -> IndexRow {
        IndexRow {
            table_name: table.to_string(),
            index_name: "PRIMARY".to_string(),
            non_unique: 0,
            column_name: "id".to_string(),
            seq_in_index: 1,
        }
    }

    fn users_catalog() -> FakeCatalog {
        FakeCatalog {
            tables: vec![table(
                "users",
                "Users table",
                "CREATE TABLE `users` (\n  `id` int(11) unsigned NOT NULL AUTO_INCREMENT COMMENT 'User ID',\n  PRIMARY KEY (`id`)\n) ENGINE=InnoDB AUTO_INCREMENT=3 DEFAULT CHARSET=utf8 COMMENT='Users table'",
            )],
            columns: vec![id_column("users", "User ID")],
            indexes: vec![primary("users")],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_schema() {
        let mut catalog = FakeCatalog::default();
        let schema = load_schema(&mut catalog, "app").await.unwrap();

        assert!(schema.is_empty());
        assert_eq!(render_yaml(&schema).unwrap(), "{}\n");
    }

    #[tokio::test]
    async fn test_phases_run_in_order_with_schema_name() {
        let mut catalog = FakeCatalog::default();
        load_schema(&mut catalog, "app").await.unwrap();

        assert_eq!(
            catalog.calls,
            vec![
                (CollectionPhase::Tables, "app".to_string()),
                (CollectionPhase::Columns, "app".to_string()),
                (CollectionPhase::Indexes, "app".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_single_table() {
        let mut catalog = users_catalog();
        let schema = load_schema(&mut catalog, "app").await.unwrap();

        let users = schema.table("users").unwrap();
        assert_eq!(users.comment, "Users table");
        assert!(!users.ddl.contains("AUTO_INCREMENT=3"));
        assert!(users.ddl.contains(") ENGINE=InnoDB DEFAULT CHARSET=utf8"));

        let id = users.column("id").unwrap();
        assert_eq!(id.data_type, "int");
        assert!(id.auto_increment);
        assert!(!id.nullable);
        assert_eq!(id.comment, "User ID");

        assert_eq!(users.indexes.len(), 1);
        let pk = users.primary_key().unwrap();
        assert!(pk.unique);
        assert_eq!(pk.column_names(), vec!["id"]);
    }

    #[tokio::test]
    async fn test_two_tables_do_not_share_columns_or_indexes() {
        let mut catalog = users_catalog();
        catalog.tables.push(table("posts", "Posts table", ""));
        catalog.columns.push(id_column("posts", "Post ID"));
        catalog.columns.push(ColumnRow {
            table_name: "posts".to_string(),
            column_name: "title".to_string(),
            is_nullable: "YES".to_string(),
            data_type: "varchar".to_string(),
            character_maximum_length: Some(200),
            ordinal_position: 2,
            ..Default::default()
        });
        catalog.indexes.push(primary("posts"));

        let schema = load_schema(&mut catalog, "app").await.unwrap();
        assert_eq!(schema.len(), 2);

        let users = schema.table("users").unwrap();
        assert_eq!(users.columns.len(), 1);
        assert_eq!(users.column("id").unwrap().comment, "User ID");
        assert_eq!(users.indexes.len(), 1);

        let posts = schema.table("posts").unwrap();
        assert_eq!(posts.columns.len(), 2);
        assert_eq!(posts.column("id").unwrap().comment, "Post ID");
        assert_eq!(posts.column("title").unwrap().length, 200);
        assert_eq!(posts.indexes.len(), 1);

        let yaml = render_yaml(&schema).unwrap();
        assert!(yaml.find("posts:").unwrap() < yaml.find("users:").unwrap());
    }

    #[tokio::test]
    async fn test_rows_for_unlisted_tables_are_ignored() {
        let mut catalog = users_catalog();
        catalog.columns.push(id_column("user_view", "from a view"));
        catalog.indexes.push(primary("user_view"));

        let schema = load_schema(&mut catalog, "app").await.unwrap();
        assert_eq!(schema.len(), 1);
        assert!(!render_yaml(&schema).unwrap().contains("user_view"));
    }

    #[tokio::test]
    async fn test_extraction_is_idempotent() {
        let mut catalog = users_catalog();
        let first = render_yaml(&load_schema(&mut catalog, "app").await.unwrap()).unwrap();
        let second = render_yaml(&load_schema(&mut catalog, "app").await.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failure_aborts_at_failing_phase() {
        for phase in [
            CollectionPhase::Tables,
            CollectionPhase::Columns,
            CollectionPhase::Indexes,
        ] {
            let mut catalog = users_catalog();
            catalog.fail_at = Some(phase);

            let error = load_schema(&mut catalog, "app").await.unwrap_err();
            assert_eq!(error.phase(), Some(phase));
            assert!(error.to_string().contains(&format!("Failed to load {}", phase)));
            assert_eq!(catalog.calls.last().map(|(p, _)| *p), Some(phase));
        }
    }

    proptest! {
        #[test]
        fn prop_column_order_ignores_row_order(
            ordinals in Just((1_i64..=8).collect::<Vec<_>>()).prop_shuffle()
        ) {
            let mut catalog = FakeCatalog {
                tables: vec![table("wide", "", "")],
                columns: ordinals
                    .iter()
                    .map(|ordinal| ColumnRow {
                        table_name: "wide".to_string(),
                        column_name: format!("c{}", ordinal),
                        is_nullable: "NO".to_string(),
                        data_type: "int".to_string(),
                        ordinal_position: *ordinal,
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            };

            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let schema = runtime.block_on(load_schema(&mut catalog, "app")).unwrap();
            let names: Vec<String> = schema
                .table("wide")
                .unwrap()
                .columns
                .iter()
                .map(|c| c.name.clone())
                .collect();
            let expected: Vec<String> = (1..=8).map(|i| format!("c{}", i)).collect();
            prop_assert_eq!(names, expected);
        }
    }
}
