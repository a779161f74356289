//! Core of db2yaml: MySQL catalog extraction and YAML rendering.
//!
//! The pipeline has three parts:
//! - a catalog reader ([`adapters`]) that lists tables, columns and indexes
//!   of one schema from `INFORMATION_SCHEMA`,
//! - a schema model ([`models`], filled by the rules in [`catalog`]),
//! - a serializer ([`document`]) that renders the model as YAML.
//!
//! # Security Guarantees
//! - All database operations are read-only
//! - Credentials are never logged and are zeroed on drop
//! - The schema name is always bound as a query parameter
//!
//! # Example
//! ```rust,no_run
//! use db2yaml_core::{ConnectionConfig, Credentials, MySqlAdapter, load_schema, render_yaml};
//!
//! # async fn run() -> db2yaml_core::Result<()> {
//! let config = ConnectionConfig::new("localhost".to_string()).with_database("app".to_string());
//! let credentials = Credentials::new("root".to_string(), None);
//!
//! let mut adapter = MySqlAdapter::connect(config, &credentials).await?;
//! let schema = load_schema(&mut adapter, "app").await?;
//! print!("{}", render_yaml(&schema)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod catalog;
pub mod document;
pub mod error;
pub mod logging;
pub mod models;
pub mod security;

// Re-export commonly used types
pub use adapters::{CatalogSource, ConnectionConfig, load_schema, mysql::MySqlAdapter};
pub use document::{render_yaml, write_document};
pub use error::{CollectionPhase, Db2YamlError, Result};
pub use logging::init_logging;
pub use models::{Column, Index, IndexColumn, Schema, Table};
pub use security::Credentials;
