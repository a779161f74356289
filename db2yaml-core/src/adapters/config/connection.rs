//! Database connection configuration.
//!
//! This module provides the `ConnectionConfig` struct describing which
//! MySQL server and schema to read.

use std::fmt;

/// Port MySQL listens on unless told otherwise.
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Character set requested for every connection.
pub const CONNECTION_CHARSET: &str = "utf8";

/// Longest schema name MySQL accepts.
const MAX_DATABASE_NAME_LEN: usize = 64;

/// Configuration for the catalog connection.
///
/// # Security
/// This struct intentionally does NOT store the user name or password;
/// those travel separately in [`crate::security::Credentials`].
///
/// # Example
/// ```rust
/// use db2yaml_core::adapters::ConnectionConfig;
///
/// let config = ConnectionConfig::new("db.internal".to_string())
///     .with_port(3307)
///     .with_database("app".to_string());
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.to_string(), "mysql://db.internal:3307/app");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Database host address
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Schema whose catalog is extracted
    pub database: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_MYSQL_PORT,
            database: None,
        }
    }
}

impl fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mysql://{}:{}/{}",
            self.host,
            self.port,
            self.database.as_deref().unwrap_or_default()
        )
    }
}

impl ConnectionConfig {
    /// Validates connection configuration parameters.
    ///
    /// # Errors
    /// Returns error if the host is empty, the port is 0, or the schema
    /// name is missing or longer than MySQL allows.
    pub fn validate(&self) -> crate::Result<()> {
        if self.host.is_empty() {
            return Err(crate::error::Db2YamlError::configuration(
                "host cannot be empty",
            ));
        }

        if self.port == 0 {
            return Err(crate::error::Db2YamlError::configuration(
                "port must be greater than 0",
            ));
        }

        match self.database.as_deref() {
            None | Some("") => Err(crate::error::Db2YamlError::configuration(
                "database name is required",
            )),
            Some(name) if name.chars().count() > MAX_DATABASE_NAME_LEN => {
                Err(crate::error::Db2YamlError::configuration(format!(
                    "database name too long: maximum {} characters",
                    MAX_DATABASE_NAME_LEN
                )))
            }
            Some(_) => Ok(()),
        }
    }

    /// Creates a new connection config with the default port.
    pub fn new(host: String) -> Self {
        Self {
            host,
            ..Default::default()
        }
    }

    /// Builder method to set port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder method to set database.
    pub fn with_database(mut self, database: String) -> Self {
        self.database = Some(database);
        self
    }

    /// Schema name, or an empty string before one is configured.
    pub fn database_name(&self) -> &str {
        self.database.as_deref().unwrap_or_default()
    }
}
