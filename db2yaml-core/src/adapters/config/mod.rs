//! Configuration types for the catalog connection.
//!
//! # Security
//! These configuration structs intentionally do NOT store passwords or credentials.
//! Credentials are handled separately through the security module.

mod connection;

pub use connection::{CONNECTION_CHARSET, ConnectionConfig, DEFAULT_MYSQL_PORT};
