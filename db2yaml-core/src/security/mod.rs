//! Credential handling.
//!
//! Passwords are kept in `Zeroizing` containers and never reach logs or
//! error messages; connection URLs are redacted with
//! [`crate::error::redact_database_url`] before display.

mod credentials;

pub use credentials::{Credentials, DEFAULT_USER};
