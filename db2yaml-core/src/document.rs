//! YAML rendering of a collected [`Schema`].

use crate::Result;
use crate::error::Db2YamlError;
use crate::models::Schema;
use std::io::Write;

/// Renders the schema as a YAML mapping keyed by table name.
///
/// Tables come out in name order; an empty schema renders as `{}`. The
/// returned text always ends with a newline.
///
/// # Example
/// ```rust
/// use db2yaml_core::{document::render_yaml, models::Schema};
///
/// assert_eq!(render_yaml(&Schema::new()).unwrap(), "{}\n");
/// ```
pub fn render_yaml(schema: &Schema) -> Result<String> {
    let mut document =
        serde_yaml::to_string(schema).map_err(|e| Db2YamlError::Serialization {
            context: "failed to render schema as YAML".to_string(),
            source: e,
        })?;

    if !document.ends_with('\n') {
        document.push('\n');
    }

    Ok(document)
}

/// Writes a rendered document to `out` and flushes it.
///
/// # Errors
/// Returns [`Db2YamlError::Io`] when the writer rejects the bytes or the
/// flush fails.
pub fn write_document<W: Write>(out: &mut W, document: &str) -> Result<()> {
    out.write_all(document.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| Db2YamlError::Io {
            context: "failed to write YAML document".to_string(),
            source: e,
        })
}
