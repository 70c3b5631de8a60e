//! Rendering of the assembled document as YAML or JSON.

use crate::error::Result;
use crate::openapi_builder::OpenApiDocument;
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes a document to YAML.
///
/// # Example
///
/// ```
/// use openapi_from_comments::diagnostics::Diagnostics;
/// use openapi_from_comments::openapi_builder::OpenApiBuilder;
/// use openapi_from_comments::serializer::serialize_yaml;
///
/// let document = OpenApiBuilder::new().build(&mut Diagnostics::new());
/// let yaml = serialize_yaml(&document).unwrap();
/// assert!(yaml.contains("openapi: 3.0.0"));
/// ```
pub fn serialize_yaml(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to YAML");
    Ok(serde_yaml::to_string(doc)?)
}

/// Serializes a document to pretty printed JSON.
pub fn serialize_json(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to JSON");
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Writes `content` to `path`, creating missing parent directories.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
