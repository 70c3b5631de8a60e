use crate::case::FieldCase;
use crate::error::{Error, Result};

/// Marker that identifies annotation comments unless configured otherwise.
pub const DEFAULT_MARKER: &str = "openapi-doc";
/// Tag key whose name part overrides a field's property name.
pub const DEFAULT_OUTPUT_TAG: &str = "json";

/// Settings shared by the annotation parser and the struct schema builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Text that must appear within the first 20 characters of an annotation comment
    pub marker: String,
    /// Tag key matching the application's wire format (`json`, `yaml`, ...)
    pub output_tag: String,
    /// Casing for field names without an output-name tag
    pub field_case: FieldCase,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.marker.trim().is_empty() {
            return Err(Error::InvalidArgument("marker must not be empty".to_string()));
        }
        if self.marker.chars().count() > 20 {
            return Err(Error::InvalidArgument(format!(
                "marker `{}` is longer than 20 characters",
                self.marker
            )));
        }
        if self.output_tag.trim().is_empty() {
            return Err(Error::InvalidArgument("output tag must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            output_tag: DEFAULT_OUTPUT_TAG.to_string(),
            field_case: FieldCase::default(),
        }
    }
}
