//! Canonical `#/components/<category>/<name>` pointers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The component namespaces a reference can point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentCategory {
    Schemas,
    Parameters,
    Responses,
    RequestBodies,
    SecuritySchemes,
}

impl ComponentCategory {
    /// The key this category uses under `components`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentCategory::Schemas => "schemas",
            ComponentCategory::Parameters => "parameters",
            ComponentCategory::Responses => "responses",
            ComponentCategory::RequestBodies => "requestBodies",
            ComponentCategory::SecuritySchemes => "securitySchemes",
        }
    }

    /// Builds the canonical reference to `name` in this category.
    pub fn reference(&self, name: &str) -> Reference {
        Reference {
            path: format!("#/components/{}/{}", self.as_str(), name.trim()),
        }
    }

    /// Expands a `;`-separated name list into references, skipping blanks.
    pub fn references(&self, list: &str) -> Vec<Reference> {
        list.split(';')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| self.reference(name))
            .collect()
    }
}

/// A `$ref` pointer. Only [`ComponentCategory::reference`] creates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    path: String,
}

impl Reference {
    pub fn as_str(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_per_category() {
        assert_eq!(
            ComponentCategory::Schemas.reference("Widget").as_str(),
            "#/components/schemas/Widget"
        );
        assert_eq!(
            ComponentCategory::RequestBodies.reference("NewWidget").as_str(),
            "#/components/requestBodies/NewWidget"
        );
        assert_eq!(
            ComponentCategory::SecuritySchemes.reference("bearer").as_str(),
            "#/components/securitySchemes/bearer"
        );
    }

    #[test]
    fn test_reference_list_skips_blanks() {
        let refs = ComponentCategory::Parameters.references("id; ;limit;");
        let paths: Vec<&str> = refs.iter().map(|r| r.as_str()).collect();
        assert_eq!(
            paths,
            vec!["#/components/parameters/id", "#/components/parameters/limit"]
        );
    }

    #[test]
    fn test_reference_serializes_as_dollar_ref() {
        let reference = ComponentCategory::Responses.reference("NotFound");
        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(json["$ref"], "#/components/responses/NotFound");
    }
}
