//! Typed component builders.
//!
//! Each builder turns the line groups of one component type into model values.
//! Builders never fail: malformed input is recorded in the [`Diagnostics`]
//! collector and the best-effort value is kept.
//!
//! | component type   | builder                                   | layout      |
//! |------------------|-------------------------------------------|-------------|
//! | `schema`         | [`schema::build_schemas`]                 | multi-line  |
//! | `parameter`      | [`parameter::build_parameters`]           | multi-line  |
//! | `requestBody`    | [`request_body::build_request_bodies`]    | single-line |
//! | `response`       | [`response::build_responses`]             | single-line |
//! | `operation`      | [`operation::build_operations`]           | multi-line  |
//! | `path`           | [`path::build_paths`]                     | multi-line  |
//! | `security`       | [`security::build_security`]              | multi-line  |
//! | `securityScheme` | [`security::build_security_schemes`]      | multi-line  |
//! | `server`         | [`server::build_servers`]                 | multi-line  |
//! | `openapi`        | [`info::build_info`]                      | multi-line  |
//!
//! Struct field tags are handled by [`struct_schema::build_struct_schemas`].

pub mod info;
pub mod operation;
pub mod parameter;
pub mod path;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod security;
pub mod server;
pub mod struct_schema;

use crate::diagnostics::Diagnostics;
use crate::directive::GroupCursor;
use crate::reference::{ComponentCategory, Reference};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named line groups of a single component type.
pub type ComponentGroups = BTreeMap<String, Vec<crate::annotation::LineGroup>>;

/// One media type entry of a request body or response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Reference>,
}

/// Builds a `content` map from `content_name` / `content_ref` directives.
#[derive(Debug, Default)]
pub(crate) struct ContentCursor {
    cursor: GroupCursor<MediaType>,
}

impl ContentCursor {
    pub(crate) fn name(&mut self, media_type: &str) {
        self.cursor.enter(media_type);
    }

    pub(crate) fn schema_ref(&mut self, name: &str, component: &str, diagnostics: &mut Diagnostics) {
        match self.cursor.current() {
            Some(media) => media.schema = Some(ComponentCategory::Schemas.reference(name)),
            None => diagnostics.warn(component, format!("content_ref {} has no content_name", name)),
        }
    }

    pub(crate) fn finish(self) -> BTreeMap<String, MediaType> {
        self.cursor.finish().into_iter().collect()
    }
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Splits a `;` list into trimmed, non-empty items.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_cursor_groups_by_media_type() {
        let mut diagnostics = Diagnostics::new();
        let mut content = ContentCursor::default();
        content.name("application/json");
        content.schema_ref("Widget", "response", &mut diagnostics);
        content.name("application/xml");

        let map = content.finish();
        assert_eq!(map.len(), 2);
        assert_eq!(
            map["application/json"].schema.as_ref().unwrap().as_str(),
            "#/components/schemas/Widget"
        );
        assert!(map["application/xml"].schema.is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_content_ref_without_name_warns() {
        let mut diagnostics = Diagnostics::new();
        let mut content = ContentCursor::default();
        content.schema_ref("Widget", "requestBody", &mut diagnostics);

        assert!(content.finish().is_empty());
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" read; write ;;"), vec!["read", "write"]);
        assert!(split_list("").is_empty());
    }
}
