use super::{is_false, ComponentGroups, ContentCursor, MediaType};
use crate::diagnostics::Diagnostics;
use crate::directive::parse_lines;
use crate::reference::{ComponentCategory, Reference};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const COMPONENT: &str = "requestBody";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineRequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
}

/// A request body component: a bare reference or an inline definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestBody {
    Reference(Reference),
    Inline(InlineRequestBody),
}

impl RequestBody {
    pub fn is_reference(&self) -> bool {
        matches!(self, RequestBody::Reference(_))
    }

    pub fn inline(&self) -> Option<&InlineRequestBody> {
        match self {
            RequestBody::Reference(_) => None,
            RequestBody::Inline(body) => Some(body),
        }
    }
}

/// Builds request bodies from single-line groups; the last group of a name wins.
pub fn build_request_bodies(
    groups: &ComponentGroups,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, RequestBody> {
    let mut bodies = BTreeMap::new();
    for (name, line_groups) in groups {
        for lines in line_groups {
            debug!("Building request body: {}", name);
            bodies.insert(name.clone(), parse_request_body_lines(lines, diagnostics));
        }
    }
    bodies
}

pub fn parse_request_body_lines(lines: &[String], diagnostics: &mut Diagnostics) -> RequestBody {
    let mut reference = None;
    let mut body = InlineRequestBody::default();
    let mut content = ContentCursor::default();

    for directive in parse_lines(lines, COMPONENT, diagnostics) {
        match directive.key {
            "ref" => reference = Some(ComponentCategory::RequestBodies.reference(directive.value)),
            "desc" => body.description = Some(directive.value.to_string()),
            "required" => body.required = directive.is_true(),
            "content_name" => content.name(directive.value),
            "content_ref" => content.schema_ref(directive.value, COMPONENT, diagnostics),
            _ => diagnostics.warn(COMPONENT, format!("invalid name option: {}", directive.line)),
        }
    }

    match reference {
        Some(reference) => RequestBody::Reference(reference),
        None => {
            body.content = content.finish();
            RequestBody::Inline(body)
        }
    }
}
