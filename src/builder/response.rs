//! Response components and the terminal response section of operations.

use super::{ComponentGroups, ContentCursor, MediaType};
use crate::diagnostics::Diagnostics;
use crate::directive::{parse_lines, Directive, GroupCursor};
use crate::reference::{ComponentCategory, Reference};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const COMPONENT: &str = "response";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineResponse {
    /// Always emitted; OpenAPI requires a description on every response
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
}

/// A response: a bare reference or an inline definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Reference(Reference),
    Inline(InlineResponse),
}

impl Response {
    pub fn is_reference(&self) -> bool {
        matches!(self, Response::Reference(_))
    }

    pub fn reference(&self) -> Option<&Reference> {
        match self {
            Response::Reference(reference) => Some(reference),
            Response::Inline(_) => None,
        }
    }

    pub fn inline(&self) -> Option<&InlineResponse> {
        match self {
            Response::Reference(_) => None,
            Response::Inline(response) => Some(response),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ResponseDraft {
    reference: Option<Reference>,
    description: Option<String>,
    content: ContentCursor,
}

impl ResponseDraft {
    fn finish(self) -> Response {
        match self.reference {
            Some(reference) => Response::Reference(reference),
            None => Response::Inline(InlineResponse {
                description: self.description.unwrap_or_default(),
                content: self.content.finish(),
            }),
        }
    }
}

/// Builds response components from single-line groups; the last group of a name wins.
pub fn build_responses(groups: &ComponentGroups, diagnostics: &mut Diagnostics) -> BTreeMap<String, Response> {
    let mut responses = BTreeMap::new();
    for (name, line_groups) in groups {
        for lines in line_groups {
            debug!("Building response: {}", name);
            responses.insert(name.clone(), parse_response_lines(lines, diagnostics));
        }
    }
    responses
}

pub fn parse_response_lines(lines: &[String], diagnostics: &mut Diagnostics) -> Response {
    let mut draft = ResponseDraft::default();
    for directive in parse_lines(lines, COMPONENT, diagnostics) {
        match directive.key {
            "ref" => draft.reference = Some(ComponentCategory::Responses.reference(directive.value)),
            "desc" => draft.description = Some(directive.value.to_string()),
            "content_name" => draft.content.name(directive.value),
            "content_ref" => draft.content.schema_ref(directive.value, COMPONENT, diagnostics),
            _ => diagnostics.warn(COMPONENT, format!("invalid name option: {}", directive.line)),
        }
    }
    draft.finish()
}

/// Parses the flat `resp_name` / `resp_ref` / `resp_desc` tail of an operation.
///
/// A new response starts whenever `resp_name` changes; a repeated name replaces
/// the earlier entry of the same key.
pub fn parse_operation_responses(
    directives: &[Directive<'_>],
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, Response> {
    let mut cursor: GroupCursor<ResponseDraft> = GroupCursor::new();

    for directive in directives {
        if directive.key == "resp_name" {
            cursor.enter(directive.value);
            continue;
        }
        let Some(draft) = cursor.current() else {
            diagnostics.warn("operation", format!("{} before any resp_name: {}", directive.key, directive.line));
            continue;
        };
        match directive.key {
            "resp_ref" => draft.reference = Some(ComponentCategory::Responses.reference(directive.value)),
            "resp_desc" => draft.description = Some(directive.value.to_string()),
            _ => diagnostics.warn("operation", format!("invalid response option: {}", directive.line)),
        }
    }

    cursor
        .finish()
        .into_iter()
        .map(|(name, draft)| (name, draft.finish()))
        .collect()
}
