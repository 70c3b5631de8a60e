use super::operation::{HttpMethod, Operation, OperationMap};
use super::ComponentGroups;
use crate::diagnostics::Diagnostics;
use crate::directive::parse_lines;
use crate::reference::{ComponentCategory, Reference};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const COMPONENT: &str = "path";

/// OpenAPI Path Item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    pub fn set_operation(&mut self, method: HttpMethod, operation: Operation) {
        let slot = match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Trace => &mut self.trace,
        };
        *slot = Some(operation);
    }

    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }
}

/// Builds path items and attaches the operations annotated for the same path.
///
/// Operations whose path has no `path` block are reported and left out.
pub fn build_paths(
    groups: &ComponentGroups,
    operations: &OperationMap,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, PathItem> {
    let mut paths = BTreeMap::new();
    for (name, line_groups) in groups {
        for lines in line_groups {
            debug!("Building path: {}", name);
            let mut item = parse_path_lines(lines, diagnostics);
            if let Some(by_method) = operations.get(name) {
                for (method, operation) in by_method {
                    item.set_operation(*method, operation.clone());
                }
            }
            paths.insert(name.clone(), item);
        }
    }

    for (name, by_method) in operations {
        if !groups.contains_key(name) {
            let methods: Vec<&str> = by_method.keys().map(HttpMethod::as_str).collect();
            diagnostics.warn(
                "operation",
                format!("no path block for {} ({}); operations skipped", name, methods.join(", ")),
            );
        }
    }

    paths
}

pub fn parse_path_lines(lines: &[String], diagnostics: &mut Diagnostics) -> PathItem {
    let mut item = PathItem::default();
    for directive in parse_lines(lines, COMPONENT, diagnostics) {
        match directive.key {
            "summary" => item.summary = Some(directive.value.to_string()),
            "description" => item.description = Some(directive.value.to_string()),
            "parameters.ref" => item.parameters = ComponentCategory::Parameters.references(directive.value),
            _ => diagnostics.warn(COMPONENT, format!("invalid name option: {}", directive.line)),
        }
    }
    item
}
