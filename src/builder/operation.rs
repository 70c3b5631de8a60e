use super::response::{parse_operation_responses, Response};
use super::{split_list, ComponentGroups};
use crate::diagnostics::Diagnostics;
use crate::directive::parse_lines;
use crate::reference::{ComponentCategory, Reference};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const COMPONENT: &str = "operation";

/// HTTP methods that have a slot on a path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "get" => Ok(HttpMethod::Get),
            "put" => Ok(HttpMethod::Put),
            "post" => Ok(HttpMethod::Post),
            "delete" => Ok(HttpMethod::Delete),
            "options" => Ok(HttpMethod::Options),
            "head" => Ok(HttpMethod::Head),
            "patch" => Ok(HttpMethod::Patch),
            "trace" => Ok(HttpMethod::Trace),
            _ => Err(()),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OpenAPI Operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Reference>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Reference>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, Response>,
}

/// Operations per path name, keyed by method.
pub type OperationMap = BTreeMap<String, BTreeMap<HttpMethod, Operation>>;

/// Builds every operation group. Groups without a usable method are dropped.
pub fn build_operations(groups: &ComponentGroups, diagnostics: &mut Diagnostics) -> OperationMap {
    let mut operations = OperationMap::new();
    for (path, line_groups) in groups {
        for lines in line_groups {
            let Some((method, operation)) = parse_operation_lines(lines, diagnostics) else {
                continue;
            };
            debug!("Building operation: {} {}", method, path);
            let by_method = operations.entry(path.clone()).or_default();
            if by_method.insert(method, operation).is_some() {
                diagnostics.warn(
                    COMPONENT,
                    format!("duplicate method {} for {}; the last one is kept", method, path),
                );
            }
        }
    }
    operations
}

/// Parses one operation group. Directives from the first `resp_name` onward
/// are the operation's responses.
pub fn parse_operation_lines(lines: &[String], diagnostics: &mut Diagnostics) -> Option<(HttpMethod, Operation)> {
    let directives = parse_lines(lines, COMPONENT, diagnostics);
    let mut operation = Operation::default();
    let mut method: Option<&str> = None;

    for (index, directive) in directives.iter().enumerate() {
        let value = directive.value;
        match directive.key {
            "method" => method = Some(value),
            "summary" => operation.summary = Some(value.to_string()),
            "description" => operation.description = Some(value.to_string()),
            "operation_id" => operation.operation_id = Some(value.to_string()),
            "tags" => operation.tags = split_list(value),
            "parameters.ref" => operation.parameters = ComponentCategory::Parameters.references(value),
            "req_ref" => operation.request_body = Some(ComponentCategory::RequestBodies.reference(value)),
            "resp_name" => {
                operation.responses = parse_operation_responses(&directives[index..], diagnostics);
                break;
            }
            _ => diagnostics.warn(COMPONENT, format!("invalid name option: {}", directive.line)),
        }
    }

    let Some(method) = method else {
        diagnostics.error(COMPONENT, "no method specified");
        return None;
    };
    match method.parse() {
        Ok(method) => Some((method, operation)),
        Err(()) => {
            diagnostics.error(COMPONENT, format!("invalid method: {}", method));
            None
        }
    }
}
