use super::schema::{PropertyDraft, SchemaProperty, SchemaType};
use super::{is_false, ComponentGroups};
use crate::diagnostics::Diagnostics;
use crate::directive::parse_lines;
use crate::reference::ComponentCategory;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const COMPONENT: &str = "parameter";

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

impl FromStr for ParameterLocation {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "query" => Ok(ParameterLocation::Query),
            "header" => Ok(ParameterLocation::Header),
            "path" => Ok(ParameterLocation::Path),
            "cookie" => Ok(ParameterLocation::Cookie),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::Cookie => "cookie",
        };
        f.write_str(name)
    }
}

/// OpenAPI Parameter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// `None` when the annotation left `in` out or gave an unknown location
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<ParameterLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaProperty>,
}

/// Builds one parameter per name from multi-line groups.
pub fn build_parameters(groups: &ComponentGroups, diagnostics: &mut Diagnostics) -> BTreeMap<String, Parameter> {
    let mut parameters = BTreeMap::new();
    for (name, line_groups) in groups {
        for lines in line_groups {
            debug!("Building parameter: {}", name);
            parameters.insert(name.clone(), parse_parameter_lines(lines, diagnostics));
        }
    }
    parameters
}

pub fn parse_parameter_lines(lines: &[String], diagnostics: &mut Diagnostics) -> Parameter {
    let mut parameter = Parameter::default();
    let mut location: Option<&str> = None;
    let mut schema: Option<PropertyDraft> = None;

    for directive in parse_lines(lines, COMPONENT, diagnostics) {
        let value = directive.value;
        match directive.key {
            "name" => parameter.name = value.to_string(),
            "in" => location = Some(value),
            "description" => parameter.description = Some(value.to_string()),
            "required" => parameter.required = directive.is_true(),
            "schema_type" | "schema_description" | "schema_example" | "schema_ref" => {
                let draft = schema.get_or_insert_with(PropertyDraft::default);
                match directive.key {
                    "schema_type" => {
                        draft.property_type = Some(SchemaType::parse_or_string(value, COMPONENT, diagnostics))
                    }
                    "schema_description" => draft.description = Some(value.to_string()),
                    "schema_example" => draft.example = Some(value.to_string()),
                    _ => draft.reference = Some(ComponentCategory::Schemas.reference(value)),
                }
            }
            _ => diagnostics.warn(COMPONENT, format!("invalid name option: {}", directive.line)),
        }
    }

    parameter.location = match location {
        None => {
            diagnostics.error(COMPONENT, format!("in is required for {}", parameter.name));
            None
        }
        Some(value) => match value.parse() {
            Ok(location) => Some(location),
            Err(()) => {
                diagnostics.error(
                    COMPONENT,
                    format!(
                        "in is invalid for {}: {}; expected [query | header | path | cookie]",
                        parameter.name, value
                    ),
                );
                None
            }
        },
    };
    parameter.schema = schema.map(|draft| draft.finish(COMPONENT, diagnostics));
    parameter
}
