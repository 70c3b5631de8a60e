use super::{split_list, ComponentGroups};
use crate::diagnostics::Diagnostics;
use crate::directive::{parse_lines, GroupCursor};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scheme name to required scopes.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

const KNOWN_SCHEME_TYPES: [&str; 5] = ["apiKey", "http", "oauth2", "openIdConnect", "mutualTLS"];

/// Builds security requirements. Every line group adds one requirement map to its
/// name instead of replacing the previous one.
pub fn build_security(
    groups: &ComponentGroups,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, Vec<SecurityRequirement>> {
    let mut security = BTreeMap::new();
    for (name, line_groups) in groups {
        let requirements: &mut Vec<SecurityRequirement> = security.entry(name.clone()).or_default();
        for lines in line_groups {
            debug!("Building security requirement: {}", name);
            requirements.push(parse_security_lines(lines, diagnostics));
        }
    }
    security
}

pub fn parse_security_lines(lines: &[String], diagnostics: &mut Diagnostics) -> SecurityRequirement {
    let mut cursor: GroupCursor<Vec<String>> = GroupCursor::new();
    for directive in parse_lines(lines, "security", diagnostics) {
        match directive.key {
            "name" => {
                cursor.enter(directive.value);
            }
            "scope" => match cursor.current() {
                Some(scopes) => *scopes = split_list(directive.value),
                None => diagnostics.warn("security", format!("scope before any name: {}", directive.line)),
            },
            _ => diagnostics.warn("security", format!("invalid name option: {}", directive.line)),
        }
    }
    cursor.finish().into_iter().collect()
}

/// OpenAPI Security Scheme
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(rename = "bearerFormat", skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

pub fn build_security_schemes(
    groups: &ComponentGroups,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, SecurityScheme> {
    let mut schemes = BTreeMap::new();
    for (name, line_groups) in groups {
        for lines in line_groups {
            debug!("Building security scheme: {}", name);
            schemes.insert(name.clone(), parse_security_scheme_lines(name, lines, diagnostics));
        }
    }
    schemes
}

pub fn parse_security_scheme_lines(name: &str, lines: &[String], diagnostics: &mut Diagnostics) -> SecurityScheme {
    let component = "securityScheme";
    let mut scheme = SecurityScheme::default();
    for directive in parse_lines(lines, component, diagnostics) {
        let value = Some(directive.value.to_string());
        match directive.key {
            "type" => scheme.scheme_type = directive.value.to_string(),
            "scheme" => scheme.scheme = value,
            "description" => scheme.description = value,
            "bearerFormat" => scheme.bearer_format = value,
            "in" => scheme.location = value,
            "name" => scheme.name = value,
            _ => diagnostics.warn(component, format!("invalid name option: {}", directive.line)),
        }
    }

    if scheme.scheme_type.is_empty() {
        diagnostics.error(component, format!("type is required for {}", name));
    } else if !KNOWN_SCHEME_TYPES.contains(&scheme.scheme_type.as_str()) {
        diagnostics.warn(
            component,
            format!("unknown type {} for {}; expected one of {}", scheme.scheme_type, name, KNOWN_SCHEME_TYPES.join(", ")),
        );
    }
    scheme
}
