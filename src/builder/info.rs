use super::ComponentGroups;
use crate::diagnostics::Diagnostics;
use crate::directive::parse_lines;
use log::debug;
use serde::{Deserialize, Serialize};

const COMPONENT: &str = "openapi";

pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.0";
pub const DEFAULT_TITLE: &str = "Generated API";
pub const DEFAULT_VERSION: &str = "1.0.0";

/// OpenAPI Info object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "termsOfService", skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    pub version: String,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: None,
            terms_of_service: None,
            contact: None,
            license: None,
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The `openapi` version string together with the info object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoBlock {
    pub openapi: String,
    pub info: Info,
}

impl Default for InfoBlock {
    fn default() -> Self {
        Self {
            openapi: DEFAULT_OPENAPI_VERSION.to_string(),
            info: Info::default(),
        }
    }
}

/// Applies every `openapi` group on top of `base`.
///
/// The group name is the OpenAPI version; only `3.x` versions are accepted.
pub fn build_info(groups: &ComponentGroups, base: InfoBlock, diagnostics: &mut Diagnostics) -> InfoBlock {
    let mut block = base;
    for (version, line_groups) in groups {
        if version.starts_with("3.") {
            block.openapi = version.clone();
        } else {
            diagnostics.warn(
                COMPONENT,
                format!("unsupported version {}; using {}", version, DEFAULT_OPENAPI_VERSION),
            );
            block.openapi = DEFAULT_OPENAPI_VERSION.to_string();
        }
        for lines in line_groups {
            debug!("Applying openapi block: {}", version);
            apply_info_lines(lines, &mut block.info, diagnostics);
        }
    }
    block
}

pub fn apply_info_lines(lines: &[String], info: &mut Info, diagnostics: &mut Diagnostics) {
    for directive in parse_lines(lines, COMPONENT, diagnostics) {
        let value = directive.value.to_string();
        match directive.key {
            "info.title" => info.title = value,
            "info.description" => info.description = Some(value),
            "info.termsOfService" => info.terms_of_service = Some(value),
            "info.version" => info.version = value,
            "info.contact.name" => info.contact.get_or_insert_with(Contact::default).name = Some(value),
            "info.contact.url" => info.contact.get_or_insert_with(Contact::default).url = Some(value),
            "info.contact.email" => info.contact.get_or_insert_with(Contact::default).email = Some(value),
            "info.license.name" => info.license.get_or_insert_with(License::default).name = value,
            "info.license.url" => info.license.get_or_insert_with(License::default).url = Some(value),
            _ => diagnostics.warn(COMPONENT, format!("invalid name option: {}", directive.line)),
        }
    }

    if info.license.as_ref().is_some_and(|license| license.name.is_empty()) {
        diagnostics.warn(COMPONENT, "info.license.url given without info.license.name");
    }
}
