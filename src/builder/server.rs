use super::ComponentGroups;
use crate::diagnostics::Diagnostics;
use crate::directive::{parse_lines, GroupCursor};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const COMPONENT: &str = "server";

/// OpenAPI Server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Builds the server list of every group; a later group of the same name replaces
/// an earlier one.
pub fn build_servers(groups: &ComponentGroups, diagnostics: &mut Diagnostics) -> BTreeMap<String, Vec<Server>> {
    let mut servers = BTreeMap::new();
    for (name, line_groups) in groups {
        for lines in line_groups {
            debug!("Building servers: {}", name);
            let entries = parse_server_lines(lines, diagnostics);
            if entries.is_empty() {
                diagnostics.warn(COMPONENT, format!("no url given for {}; group skipped", name));
                continue;
            }
            servers.insert(name.clone(), entries);
        }
    }
    servers
}

/// Each `url` directive starts a new server; a `description` applies to the latest one.
pub fn parse_server_lines(lines: &[String], diagnostics: &mut Diagnostics) -> Vec<Server> {
    let mut cursor: GroupCursor<Option<String>> = GroupCursor::new();
    for directive in parse_lines(lines, COMPONENT, diagnostics) {
        match directive.key {
            "url" => {
                cursor.start(directive.value);
            }
            "description" => match cursor.current() {
                Some(description) => *description = Some(directive.value.to_string()),
                None => diagnostics.warn(COMPONENT, format!("description before any url: {}", directive.line)),
            },
            _ => diagnostics.warn(COMPONENT, format!("invalid name option: {}", directive.line)),
        }
    }
    cursor
        .finish()
        .into_iter()
        .map(|(url, description)| Server { url, description })
        .collect()
}
