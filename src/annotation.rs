//! Annotation block parser.
//!
//! An annotation block is a comment that carries the configured marker within its
//! first 20 characters. Its body is a sequence of directives separated by `@@`:
//!
//! ```text
//! /* openapi-doc
//! @@schema: Widget
//! @@type: object
//! @@prop_name: id
//! @@prop_type: integer
//! @@
//! @@response: 200 @@desc: ok @@content_name: application/json @@content_ref: Widget
//! */
//! ```
//!
//! The first token must be a `(component-type): (name)` header. When the block
//! contains blank `@@` separators it uses the multi-line layout: each separator
//! closes the current line group and the next header opens a new one. Without any
//! separator the whole block is one flat line group for the header's name
//! (single-line-continuation layout).

use crate::diagnostics::Diagnostics;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<comp_type>[a-zA-Z]+):\s*(?P<name>\S.*)$").expect("Invalid header regex")
});

/// How far into a comment the marker may appear.
const MARKER_WINDOW: usize = 20;
const CLOSE_SEQUENCE: &str = "*/";
const SEPARATOR: &str = "@@";

/// Diagnostics for block level problems are filed under this component.
const COMPONENT: &str = "annotation";

/// The directive lines that followed one header occurrence.
pub type LineGroup = Vec<String>;

/// Every line group found, keyed by component type and then by name.
///
/// A name keeps one group per header occurrence, in the order they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    components: BTreeMap<String, BTreeMap<String, Vec<LineGroup>>>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component: &str, name: &str, group: LineGroup) {
        self.components
            .entry(component.to_string())
            .or_default()
            .entry(name.to_string())
            .or_default()
            .push(group);
    }

    /// All named groups of one component type.
    pub fn component(&self, component: &str) -> Option<&BTreeMap<String, Vec<LineGroup>>> {
        self.components.get(component)
    }

    /// Line groups recorded for `name` under `component`, empty when there are none.
    pub fn groups(&self, component: &str, name: &str) -> &[LineGroup] {
        self.components
            .get(component)
            .and_then(|names| names.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn names<'a>(&'a self, component: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.components
            .get(component)
            .into_iter()
            .flat_map(|names| names.keys().map(String::as_str))
    }

    pub fn component_types(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Splits marked comments into per-component line groups.
#[derive(Debug, Clone)]
pub struct AnnotationParser {
    marker: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    MultiLine,
    SingleLine,
}

impl Layout {
    /// Normalises one `@@` token for this layout.
    fn clean(&self, token: &str) -> String {
        match self {
            Layout::MultiLine => token.replace(['\r', '\n'], "").trim().to_string(),
            Layout::SingleLine => token.replace("\r\n", " ").replace('\n', " ").trim().to_string(),
        }
    }
}

impl AnnotationParser {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Parses every comment and collects the groups into one set.
    pub fn parse_blocks<I, S>(&self, comments: I, diagnostics: &mut Diagnostics) -> AnnotationSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = AnnotationSet::new();
        let mut blocks = 0;
        for comment in comments {
            if self.parse_block(comment.as_ref(), &mut set, diagnostics) {
                blocks += 1;
            }
        }
        debug!("Parsed {} annotation blocks", blocks);
        set
    }

    /// Parses one comment into `set`.
    ///
    /// Returns `false` when the comment does not carry the marker and therefore is
    /// not annotation data.
    pub fn parse_block(
        &self,
        raw: &str,
        set: &mut AnnotationSet,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        let Some(body) = self.strip_marker(raw) else {
            return false;
        };

        let tokens: Vec<&str> = body.split(SEPARATOR).skip(1).collect();
        if tokens.is_empty() {
            diagnostics.warn(COMPONENT, format!("marked comment has no directives: {}", body));
            return true;
        }

        let layout = if tokens[1..].iter().any(|token| token.trim().is_empty()) {
            Layout::MultiLine
        } else {
            Layout::SingleLine
        };

        let first = layout.clean(tokens[0]);
        let Some((component, name)) = parse_header(&first) else {
            diagnostics.warn(COMPONENT, format!("bad format of line: {}", first));
            return true;
        };

        match layout {
            Layout::SingleLine => {
                let group: LineGroup = tokens[1..]
                    .iter()
                    .map(|token| layout.clean(token))
                    .filter(|line| !line.is_empty())
                    .collect();
                debug!("{}: {} ({} lines, single-line)", component, name, group.len());
                set.insert(&component, &name, group);
            }
            Layout::MultiLine => self.parse_multi_line(&tokens, component, name, set, diagnostics),
        }
        true
    }

    fn parse_multi_line(
        &self,
        tokens: &[&str],
        mut component: String,
        mut name: String,
        set: &mut AnnotationSet,
        diagnostics: &mut Diagnostics,
    ) {
        let layout = Layout::MultiLine;
        let mut index = 1;
        loop {
            let mut group = LineGroup::new();
            while index < tokens.len() && !tokens[index].trim().is_empty() {
                group.push(layout.clean(tokens[index]));
                index += 1;
            }
            debug!("{}: {} ({} lines)", component, name, group.len());
            set.insert(&component, &name, group);

            // Skip the separator, then look for the next header.
            index += 1;
            loop {
                let Some(token) = tokens.get(index) else {
                    return;
                };
                index += 1;
                let line = layout.clean(token);
                if line.is_empty() {
                    continue;
                }
                match parse_header(&line) {
                    Some((next_component, next_name)) => {
                        component = next_component;
                        name = next_name;
                        break;
                    }
                    None => diagnostics.warn(COMPONENT, format!("bad format of line: {}", line)),
                }
            }
        }
    }

    /// Returns the block body after the marker, without the close sequence.
    fn strip_marker<'a>(&self, raw: &'a str) -> Option<&'a str> {
        if self.marker.is_empty() {
            return None;
        }
        let window_end = raw
            .char_indices()
            .nth(MARKER_WINDOW)
            .map(|(idx, _)| idx)
            .unwrap_or(raw.len());
        let start = raw[..window_end].find(&self.marker)? + self.marker.len();

        let body = raw[start..].trim_end();
        let body = body.strip_suffix(CLOSE_SEQUENCE).unwrap_or(body);
        Some(body.trim())
    }
}

fn parse_header(line: &str) -> Option<(String, String)> {
    let captures = HEADER_RE.captures(line)?;
    let component = captures.name("comp_type")?.as_str().trim().to_string();
    let name = captures.name("name")?.as_str().trim().to_string();
    Some((component, name))
}
