//! `key: value` directive lines and the flush-on-change grouping cursor shared by
//! the typed builders.

use crate::diagnostics::Diagnostics;
use once_cell::sync::Lazy;
use regex::Regex;

static DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<key>[a-zA-Z_/.]+):\s*(?P<value>\S.*)$").expect("Invalid directive regex")
});

/// One `key: value` line of a line group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    pub key: &'a str,
    /// Value with surrounding whitespace removed
    pub value: &'a str,
    /// The line as written, used in diagnostics
    pub line: &'a str,
}

impl<'a> Directive<'a> {
    /// Parses a single line; `None` when it does not follow the `key: value` grammar.
    pub fn parse(line: &'a str) -> Option<Self> {
        let captures = DIRECTIVE_RE.captures(line)?;
        let key = captures.name("key")?.as_str();
        let value = captures.name("value")?.as_str().trim();
        Some(Directive { key, value, line })
    }

    /// True for the literal value `true`; anything else counts as "not set".
    pub fn is_true(&self) -> bool {
        self.value == "true"
    }
}

/// Parses every line of a group, recording malformed ones under `component` and
/// dropping them.
pub fn parse_lines<'a>(
    lines: &'a [String],
    component: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<Directive<'a>> {
    lines
        .iter()
        .filter_map(|line| {
            let directive = Directive::parse(line);
            if directive.is_none() {
                diagnostics.warn(component, format!("bad format of line: {}", line));
            }
            directive
        })
        .collect()
}

/// Groups consecutive directives into keyed entries.
///
/// [`GroupCursor::enter`] keeps filling the open entry while the key stays the same
/// and starts a fresh entry as soon as it changes. Returning to an earlier key
/// starts yet another entry; nothing is merged back.
#[derive(Debug)]
pub struct GroupCursor<T> {
    current: Option<(String, T)>,
    closed: Vec<(String, T)>,
}

impl<T: Default> GroupCursor<T> {
    pub fn new() -> Self {
        Self {
            current: None,
            closed: Vec::new(),
        }
    }

    /// Opens `key`, continuing the open entry when it already has that key.
    pub fn enter(&mut self, key: &str) -> &mut T {
        if self.current_key() != Some(key) {
            self.flush();
            self.current = Some((key.to_string(), T::default()));
        }
        &mut self
            .current
            .get_or_insert_with(|| (key.to_string(), T::default()))
            .1
    }

    /// Always starts a fresh entry for `key`, even if the open one has the same key.
    pub fn start(&mut self, key: &str) -> &mut T {
        self.flush();
        &mut self.current.insert((key.to_string(), T::default())).1
    }

    /// The open entry, if any.
    pub fn current(&mut self) -> Option<&mut T> {
        self.current.as_mut().map(|(_, value)| value)
    }

    pub fn current_key(&self) -> Option<&str> {
        self.current.as_ref().map(|(key, _)| key.as_str())
    }

    fn flush(&mut self) {
        if let Some(entry) = self.current.take() {
            self.closed.push(entry);
        }
    }

    /// Closes the open entry and returns every entry in the order they were started.
    pub fn finish(mut self) -> Vec<(String, T)> {
        self.flush();
        self.closed
    }
}

impl<T: Default> Default for GroupCursor<T> {
    fn default() -> Self {
        Self::new()
    }
}
