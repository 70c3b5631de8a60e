//! Field tag decoder.
//!
//! Tag text is a space separated list of `key:"value"` pairs, for example
//! `oas:"WidgetRequest*;WidgetResponse" oas_desc:"widget name" json:"name,omitempty"`.
//! A value may contain comma separated options after its name part.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?P<key>[^\s:"]+):"(?P<value>(?:[^"\\]|\\.)*)""#).expect("Invalid tag regex")
});

static ESCAPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(.)").expect("Invalid escape regex"));

/// One `key:"value"` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    /// The value up to its first comma.
    pub fn name(&self) -> &str {
        self.value.split(',').next().unwrap_or("").trim()
    }
}

/// Decoded tag text, in written order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    tags: Vec<Tag>,
}

/// Tag text that does not follow the `key:"value"` syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagError {
    pub message: String,
    pub position: usize,
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.position)
    }
}

impl std::error::Error for TagError {}

impl Tags {
    pub fn parse(raw: &str) -> Result<Self, TagError> {
        raw.parse()
    }

    /// First tag with the given key.
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.key == key)
    }
}

impl FromStr for Tags {
    type Err = TagError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut tags = Vec::new();
        let mut covered = 0;

        for captures in TAG_RE.captures_iter(raw) {
            let (Some(whole), Some(key), Some(value)) = (captures.get(0), captures.name("key"), captures.name("value"))
            else {
                continue;
            };
            check_gap(raw, covered, whole.start())?;
            tags.push(Tag {
                key: key.as_str().to_string(),
                value: ESCAPE_RE.replace_all(value.as_str(), "$1").into_owned(),
            });
            covered = whole.end();
        }
        check_gap(raw, covered, raw.len())?;

        Ok(Tags { tags })
    }
}

/// Text between two pairs may only be whitespace, and pairs must be separated.
fn check_gap(raw: &str, start: usize, end: usize) -> Result<(), TagError> {
    let gap = &raw[start..end];
    let trimmed = gap.trim_start();
    let position = start + (gap.len() - trimmed.len());
    if trimmed.is_empty() {
        if start > 0 && end < raw.len() && gap.is_empty() {
            return Err(TagError {
                message: "expected whitespace between tags".to_string(),
                position,
            });
        }
        return Ok(());
    }

    let key: String = trimmed
        .chars()
        .take_while(|c| !c.is_whitespace() && *c != ':' && *c != '"')
        .collect();
    let after_key = &trimmed[key.len()..];
    let message = if key.is_empty() {
        "expected tag key".to_string()
    } else if !after_key.starts_with(':') {
        format!("expected ':' after key `{}`", key)
    } else if !after_key[1..].starts_with('"') {
        format!("expected quoted value for key `{}`", key)
    } else {
        format!("unterminated value for key `{}`", key)
    };
    Err(TagError { message, position })
}

/// True when a line is meant as tag text rather than prose.
///
/// Only the `key:"` shape is checked; whether the text is well formed is left to
/// [`Tags::parse`] so that broken tags can be reported.
pub fn looks_like_tag(line: &str) -> bool {
    line.contains(":\"")
}
