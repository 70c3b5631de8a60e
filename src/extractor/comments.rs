use crate::error::{Error, Result};
use crate::parser::ParsedFile;
use log::{debug, warn};
use std::path::Path;
use tree_sitter::{Language, Node, Parser};

const LINE_COMMENT: &str = "line_comment";
const BLOCK_COMMENT: &str = "block_comment";

/// Collects comment blocks with `tree-sitter-rust`.
///
/// `syn` keeps doc comments as attributes but drops plain comments, so the source
/// text is parsed a second time with tree-sitter, which keeps comments as nodes.
/// Each block comment becomes one entry. Line comments on consecutive lines are
/// joined into one entry, except that a line starting with the marker always
/// opens a new entry, so prose above an annotation does not push the marker out
/// of reach.
pub struct CommentExtractor {
    marker: String,
}

impl CommentExtractor {
    pub fn new(marker: impl Into<String>) -> Self {
        Self { marker: marker.into() }
    }

    /// Comments of every file, in file order. Files tree-sitter cannot handle are
    /// logged and skipped.
    pub fn extract_from_files(&self, files: &[ParsedFile]) -> Vec<String> {
        let mut comments = Vec::new();
        for file in files {
            match self.extract(&file.path, &file.source) {
                Ok(found) => {
                    debug!("Found {} comments in {}", found.len(), file.path.display());
                    comments.extend(found);
                }
                Err(err) => warn!("Skipping comments of {}: {}", file.path.display(), err),
            }
        }
        comments
    }

    /// Comment texts of one source file in source order, comment syntax removed.
    pub fn extract(&self, path: &Path, source: &str) -> Result<Vec<String>> {
        let parse_error = |message: String| Error::ParseError {
            file: path.to_path_buf(),
            message,
        };

        let language: Language = tree_sitter_rust::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|err| parse_error(err.to_string()))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| parse_error("tree-sitter returned no tree".to_string()))?;

        let mut collector = Collector {
            source,
            marker: &self.marker,
            run: None,
            comments: Vec::new(),
        };

        let mut cursor = tree.walk();
        'walk: loop {
            let node = cursor.node();
            let is_comment = matches!(node.kind(), LINE_COMMENT | BLOCK_COMMENT);
            if is_comment {
                collector.add(node);
            } else if cursor.goto_first_child() {
                continue;
            }
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        Ok(collector.finish())
    }
}

/// Consecutive line comments that have not been emitted yet.
struct LineRun {
    last_row: usize,
    end_byte: usize,
    lines: Vec<String>,
}

struct Collector<'a> {
    source: &'a str,
    marker: &'a str,
    run: Option<LineRun>,
    comments: Vec<String>,
}

impl Collector<'_> {
    fn add(&mut self, node: Node<'_>) {
        let Ok(raw) = node.utf8_text(self.source.as_bytes()) else {
            return;
        };
        if node.kind() == LINE_COMMENT {
            self.line_comment(node, raw);
        } else {
            self.flush_run();
            self.comments.push(block_comment_text(raw));
        }
    }

    fn line_comment(&mut self, node: Node<'_>, raw: &str) {
        let text = line_comment_text(raw);
        let row = node.start_position().row;
        let source = self.source;
        let opens_block = !self.marker.is_empty() && text.trim_start().starts_with(self.marker);

        let continues = |run: &&mut LineRun| {
            !opens_block
                && run.last_row + 1 == row
                && source
                    .get(run.end_byte..node.start_byte())
                    .is_some_and(|gap| gap.trim().is_empty())
        };
        if let Some(run) = self.run.as_mut().filter(continues) {
            run.lines.push(text);
            run.last_row = row;
            run.end_byte = node.end_byte();
            return;
        }

        self.flush_run();
        self.run = Some(LineRun {
            last_row: row,
            end_byte: node.end_byte(),
            lines: vec![text],
        });
    }

    fn flush_run(&mut self) {
        if let Some(run) = self.run.take() {
            self.comments.push(run.lines.join("\n"));
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush_run();
        self.comments
    }
}

/// `// text`, `/// text` and `//! text` all become `text`.
fn line_comment_text(raw: &str) -> String {
    let raw = raw.trim_end();
    let body = raw.strip_prefix("//").unwrap_or(raw);
    let body = match body.strip_prefix(['/', '!']) {
        Some(rest) if !body.starts_with("//") => rest,
        _ => body,
    };
    body.strip_prefix(' ').unwrap_or(body).trim_end().to_string()
}

fn block_comment_text(raw: &str) -> String {
    let inner = raw.strip_prefix("/*").unwrap_or(raw);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);
    strip_block_decoration(inner)
}

/// Removes the doc marker of `/** */` and `/*! */` comments and the leading `*`
/// decoration of each line.
fn strip_block_decoration(inner: &str) -> String {
    let inner = inner.strip_prefix(['*', '!']).unwrap_or(inner);
    inner
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            match trimmed.strip_prefix('*') {
                Some(rest) if !rest.starts_with('/') => rest.strip_prefix(' ').unwrap_or(rest),
                _ => line,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(source: &str) -> Vec<String> {
        CommentExtractor::new("openapi-doc")
            .extract(Path::new("test.rs"), source)
            .unwrap()
    }

    #[test]
    fn test_block_comment() {
        assert_eq!(
            texts("fn a() {}\n/* openapi-doc\n@@schema: Widget\n*/\nfn b() {}"),
            vec![" openapi-doc\n@@schema: Widget"]
        );
    }

    #[test]
    fn test_javadoc_decoration_is_removed() {
        let source = "/**\n * openapi-doc\n * @@schema: Widget\n * @@type: object\n */\nfn a() {}";
        assert_eq!(
            texts(source),
            vec!["\nopenapi-doc\n@@schema: Widget\n@@type: object\n "]
        );
    }

    #[test]
    fn test_nested_block_comment() {
        assert_eq!(
            texts("/* outer /* inner */ still outer */ fn x() {}"),
            vec![" outer /* inner */ still outer "]
        );
    }

    #[test]
    fn test_line_comment_runs() {
        let source = "\
/// openapi-doc
/// @@schema: Widget
/// @@type: object
fn a() {}

// second
// run

// third";
        assert_eq!(
            texts(source),
            vec![
                "openapi-doc\n@@schema: Widget\n@@type: object",
                "second\nrun",
                "third",
            ]
        );
    }

    #[test]
    fn test_marker_line_opens_a_new_run() {
        let source = "// Widget endpoints.\n// openapi-doc\n// @@path: /widgets\nfn widgets() {}";
        assert_eq!(texts(source), vec!["Widget endpoints.", "openapi-doc\n@@path: /widgets"]);
    }

    #[test]
    fn test_code_between_line_comments_splits_runs() {
        let source = "fn f() {\n    let x = 1; // first\n    let y = 2; // second\n}";
        assert_eq!(texts(source), vec!["first", "second"]);
    }

    #[test]
    fn test_literals_are_skipped() {
        let source = r####"
fn f<'a>(s: &'a str) -> &'a str {
    let url = "http://example.com/*not a comment*/";
    let raw = r#"// also "not" a comment"#;
    let bytes = br"/* nope */";
    let slash = '/';
    let quote = '\'';
    s // real
}
"####;
        assert_eq!(texts(source), vec!["real"]);
    }

    #[test]
    fn test_comments_inside_items_are_found() {
        let source = "impl Widget {\n    /* openapi-doc @@schema: Widget */\n    fn new() -> Self { Widget }\n}";
        assert_eq!(texts(source), vec![" openapi-doc @@schema: Widget "]);
    }
}
