use crate::error::{Error, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Parser for Rust source files.
///
/// Keeps the source text next to the `syn` tree: struct fields are read from the
/// tree while plain comments, which `syn` discards, are read from the text.
///
/// # Example
///
/// ```no_run
/// use openapi_from_comments::parser::AstParser;
/// use std::path::Path;
///
/// let parsed = AstParser::parse_file(Path::new("src/main.rs")).unwrap();
/// println!("Parsed {} items", parsed.syntax_tree.items.len());
/// ```
pub struct AstParser;

/// A successfully parsed Rust file.
#[derive(Debug)]
pub struct ParsedFile {
    /// Path to the source file
    pub path: PathBuf,
    /// The file content as read
    pub source: String,
    /// The parsed abstract syntax tree
    pub syntax_tree: syn::File,
}

impl AstParser {
    /// Reads and parses a single file.
    ///
    /// # Errors
    ///
    /// [`Error::IoError`] when the file cannot be read and [`Error::ParseError`]
    /// when it is not valid Rust.
    pub fn parse_file(path: &Path) -> Result<ParsedFile> {
        debug!("Parsing file: {}", path.display());
        let source = fs::read_to_string(path)?;
        Self::parse_source(path, source)
    }

    /// Parses source text that was already loaded.
    pub fn parse_source(path: &Path, source: String) -> Result<ParsedFile> {
        let syntax_tree = syn::parse_file(&source).map_err(|err| Error::ParseError {
            file: path.to_path_buf(),
            message: err.to_string(),
        })?;

        Ok(ParsedFile {
            path: path.to_path_buf(),
            source,
            syntax_tree,
        })
    }

    /// Parses every path, continuing past failures.
    ///
    /// Failures are logged and returned in place so callers can count them.
    pub fn parse_files(paths: &[PathBuf]) -> Vec<Result<ParsedFile>> {
        debug!("Parsing {} files", paths.len());

        let results: Vec<Result<ParsedFile>> = paths
            .iter()
            .map(|path| {
                Self::parse_file(path).inspect_err(|e| warn!("Failed to parse {}: {}", path.display(), e))
            })
            .collect();

        let success_count = results.iter().filter(|r| r.is_ok()).count();
        debug!(
            "Parsing complete: {} succeeded, {} failed",
            success_count,
            results.len() - success_count
        );

        results
    }
}
