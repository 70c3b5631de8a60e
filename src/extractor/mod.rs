//! Extraction of annotation input from parsed Rust sources.
//!
//! Two kinds of raw material feed the annotation pipeline:
//!
//! - **Comments**: every comment block in source order, see [`comments::CommentExtractor`]
//! - **Tagged structs**: named-field structs whose fields carry tag text in their doc
//!   comments, see [`structs::StructExtractor`]
//!
//! # Example
//!
//! ```no_run
//! use openapi_from_comments::extractor::comments::CommentExtractor;
//! use openapi_from_comments::parser::AstParser;
//! use std::path::Path;
//!
//! let parsed = AstParser::parse_file(Path::new("src/main.rs")).unwrap();
//! let comments = CommentExtractor::new("openapi-doc").extract_from_files(&[parsed]);
//! println!("Found {} comments", comments.len());
//! ```

pub mod comments;
pub mod structs;

pub use comments::CommentExtractor;
pub use structs::{FieldDescriptor, StructDescriptor, StructExtractor};
