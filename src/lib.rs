//! OpenAPI from comments - OpenAPI 3 documents assembled from annotation comments.
//!
//! API descriptions live next to the code as specially marked comments. Each comment
//! holds `@@`-separated directives that describe one or more components (schemas,
//! parameters, responses, request bodies, operations, paths, servers, security).
//! Struct schemas can also be derived from struct fields whose doc comments carry
//! `oas:"..."` style tags.
//!
//! # Architecture
//!
//! 1. [`scanner`] - Recursively scans project directories for Rust files
//! 2. [`parser`] - Parses Rust source files, keeping the source text alongside
//! 3. [`extractor`] - Pulls comments and annotated struct fields out of the files
//! 4. [`annotation`] - Splits marked comments into line groups per component
//! 5. [`directive`] - Reads `key: value` directive lines
//! 6. [`builder`] - Turns line groups into typed OpenAPI entities
//! 7. [`openapi_builder`] - Merges everything into one document
//! 8. [`serializer`] - Serializes the document to YAML or JSON
//!
//! Problems in annotations never abort a run. They are collected in a
//! [`diagnostics::Diagnostics`] value and reported at the end.
//!
//! # Example Usage
//!
//! ```no_run
//! use openapi_from_comments::{
//!     config::GeneratorConfig,
//!     openapi_builder::generate,
//!     parser::AstParser,
//!     scanner::FileScanner,
//!     serializer::serialize_yaml,
//! };
//! use std::path::PathBuf;
//!
//! let scan_result = FileScanner::new(PathBuf::from("./my-project")).scan().unwrap();
//! let parsed_files: Vec<_> = AstParser::parse_files(&scan_result.rust_files)
//!     .into_iter()
//!     .filter_map(Result::ok)
//!     .collect();
//!
//! let generated = generate(&parsed_files, &GeneratorConfig::default());
//! generated.diagnostics.report();
//!
//! println!("{}", serialize_yaml(&generated.document).unwrap());
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod annotation;
pub mod builder;
pub mod case;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod directive;
pub mod error;
pub mod extractor;
pub mod openapi_builder;
pub mod parser;
pub mod reference;
pub mod scanner;
pub mod serializer;
pub mod tag;
