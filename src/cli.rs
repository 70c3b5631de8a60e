use crate::case::FieldCase;
use crate::config::{GeneratorConfig, DEFAULT_MARKER, DEFAULT_OUTPUT_TAG};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Generate an OpenAPI document from annotation comments in a Rust project
#[derive(Parser, Debug)]
#[command(name = "openapi-from-comments")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the Rust project directory
    #[arg(value_name = "PROJECT_PATH")]
    pub project_path: PathBuf,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Text that marks a comment as an annotation block
    #[arg(long = "marker", default_value = DEFAULT_MARKER)]
    pub marker: String,

    /// Field tag whose name overrides a struct field's property name
    #[arg(long = "output-tag", default_value = DEFAULT_OUTPUT_TAG)]
    pub output_tag: String,

    /// Casing for struct field names that have no output tag
    #[arg(long = "field-case", value_enum, default_value = "lowerCase")]
    pub field_case: FieldCase,

    /// Exit with an error when any error-level diagnostic was recorded
    #[arg(long = "fail-on-error")]
    pub fail_on_error: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl CliArgs {
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            marker: self.marker.clone(),
            output_tag: self.output_tag.clone(),
            field_case: self.field_case,
        }
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.project_path.exists() {
        anyhow::bail!("Project path does not exist: {}", args.project_path.display());
    }
    if !args.project_path.is_dir() {
        anyhow::bail!("Project path is not a directory: {}", args.project_path.display());
    }
    args.config().validate()?;

    info!("Project path: {}", args.project_path.display());
    info!("Output format: {:?}", args.output_format);
    match &args.output_path {
        Some(output) => info!("Output file: {}", output.display()),
        None => info!("Output: stdout"),
    }
    info!("Annotation marker: {}", args.marker);

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::openapi_builder::generate;
    use crate::parser::{AstParser, ParsedFile};
    use crate::scanner::FileScanner;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    let config = args.config();

    info!("Scanning project directory...");
    let scan_result = FileScanner::new(args.project_path.clone())
        .scan()
        .context("Failed to scan project directory")?;
    info!("Found {} Rust files", scan_result.rust_files.len());
    if scan_result.rust_files.is_empty() {
        anyhow::bail!("No Rust files found in the project directory");
    }

    info!("Parsing Rust files...");
    let parsed_files: Vec<ParsedFile> = AstParser::parse_files(&scan_result.rust_files)
        .into_iter()
        .filter_map(|r| match r {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("Skipping file due to parse error: {}", e);
                None
            }
        })
        .collect();
    info!("Successfully parsed {} files", parsed_files.len());
    if parsed_files.is_empty() {
        anyhow::bail!("No files could be parsed successfully");
    }

    info!("Reading annotations...");
    let generated = generate(&parsed_files, &config);
    generated.diagnostics.report();

    let document = &generated.document;
    if document.paths.is_empty() && document.components.is_none() {
        warn!("No annotations found; is the marker `{}` correct?", config.marker);
    }

    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(document)?,
        OutputFormat::Json => serialize_json(document)?,
    };

    if let Some(output_path) = &args.output_path {
        write_to_file(&content, output_path)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        info!("Successfully wrote OpenAPI document to {}", output_path.display());
    } else {
        println!("{}", content);
    }

    info!("Summary:");
    info!("  - Files scanned: {}", scan_result.rust_files.len());
    info!("  - Files parsed: {}", parsed_files.len());
    info!("  - Paths: {}", document.paths.len());
    info!(
        "  - Diagnostics: {} warnings, {} errors",
        generated.diagnostics.warnings().count(),
        generated.diagnostics.errors().count()
    );

    if args.fail_on_error && generated.diagnostics.has_errors() {
        anyhow::bail!(
            "{} annotation errors were recorded",
            generated.diagnostics.errors().count()
        );
    }

    Ok(())
}
