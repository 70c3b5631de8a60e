//! OpenAPI from comments - command-line tool.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-comments [OPTIONS] <PROJECT_PATH>
//! ```
//!
//! # Examples
//!
//! Generate YAML documentation:
//! ```bash
//! openapi-from-comments ./my-api-project -o openapi.yaml
//! ```
//!
//! Generate JSON, reading blocks marked with `api-doc`:
//! ```bash
//! openapi-from-comments ./my-api-project -f json --marker api-doc -o openapi.json
//! ```
//!
//! Fail the build on broken annotations:
//! ```bash
//! openapi-from-comments ./my-api-project --fail-on-error -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use openapi_from_comments::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("OpenAPI from comments starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("OpenAPI document generation completed successfully");

    Ok(())
}
