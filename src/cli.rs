use crate::analyzer::{AnalysisReport, AnalyzerConfig, EndpointAnalyzer};
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Spring Endpoints - Statically list the HTTP endpoints of a Spring MVC code base
#[derive(Parser, Debug)]
#[command(name = "spring-endpoints")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the Java source tree
    #[arg(value_name = "SOURCE_PATH")]
    pub source_path: PathBuf,

    /// Output file path
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = "endpoints.json")]
    pub output_path: PathBuf,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Extension of the source files to analyze
    #[arg(long = "extension", value_name = "EXT", default_value = "java")]
    pub extension: String,

    /// Abort on the first file that fails to parse instead of skipping it
    #[arg(long = "fail-on-parse-error")]
    pub fail_on_parse_error: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON array
    Json,
    /// YAML sequence
    Yaml,
}

impl CliArgs {
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            extension: self.extension.clone(),
            fail_on_parse_error: self.fail_on_parse_error,
        }
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.source_path.exists() {
        anyhow::bail!(
            "Source path does not exist: {}",
            args.source_path.display()
        );
    }

    if !args.source_path.is_dir() && !args.source_path.is_file() {
        anyhow::bail!(
            "Source path is neither a directory nor a file: {}",
            args.source_path.display()
        );
    }

    if args.extension.trim_start_matches('.').is_empty() {
        anyhow::bail!("Source file extension must not be empty");
    }

    info!("Source path: {}", args.source_path.display());
    info!("Output format: {:?}", args.output_format);
    info!("Output file: {}", args.output_path.display());
    if args.fail_on_parse_error {
        info!("Parse errors are fatal");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    info!("Starting endpoint analysis...");

    let analyzer = EndpointAnalyzer::new(args.analyzer_config());
    let report = analyzer
        .analyze(&args.source_path)
        .with_context(|| format!("Failed to analyze {}", args.source_path.display()))?;

    if report.endpoints.is_empty() {
        warn!("No endpoints found in the source tree");
    }

    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Json => serialize_json(&report.endpoints)?,
        OutputFormat::Yaml => serialize_yaml(&report.endpoints)?,
    };

    write_to_file(&content, &args.output_path)
        .with_context(|| format!("Failed to write {}", args.output_path.display()))?;

    info!("Summary:");
    for line in summary(&report) {
        info!("  - {}", line);
    }
    for skipped in &report.skipped_files {
        debug!("Skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    for warning in &report.scan_warnings {
        warn!("Not scanned: {}", warning);
    }

    println!(
        "Endpoint analysis complete. Results written to {}",
        args.output_path.display()
    );

    Ok(())
}

fn summary(report: &AnalysisReport) -> Vec<String> {
    vec![
        format!("Files scanned: {}", report.files_scanned),
        format!("Files skipped: {}", report.skipped_files.len()),
        format!("Paths not scanned: {}", report.scan_warnings.len()),
        format!("Endpoints found: {}", report.endpoints.len()),
        format!("Handlers skipped: {}", report.failures.len()),
    ]
}
