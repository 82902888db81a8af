#![deny(missing_docs)]

//! # Generate Command
//!
//! Loads an OpenAPI document, derives its types and renders them.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::ValueEnum;
use oas_typegen_core::{
    emit_all, generate_from_file, CollisionPolicy, FailurePolicy, GenerationReport,
    GeneratorConfig, JsonEmitter, NestedObjects, RustEmitter, DEFAULT_STATUS_CODES,
};

use crate::error::{CliError, CliResult};

/// Output formats.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// serde-enabled Rust structs.
    Rust,
    /// A JSON array of type descriptions.
    Json,
}

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long, env = "OAS_TYPEGEN_INPUT")]
    pub input: PathBuf,

    /// Output file. Writes to stdout when omitted.
    #[clap(long, env = "OAS_TYPEGEN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[clap(long, value_enum, default_value = "rust", env = "OAS_TYPEGEN_FORMAT")]
    pub format: OutputFormat,

    /// Status codes to generate responses for. Repeatable; defaults to 200, 400, 401, 500.
    #[clap(long = "status", env = "OAS_TYPEGEN_STATUS", value_delimiter = ',')]
    pub status: Vec<u16>,

    /// Skip failing operations instead of aborting the run.
    #[clap(long, env = "OAS_TYPEGEN_CONTINUE_ON_ERROR")]
    pub continue_on_error: bool,

    /// Lift nested object properties into dotted fields.
    #[clap(long, env = "OAS_TYPEGEN_FLATTEN_NESTED")]
    pub flatten_nested: bool,

    /// Fail on conflicting type names instead of renaming.
    #[clap(long, env = "OAS_TYPEGEN_STRICT_NAMES")]
    pub strict_names: bool,
}

impl GenerateArgs {
    /// Builds the generator configuration from the flags.
    pub fn config(&self) -> GeneratorConfig {
        let codes = if self.status.is_empty() {
            DEFAULT_STATUS_CODES.to_vec()
        } else {
            self.status.clone()
        };

        let mut config = GeneratorConfig::default().with_status_codes(codes);
        if self.continue_on_error {
            config = config.with_failure_policy(FailurePolicy::Continue);
        }
        if self.flatten_nested {
            config = config.with_nested_objects(NestedObjects::Flatten);
        }
        if self.strict_names {
            config = config.with_collision_policy(CollisionPolicy::Reject);
        }
        config
    }
}

/// Executes the generation.
///
/// Diagnostics are logged by the generator as they occur; only their count is
/// repeated here. Output is written even when some
/// operations failed under `--continue-on-error`; the run then still reports
/// an error so the exit status is non-zero.
pub fn execute(args: &GenerateArgs) -> CliResult<()> {
    if !args.input.exists() {
        return Err(CliError::General(format!(
            "OpenAPI file not found: {:?}",
            args.input
        )));
    }

    let report = generate_from_file(&args.input, &args.config())?;

    if !report.diagnostics.is_empty() {
        tracing::warn!(count = report.diagnostics.len(), "schema diagnostics recorded");
    }

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = io::BufWriter::new(fs::File::create(path)?);
            render(&report, args.format, file)?;
            tracing::info!(types = report.types.len(), output = %path.display(), "types written");
        }
        None => render(&report, args.format, io::stdout().lock())?,
    }

    if report.is_complete() {
        Ok(())
    } else {
        Err(CliError::Incomplete(report.failures.len()))
    }
}

fn render(report: &GenerationReport, format: OutputFormat, out: impl Write) -> CliResult<()> {
    match format {
        OutputFormat::Rust => emit_all(&report.types, &mut RustEmitter::new(out))?,
        OutputFormat::Json => emit_all(&report.types, &mut JsonEmitter::new(out))?,
    }
    Ok(())
}
