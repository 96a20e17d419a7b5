//! model-errors-gen: Generate Rust error types from a service model's errors
//!
//! Reads an error model file (one declared error name per line), selects a
//! generation target and writes a Rust module containing the error enum,
//! its option set of identifiers, and the decode routine.
//!
//! Usage:
//!   model-errors-gen example.errors -o src/example_error.rs
//!   model-errors-gen example.errors --param target=rust-validating,option_set=none

use clap::Parser;
use model_errors_codegen::{available_targets, generate_model_errors_file, parse_params};
use std::path::PathBuf;

mod model_file;

#[derive(Parser, Debug)]
#[command(name = "model-errors-gen")]
#[command(about = "Generate Rust error types from service model error names")]
struct Args {
    /// Error model file, one error name per line
    #[arg(required = true)]
    input: PathBuf,

    /// Output Rust file path
    #[arg(short, long, default_value = "model_errors.rs")]
    output: PathBuf,

    /// Base name for generated types (defaults to the input file stem)
    #[arg(short, long)]
    base_name: Option<String>,

    /// Target parameters, e.g. target=rust,option_set=custom:error_kit:RecoverableError
    #[arg(short, long, default_value = "")]
    param: String,

    /// List the built-in targets and exit
    #[arg(long)]
    list_targets: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list_targets {
        for target in available_targets() {
            println!("{}", target);
        }
        return Ok(());
    }

    let config = parse_params(&args.param)?;
    let delegate = config.resolve()?;

    let model = model_file::load_model(&args.input, args.base_name.as_deref())?;
    if model.error_names.is_empty() {
        tracing::warn!(input = %args.input.display(), "model declares no errors");
    }

    let code = generate_model_errors_file(delegate.as_ref(), &model, &config.unknown_error_name)
        .inspect_err(|e| tracing::error!("generation failed: {}", e))?;

    std::fs::write(&args.output, code)?;

    tracing::info!(
        output = %args.output.display(),
        target_name = delegate.name(),
        "generated {} with {} error types",
        model.error_type_name(),
        model.error_names.len()
    );

    Ok(())
}
