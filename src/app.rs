//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the form and derived features
//! - queries the predictor (or the synthetic stand-in)
//! - prints reports
//! - writes optional debug bundles

use clap::Parser;

use crate::cli::{AssessArgs, Command};
use crate::error::AppError;

pub mod pipeline;

use pipeline::AssessConfig;

/// Entry point for the `radar` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `radar` and `radar --offline` to behave like `radar assess ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Assess(args) => handle_assess(args),
        Command::Derive(args) => handle_derive(args),
        Command::Params => handle_params(),
    }
}

fn handle_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = assess_config_from_args(&args)?;
    let outcome = pipeline::run_assess(&config)?;

    println!(
        "{}",
        crate::report::format_assessment(
            &outcome.adapted,
            outcome.band,
            outcome.transport_error.as_deref(),
        )
    );

    if args.debug_bundle {
        let path = crate::debug::write_debug_bundle(&outcome, &config)?;
        println!("Debug bundle written to {}", path.display());
    }

    Ok(())
}

fn handle_derive(args: AssessArgs) -> Result<(), AppError> {
    let config = assess_config_from_args(&args)?;
    let (_, _, derived) = pipeline::prepare_features(&config)?;

    println!("{}", crate::report::format_features(&derived));
    Ok(())
}

fn handle_params() -> Result<(), AppError> {
    let specs = crate::params::catalog()?;
    println!("{}", crate::report::format_params(&specs));
    Ok(())
}

pub fn assess_config_from_args(args: &AssessArgs) -> Result<AssessConfig, AppError> {
    Ok(AssessConfig {
        offline: args.offline,
        use_template: args.template,
        overrides: crate::cli::parse_overrides(&args.set)?,
        base_url: args.url.clone(),
        timeout_secs: args.timeout_secs,
        samples: args.samples,
        seed: args.seed,
    })
}

/// Rewrite argv so `radar` defaults to `radar assess`.
///
/// Rules:
/// - `radar`                       -> `radar assess`
/// - `radar --offline ...`         -> `radar assess --offline ...`
/// - `radar --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("assess".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "assess" | "derive" | "params");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "assess flags".
    if arg1.starts_with('-') {
        argv.insert(1, "assess".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
