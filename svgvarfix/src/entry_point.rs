use crate::cli::Cli;
use crate::config::Config;
use crate::constants::{EXIT_FAILURE, EXIT_PARTIAL, EXIT_SUCCESS};
use crate::output::{self, FixReport};
use crate::rewrite::{scan_and_rewrite_with, RewriteOutcome};
use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::Path;

/// Runs the tool with the given arguments, writing status lines to stdout.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run the tool with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
/// Errors and their hints go to stderr, diagnostics through `tracing`.
///
/// # Errors
///
/// Returns an error if writing the output fails.
pub fn run_with_args_to<W: Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["svgvarfix".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(EXIT_SUCCESS);
            }
            _ => {
                eprint!("{e}");
                return Ok(EXIT_FAILURE);
            }
        },
    };

    crate::logging::init(cli.output.verbose);

    let config = Config::load_from_path(&cli.path);
    if let Some(config_path) = &config.config_file_path {
        tracing::debug!(path = %config_path.display(), "loaded configuration");
    }
    let options = config.svgvarfix.fix_options(cli.dry_run);

    let outcome = match scan_and_rewrite_with(&cli.path, &options) {
        Ok(outcome) => outcome,
        Err(err) => {
            if !err.is_validation() {
                tracing::error!(path = %cli.path.display(), error = %err, "fix failed");
            }
            output::print_error(&mut std::io::stderr(), &err, &cli.path)?;
            return Ok(err.exit_code());
        }
    };

    report_skipped(&cli.path, &outcome);

    if cli.output.json {
        output::print_json(writer, &FixReport::new(&cli.path, &outcome, cli.dry_run))?;
    } else {
        output::print_outcome(
            writer,
            &cli.path,
            &outcome,
            cli.dry_run,
            config.svgvarfix.hint(),
        )?;
    }
    writer.flush()?;

    Ok(exit_code(&outcome))
}

/// Emit one warning per reference that was left in place.
fn report_skipped(path: &Path, outcome: &RewriteOutcome) {
    for skipped in &outcome.skipped {
        tracing::warn!(
            path = %path.display(),
            offset = skipped.offset,
            line = skipped.line,
            raw = %skipped.raw,
            fallback = %skipped.fallback,
            "skipped CSS variable: {}",
            skipped.reason.describe()
        );
    }
}

/// Exit code for a successful call.
pub fn exit_code(outcome: &RewriteOutcome) -> i32 {
    if outcome.is_complete() {
        EXIT_SUCCESS
    } else {
        EXIT_PARTIAL
    }
}
