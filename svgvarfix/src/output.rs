//! Status lines and JSON reports for the command line.

use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::error::FixError;
use crate::rewrite::{RewriteOutcome, SkippedReference};

/// JSON form of a [`RewriteOutcome`].
#[derive(Debug, Serialize)]
pub struct FixReport<'a> {
    /// File that was processed
    pub file: String,
    /// References found
    pub found: usize,
    /// References replaced
    pub replaced: usize,
    /// References left in the file
    pub remaining: usize,
    /// Whether the file was rewritten on disk
    pub written: bool,
    /// Whether this was a dry run
    pub dry_run: bool,
    /// Details of every skipped reference
    pub skipped: &'a [SkippedReference],
}

impl<'a> FixReport<'a> {
    /// Build a report for `path`.
    pub fn new(path: &Path, outcome: &'a RewriteOutcome, dry_run: bool) -> Self {
        Self {
            file: path.display().to_string(),
            found: outcome.found,
            replaced: outcome.replaced,
            remaining: outcome.remaining(),
            written: outcome.written,
            dry_run,
            skipped: &outcome.skipped,
        }
    }
}

/// Print the report as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn print_json(writer: &mut impl Write, report: &FixReport<'_>) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)
}

fn print_counts(writer: &mut impl Write, outcome: &RewriteOutcome) -> std::io::Result<()> {
    writeln!(writer, "   CSS variables found: {}", outcome.found)?;
    writeln!(writer, "   CSS variables replaced: {}", outcome.replaced)?;
    let remaining = outcome.remaining();
    let remaining = if remaining == 0 {
        remaining.to_string().green()
    } else {
        remaining.to_string().red().bold()
    };
    writeln!(writer, "   Remaining CSS variables: {remaining}")
}

/// Print the human-readable status for a processed file.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_outcome(
    writer: &mut impl Write,
    path: &Path,
    outcome: &RewriteOutcome,
    dry_run: bool,
    hint: Option<&str>,
) -> std::io::Result<()> {
    let shown = path.display();

    if outcome.is_clean() {
        writeln!(
            writer,
            "{} {}",
            "[OK] No CSS variables found in".green(),
            shown
        )?;
        writeln!(writer, "     File is already compatible with flutter_svg.")?;
        return Ok(());
    }

    let headline = match (dry_run, outcome.is_complete()) {
        (true, true) => "[DRY-RUN] Would fix SVG:".yellow(),
        (true, false) => "[DRY-RUN] Would partially fix:".yellow(),
        (false, true) => "[OK] Fixed SVG:".green(),
        (false, false) => "[WARN] Partial fix:".yellow().bold(),
    };
    writeln!(writer, "{headline} {shown}")?;
    print_counts(writer, outcome)?;

    if !outcome.is_complete() {
        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            "Some CSS variables could not be replaced.".yellow()
        )?;
        writeln!(
            writer,
            "   Please check the file manually or report this edge case."
        )?;
    } else if let (false, Some(hint)) = (dry_run, hint) {
        writeln!(writer)?;
        writeln!(writer, "{} {hint}", "Next step:".cyan().bold())?;
    }
    Ok(())
}

/// Print an error together with a hint on how to recover.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_error(
    writer: &mut impl Write,
    error: &FixError,
    path: &Path,
) -> std::io::Result<()> {
    match error {
        FixError::NotFound(_) => {
            writeln!(writer, "{} {error}", "Error:".red().bold())?;
            writeln!(writer)?;
            writeln!(writer, "Tip: Run this command from the project root:")?;
            writeln!(writer, "   svgvarfix {}", path.display())?;
        }
        FixError::InvalidFormat { expected, .. } => {
            writeln!(writer, "{} {error}", "Error:".red().bold())?;
            writeln!(writer)?;
            writeln!(writer, "Expected file extension: .{expected}")?;
        }
        FixError::Read { .. } | FixError::Write { .. } => {
            writeln!(writer, "{} {error}", "Error:".red().bold())?;
        }
        FixError::Rewrite(_) => {
            writeln!(writer, "{} {error}", "Unexpected error:".red().bold())?;
        }
    }
    Ok(())
}
