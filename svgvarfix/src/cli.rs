use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.svgvarfix.toml):
  Looked up from the SVG file's directory upwards.

  [svgvarfix]
  extension = \"svg\"      # Expected file extension (case-insensitive)
  hint = \"...\"           # Message printed after a complete fix
  show_hint = true       # Set to false to silence the message

EXIT CODES:
  0  fixed, or nothing to fix
  1  usage error, missing file or unexpected failure
  2  wrong file extension
  4  partial fix (some variables could not be replaced)
";

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output the outcome as JSON.
    #[arg(long)]
    pub json: bool,

    /// Log debug diagnostics to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command line interface configuration using `clap`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "svgvarfix - Replace CSS variables in exported SVGs with their fallback values",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// SVG file to fix in place.
    pub path: PathBuf,

    /// Report what would change without writing the file.
    #[arg(long)]
    pub dry_run: bool,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,
}
