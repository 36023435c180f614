//! Core library for svgvarfix.
//!
//! Design tools export SVGs whose colors are CSS custom properties with a
//! fallback, e.g. `fill="var(--fill-0, #FBC343)"`. Some renderers do not
//! understand `var()`, so this crate rewrites each reference to its fallback
//! value and replaces the file atomically.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module defining the command-line interface arguments.
pub mod cli;

/// Module for loading `.svgvarfix.toml` configuration.
pub mod config;

/// Module containing shared constants and exit codes.
pub mod constants;

/// Module defining the entry point logic shared by the binaries.
pub mod entry_point;

/// Module defining the error taxonomy.
pub mod error;

/// Module containing the byte-range rewriter and the atomic file writer.
pub mod fix;

/// Module for installing the `tracing` subscriber.
pub mod logging;

/// Module for colored status lines and JSON reports.
pub mod output;

/// Module replacing references with their fallbacks.
pub mod rewrite;

/// Module scanning documents for `var(--name, fallback)` references.
pub mod scanner;

pub use error::FixError;
pub use rewrite::{scan_and_rewrite, scan_and_rewrite_with, FixOptions, RewriteOutcome};
