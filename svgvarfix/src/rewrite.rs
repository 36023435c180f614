//! Replacement of variable references with their fallback values.
//!
//! [`rewrite_document`] does the in-memory work; [`scan_and_rewrite`] wraps
//! it with path validation and the atomic write.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::constants::{DEFAULT_EXTENSION, NESTED_VAR_MARKER};
use crate::error::FixError;
use crate::fix::{write_atomically, ByteRangeRewriter, Edit};
use crate::scanner::{count_references, find_references, VarReference};

/// Why a reference was left in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Fallback is empty or whitespace.
    EmptyFallback,
    /// Fallback contains another `var(` reference.
    NestedReference,
}

impl SkipReason {
    /// Human-readable description.
    pub fn describe(self) -> &'static str {
        match self {
            Self::EmptyFallback => "empty fallback",
            Self::NestedReference => "fallback contains a nested var() reference",
        }
    }
}

/// A reference that was not replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedReference {
    /// Character offset of the reference in the original document
    pub offset: usize,
    /// 1-based line of the reference
    pub line: usize,
    /// Matched text, preserved verbatim in the output
    pub raw: String,
    /// Trimmed fallback
    pub fallback: String,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Result of rewriting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewriteOutcome {
    /// References in the original document
    pub found: usize,
    /// References substituted with their fallback
    pub replaced: usize,
    /// References left untouched
    pub skipped: Vec<SkippedReference>,
    /// Whether the file on disk was replaced
    pub written: bool,
}

impl RewriteOutcome {
    /// References still present after the rewrite.
    pub fn remaining(&self) -> usize {
        self.found - self.replaced
    }

    /// No references were found at all.
    pub fn is_clean(&self) -> bool {
        self.found == 0
    }

    /// Every reference was replaced.
    pub fn is_complete(&self) -> bool {
        self.replaced == self.found
    }
}

/// Options for [`scan_and_rewrite_with`].
#[derive(Debug, Clone)]
pub struct FixOptions {
    /// Expected file extension, without the dot
    pub extension: String,
    /// Compute the outcome without writing the file
    pub dry_run: bool,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_owned(),
            dry_run: false,
        }
    }
}

fn skip_reason(fallback: &str) -> Option<SkipReason> {
    if fallback.is_empty() {
        Some(SkipReason::EmptyFallback)
    } else if fallback.contains(NESTED_VAR_MARKER) {
        Some(SkipReason::NestedReference)
    } else {
        None
    }
}

/// Tracks character offsets and line numbers while walking forward through a document.
struct Locator<'a> {
    document: &'a str,
    byte: usize,
    chars: usize,
    line: usize,
}

impl<'a> Locator<'a> {
    fn new(document: &'a str) -> Self {
        Self {
            document,
            byte: 0,
            chars: 0,
            line: 1,
        }
    }

    /// Character offset and line of `byte`, which must not precede the last query.
    fn locate(&mut self, byte: usize) -> (usize, usize) {
        let span = &self.document[self.byte..byte];
        self.chars += span.chars().count();
        self.line += span.matches('\n').count();
        self.byte = byte;
        (self.chars, self.line)
    }
}

fn skipped(
    reference: &VarReference<'_>,
    reason: SkipReason,
    locator: &mut Locator<'_>,
) -> SkippedReference {
    let (offset, line) = locator.locate(reference.start);
    SkippedReference {
        offset,
        line,
        raw: reference.raw.to_owned(),
        fallback: reference.fallback.to_owned(),
        reason,
    }
}

/// Replace every safe reference in `document` with its fallback.
///
/// Returns the rewritten text and the counts; `written` is always `false`.
pub fn rewrite_document(document: &str) -> Result<(String, RewriteOutcome), FixError> {
    let mut rewriter = ByteRangeRewriter::new(document);
    let mut locator = Locator::new(document);
    let mut outcome = RewriteOutcome::default();

    for reference in find_references(document) {
        outcome.found += 1;
        match skip_reason(reference.fallback) {
            Some(reason) => outcome.skipped.push(skipped(&reference, reason, &mut locator)),
            None => rewriter.add_edit(Edit::with_description(
                reference.start,
                reference.end,
                reference.fallback,
                reference.name,
            )),
        }
    }

    if outcome.found == 0 {
        return Ok((document.to_owned(), outcome));
    }

    let rewritten = rewriter.apply()?;
    let remaining = count_references(&rewritten);
    outcome.replaced = outcome.found.saturating_sub(remaining);
    Ok((rewritten, outcome))
}

/// Check that `path` is a regular file carrying `extension`, before anything
/// is read.
pub fn validate_path(path: &Path, extension: &str) -> Result<(), FixError> {
    if !path.is_file() {
        return Err(FixError::NotFound(path.to_path_buf()));
    }
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
    if !matches {
        return Err(FixError::InvalidFormat {
            path: path.to_path_buf(),
            expected: extension.to_owned(),
        });
    }
    Ok(())
}

/// Rewrite the SVG file at `path` in place with default options.
///
/// Returns the counts; a partial replacement is a successful outcome.
///
/// # Errors
///
/// [`FixError::NotFound`] and [`FixError::InvalidFormat`] are raised before
/// the file is read. I/O failures during the write are propagated after the
/// temporary file has been removed.
pub fn scan_and_rewrite(path: &Path) -> Result<RewriteOutcome, FixError> {
    scan_and_rewrite_with(path, &FixOptions::default())
}

/// Rewrite the file at `path` in place.
pub fn scan_and_rewrite_with(
    path: &Path,
    options: &FixOptions,
) -> Result<RewriteOutcome, FixError> {
    validate_path(path, &options.extension)?;

    let document = fs::read_to_string(path).map_err(|source| FixError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (rewritten, mut outcome) = rewrite_document(&document)?;
    tracing::debug!(
        path = %path.display(),
        found = outcome.found,
        replaced = outcome.replaced,
        "scanned document"
    );

    if outcome.found > 0 && !options.dry_run {
        write_atomically(path, &rewritten)?;
        outcome.written = true;
    }

    Ok(outcome)
}
