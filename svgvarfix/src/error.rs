//! Error types for the variable rewriter.

use std::io;
use std::path::PathBuf;

use crate::constants::{EXIT_FAILURE, EXIT_INVALID_FORMAT};
use crate::fix::RewriteError;

/// Errors raised by [`scan_and_rewrite`](crate::rewrite::scan_and_rewrite).
///
/// Partial replacement is not an error; it is reported through
/// [`RewriteOutcome`](crate::rewrite::RewriteOutcome).
#[derive(Debug, thiserror::Error)]
pub enum FixError {
    /// The target path does not exist or is not a regular file.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The target exists but does not carry the expected extension.
    #[error("File does not have the .{expected} extension: {}", .path.display())]
    InvalidFormat {
        /// Offending path
        path: PathBuf,
        /// Extension that was expected, without the leading dot
        expected: String,
    },

    /// The document could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A step of the atomic write failed. The original file is untouched.
    #[error("failed to {action} for {}: {source}", .path.display())]
    Write {
        /// File being replaced
        path: PathBuf,
        /// Step that failed
        action: &'static str,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Edits produced by the scanner could not be applied.
    #[error("internal rewrite failure: {0}")]
    Rewrite(#[from] RewriteError),
}

impl FixError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidFormat { .. } => EXIT_INVALID_FORMAT,
            Self::NotFound(_) | Self::Read { .. } | Self::Write { .. } | Self::Rewrite(_) => {
                EXIT_FAILURE
            }
        }
    }

    /// Whether the failure happened before the file was touched.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidFormat { .. })
    }
}
