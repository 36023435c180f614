//! Byte-range document rewriter.
//!
//! Collects replacement edits keyed by byte offsets into the original
//! document and applies them in one pass, leaving every byte outside the
//! edited ranges untouched.
//!
//! # Usage
//!
//! ```
//! use svgvarfix::fix::{ByteRangeRewriter, Edit};
//!
//! let source = r#"<rect fill="var(--fill-0, red)"/>"#;
//! let mut rewriter = ByteRangeRewriter::new(source);
//! rewriter.add_edit(Edit::new(12, 30, "red"));
//! let fixed = rewriter.apply().expect("should apply");
//! assert_eq!(fixed, r#"<rect fill="red"/>"#);
//! ```

/// A single replacement of `start_byte..end_byte` in the original document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Replacement content
    pub replacement: String,
    /// Optional label used in debug logs
    pub description: Option<String>,
}

impl Edit {
    /// Create a new edit
    #[must_use]
    pub fn new(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
            description: None,
        }
    }

    /// Create an edit with a label
    #[must_use]
    pub fn with_description(
        start_byte: usize,
        end_byte: usize,
        replacement: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::new(start_byte, end_byte, replacement)
        }
    }

    /// Check if this edit overlaps with another
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }
}

/// Error raised when a set of edits cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// Two edits touch the same bytes.
    #[error("overlapping edits at bytes {first_start}..{first_end} and {second_start}..{second_end}")]
    OverlappingEdits {
        /// Range of the edit that starts first
        first_start: usize,
        /// End of the edit that starts first
        first_end: usize,
        /// Start of the conflicting edit
        second_start: usize,
        /// End of the conflicting edit
        second_end: usize,
    },
    /// Edit ends past the document or starts after it ends.
    #[error("edit {start_byte}..{end_byte} out of bounds for document of {source_len} bytes")]
    OutOfBounds {
        /// Start byte of the edit
        start_byte: usize,
        /// End byte of the edit
        end_byte: usize,
        /// Length of the source
        source_len: usize,
    },
    /// Edit boundary falls inside a multi-byte character.
    #[error("edit boundary {offset} is not on a UTF-8 character boundary")]
    NotCharBoundary {
        /// Offending byte offset
        offset: usize,
    },
}

/// Applies byte-range edits to a document.
///
/// Edits are applied from the end of the document towards the start so the
/// offsets of the remaining edits stay valid.
#[derive(Debug, Clone)]
pub struct ByteRangeRewriter {
    source: String,
    edits: Vec<Edit>,
}

impl ByteRangeRewriter {
    /// Create a new rewriter for the given source
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            edits: Vec::new(),
        }
    }

    /// Add an edit to the pending list
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Validate edits without applying them
    ///
    /// # Errors
    /// Returns error if an edit is out of bounds, splits a character, or
    /// overlaps another edit.
    pub fn validate(&self) -> Result<(), RewriteError> {
        let source_len = self.source.len();
        for edit in &self.edits {
            if edit.end_byte > source_len || edit.start_byte > edit.end_byte {
                return Err(RewriteError::OutOfBounds {
                    start_byte: edit.start_byte,
                    end_byte: edit.end_byte,
                    source_len,
                });
            }
            for offset in [edit.start_byte, edit.end_byte] {
                if !self.source.is_char_boundary(offset) {
                    return Err(RewriteError::NotCharBoundary { offset });
                }
            }
        }

        let mut ordered: Vec<&Edit> = self.edits.iter().collect();
        ordered.sort_by_key(|edit| (edit.start_byte, edit.end_byte));
        for pair in ordered.windows(2) {
            if pair[0].overlaps(pair[1]) {
                return Err(RewriteError::OverlappingEdits {
                    first_start: pair[0].start_byte,
                    first_end: pair[0].end_byte,
                    second_start: pair[1].start_byte,
                    second_end: pair[1].end_byte,
                });
            }
        }

        Ok(())
    }

    /// Apply all edits and return the modified document.
    ///
    /// # Errors
    /// Returns error if the edits fail [`validate`](Self::validate).
    pub fn apply(self) -> Result<String, RewriteError> {
        self.validate()?;

        let mut result = self.source;
        let mut sorted_edits = self.edits;
        sorted_edits.sort_by(|a, b| b.start_byte.cmp(&a.start_byte));

        for edit in sorted_edits {
            if let Some(label) = &edit.description {
                tracing::trace!(
                    start = edit.start_byte,
                    end = edit.end_byte,
                    "applying edit for {label}"
                );
            }
            result.replace_range(edit.start_byte..edit.end_byte, &edit.replacement);
        }

        Ok(result)
    }
}
