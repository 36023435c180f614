//! In-place rewriting infrastructure.
//!
//! - [`ByteRangeRewriter`] applies byte-range edits to a document.
//! - [`write_atomically`] swaps the rewritten document into place through a
//!   temporary sibling guarded by [`TempFileGuard`].

mod atomic;
mod rewriter;

pub use atomic::{temp_path_for, write_atomically, TempFileGuard};
pub use rewriter::{ByteRangeRewriter, Edit, RewriteError};
