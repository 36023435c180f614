//! Shared constants: file names, defaults and exit codes.

/// Configuration file looked up from the target file's directory upwards.
pub const CONFIG_FILENAME: &str = ".svgvarfix.toml";

/// Expected extension of input files, compared case-insensitively.
pub const DEFAULT_EXTENSION: &str = "svg";

/// Appended to the file name to build the temporary sibling used for atomic writes.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Opening of a variable reference, up to the start of its name.
pub const VAR_OPEN: &str = "var(--";

/// Marker of a nested, unresolved reference inside a fallback.
pub const NESTED_VAR_MARKER: &str = "var(";

/// Follow-up printed after a complete fix.
pub const DEFAULT_HINT: &str = "Hot Restart your Flutter app (not just hot reload)";

/// Success, including files that were already clean.
pub const EXIT_SUCCESS: i32 = 0;
/// Usage error, missing file or unexpected failure.
pub const EXIT_FAILURE: i32 = 1;
/// File does not carry the expected extension.
pub const EXIT_INVALID_FORMAT: i32 = 2;
/// Some references could not be replaced.
pub const EXIT_PARTIAL: i32 = 4;
