//! Atomic file replacement through a temporary sibling.
//!
//! The new content is written to `<file name>.tmp` next to the target and
//! renamed over it, so the target is either fully replaced or left untouched.
//! [`TempFileGuard`] removes the temporary file on every exit path.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::constants::TEMP_SUFFIX;
use crate::error::FixError;

/// Path of the temporary sibling used when replacing `target`.
pub fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map_or_else(OsString::new, std::ffi::OsStr::to_os_string);
    name.push(TEMP_SUFFIX);
    target.with_file_name(name)
}

/// Owns a freshly created temporary file and deletes it when dropped.
#[derive(Debug)]
pub struct TempFileGuard {
    path: PathBuf,
    file: Option<File>,
}

impl TempFileGuard {
    /// Create `path`, removing any stale leftover first.
    pub fn create(path: PathBuf) -> io::Result<Self> {
        match fs::remove_file(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed stale temporary file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        Ok(Self {
            path,
            file: Some(file),
        })
    }

    /// Location of the temporary file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `contents` and flush them to disk.
    pub fn write_all(&mut self, contents: &[u8]) -> io::Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::other("temporary file already closed"))?;
        file.write_all(contents)?;
        file.sync_all()
    }

    /// Close the file and rename it over `target`.
    pub fn persist(mut self, target: &Path) -> io::Result<()> {
        drop(self.file.take());
        fs::rename(&self.path, target)
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        drop(self.file.take());
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed temporary file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove temporary file"
            ),
        }
    }
}

/// Replace the content of `target` with `contents` atomically.
///
/// Permissions of the existing target are carried over to the new file.
pub fn write_atomically(target: &Path, contents: &str) -> Result<(), FixError> {
    let fail = |action: &'static str| {
        move |source: io::Error| {
            tracing::warn!(
                path = %target.display(),
                error = %source,
                "failed to {action}"
            );
            FixError::Write {
                path: target.to_path_buf(),
                action,
                source,
            }
        }
    };

    let permissions = fs::metadata(target).ok().map(|meta| meta.permissions());

    let mut guard =
        TempFileGuard::create(temp_path_for(target)).map_err(fail("create the temporary file"))?;
    guard
        .write_all(contents.as_bytes())
        .map_err(fail("write the temporary file"))?;
    if let Some(permissions) = permissions {
        fs::set_permissions(guard.path(), permissions)
            .map_err(fail("copy permissions to the temporary file"))?;
    }
    guard
        .persist(target)
        .map_err(fail("replace the original"))?;

    tracing::debug!(path = %target.display(), bytes = contents.len(), "file replaced");
    Ok(())
}
