//! Filesystem access used by the stylesheet pipeline.
//!
//! The pipeline only needs two things from the disk: whether a sibling
//! source exists, and a truncating write for cached artifacts.

use std::fs;
use std::io;
use std::path::Path;

/// Filesystem operations the handler depends on.
pub trait Filesystem: Send + Sync {
    /// Returns true if `path` names an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Create or truncate `path` and write `contents` to it.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The real disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}
