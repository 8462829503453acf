use std::fs::FileType;
use std::path::{Path, PathBuf};

/// Result of a filesystem traversal step.
#[derive(Debug)]
pub struct WalkEntry {
    pub(crate) path: PathBuf,
    pub(crate) file_type: FileType,
}

impl WalkEntry {
    /// Returns the path of the entry: the root as given, joined with the
    /// path below it.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File type captured with `lstat`, so symlinks report as symlinks.
    #[must_use]
    pub const fn file_type(&self) -> FileType {
        self.file_type
    }
}
