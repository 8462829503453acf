//! Object kind and executability checks.

use std::fs::{self, FileType};
use std::path::Path;

use acl::{ObjectKind, Target};
use rustix::fs::{Access, AtFlags, CWD, accessat};

use crate::error::MetadataError;

/// Kind of a filesystem object as seen by the ACL tools.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbedKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Anything else, with a short description for notices.
    Other(&'static str),
}

impl ProbedKind {
    /// The ACL object kind, when this kind carries PanFS ACLs.
    #[must_use]
    pub const fn object_kind(self) -> Option<ObjectKind> {
        match self {
            Self::File => Some(ObjectKind::File),
            Self::Directory => Some(ObjectKind::Directory),
            Self::Other(_) => None,
        }
    }

    /// Description used in listings and notices.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Other(description) => description,
        }
    }
}

/// Queries the kind and executable state of objects.
pub trait ObjectProbe {
    /// Kind of the object at `path`. Symbolic links are never followed.
    fn kind_of(&self, path: &Path) -> Result<ProbedKind, MetadataError>;

    /// Whether the effective user may execute `path`.
    fn is_executable(&self, path: &Path) -> bool;

    /// Encoder target for an object of `kind`.
    fn target(&self, path: &Path, kind: ObjectKind) -> Target {
        match kind {
            ObjectKind::Directory => Target::Directory,
            ObjectKind::File => Target::File {
                executable: self.is_executable(path),
            },
        }
    }
}

/// Probe backed by `lstat(2)` and `access(2)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsProbe;

fn classify(file_type: FileType) -> ProbedKind {
    #[cfg(unix)]
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_file() {
        return ProbedKind::File;
    }
    if file_type.is_dir() {
        return ProbedKind::Directory;
    }
    if file_type.is_symlink() {
        return ProbedKind::Other("link");
    }
    #[cfg(unix)]
    {
        if file_type.is_char_device() {
            return ProbedKind::Other("characterSpecial");
        }
        if file_type.is_block_device() {
            return ProbedKind::Other("blockSpecial");
        }
        if file_type.is_fifo() {
            return ProbedKind::Other("fifo");
        }
        if file_type.is_socket() {
            return ProbedKind::Other("socket");
        }
    }
    ProbedKind::Other("unknown")
}

impl ObjectProbe for FsProbe {
    fn kind_of(&self, path: &Path) -> Result<ProbedKind, MetadataError> {
        let metadata = fs::symlink_metadata(path)
            .map_err(|error| MetadataError::new("inspect", path, error))?;
        Ok(classify(metadata.file_type()))
    }

    fn is_executable(&self, path: &Path) -> bool {
        accessat(CWD, path, Access::EXEC_OK, AtFlags::EACCESS).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::{PermissionsExt, symlink};
    use tempfile::tempdir;

    #[test]
    fn classifies_files_directories_and_links() {
        let dir = tempdir().expect("create temp dir");
        let file = dir.path().join("file");
        fs::write(&file, b"data").expect("write file");
        let link = dir.path().join("link");
        symlink(&file, &link).expect("create symlink");

        let probe = FsProbe;
        assert_eq!(probe.kind_of(dir.path()).expect("probe"), ProbedKind::Directory);
        assert_eq!(probe.kind_of(&file).expect("probe"), ProbedKind::File);
        assert_eq!(probe.kind_of(&link).expect("probe"), ProbedKind::Other("link"));
        assert_eq!(ProbedKind::Other("link").object_kind(), None);
    }

    #[test]
    fn missing_path_is_an_error() {
        let dir = tempdir().expect("create temp dir");
        let error = FsProbe
            .kind_of(&dir.path().join("absent"))
            .expect_err("missing");
        assert_eq!(error.context(), "inspect");
    }

    #[test]
    fn executable_bit_selects_target() {
        let dir = tempdir().expect("create temp dir");
        let script = dir.path().join("script");
        fs::write(&script, b"#!/bin/sh\n").expect("write file");

        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");
        assert_eq!(
            FsProbe.target(&script, ObjectKind::File),
            Target::File { executable: true }
        );
        assert_eq!(FsProbe.target(dir.path(), ObjectKind::Directory), Target::Directory);
    }
}
