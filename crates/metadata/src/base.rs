//! Owner, group and mode header shown ahead of PanFS entries.

use std::fmt::Write as _;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use acl::PrincipalKind;

use crate::error::MetadataError;
use crate::identity::IdentityResolver;

/// Base POSIX ownership and permission bits of an object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasePermissions {
    path: PathBuf,
    owner: String,
    group: String,
    mode: u32,
}

fn triplet(bits: u32) -> String {
    [(0o4, 'r'), (0o2, 'w'), (0o1, 'x')]
        .into_iter()
        .map(|(mask, letter)| if bits & mask != 0 { letter } else { '-' })
        .collect()
}

impl BasePermissions {
    /// Builds the header data from already known values.
    #[must_use]
    pub fn new(path: &Path, owner: impl Into<String>, group: impl Into<String>, mode: u32) -> Self {
        Self {
            path: path.to_path_buf(),
            owner: owner.into(),
            group: group.into(),
            mode,
        }
    }

    /// Reads ownership and mode of `path` without following symlinks.
    ///
    /// Unknown owners and groups are shown by number.
    pub fn read<R>(path: &Path, resolver: &R) -> Result<Self, MetadataError>
    where
        R: IdentityResolver + ?Sized,
    {
        let metadata = fs::symlink_metadata(path)
            .map_err(|error| MetadataError::new("inspect", path, error))?;
        let owner = resolver
            .name_of(PrincipalKind::User, metadata.uid())
            .unwrap_or_else(|| metadata.uid().to_string());
        let group = resolver
            .name_of(PrincipalKind::Group, metadata.gid())
            .unwrap_or_else(|| metadata.gid().to_string());
        Ok(Self::new(path, owner, group, metadata.mode()))
    }

    /// Renders the header in `getfacl` layout, ending with a blank line.
    #[must_use]
    pub fn render(&self) -> String {
        let shown = self.path.to_string_lossy();
        let shown = match shown.trim_start_matches('/') {
            "" => shown.as_ref(),
            relative => relative,
        };
        let mut text = String::new();
        let _ = writeln!(text, "# file: {shown}");
        let _ = writeln!(text, "# owner: {}", self.owner);
        let _ = writeln!(text, "# group: {}", self.group);
        let _ = writeln!(text, "user::{}", triplet(self.mode >> 6));
        let _ = writeln!(text, "group::{}", triplet(self.mode >> 3));
        let _ = writeln!(text, "other::{}", triplet(self.mode));
        text.push('\n');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticResolver;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    #[test]
    fn renders_getfacl_layout() {
        let base = BasePermissions::new(Path::new("/panfs/proj/data"), "alice", "eng", 0o100_750);
        assert_eq!(
            base.render(),
            "# file: panfs/proj/data\n# owner: alice\n# group: eng\nuser::rwx\ngroup::r-x\nother::---\n\n"
        );
    }

    #[test]
    fn root_path_is_kept() {
        let base = BasePermissions::new(Path::new("/"), "root", "root", 0o040_755);
        assert!(base.render().starts_with("# file: /\n"));
    }

    #[test]
    fn unknown_owner_falls_back_to_number() {
        let dir = tempdir().expect("create temp dir");
        let file = dir.path().join("file");
        fs::write(&file, b"data").expect("write file");
        fs::set_permissions(&file, fs::Permissions::from_mode(0o640)).expect("chmod");

        let metadata = fs::metadata(&file).expect("stat");
        let base = BasePermissions::read(&file, &StaticResolver::new()).expect("read");
        let rendered = base.render();
        assert!(rendered.contains(&format!("# owner: {}\n", metadata.uid())));
        assert!(rendered.contains(&format!("# group: {}\n", metadata.gid())));
        assert!(rendered.contains("user::rw-\ngroup::r--\nother::---\n"));
    }
}
