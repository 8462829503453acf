//! Persistence of the PanFS ACL attribute.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

use acl::AclList;
use logging::trace_store;

use crate::error::MetadataError;

/// Extended attribute holding PanFS supplementary ACL entries.
pub const DEFAULT_ATTRIBUTE: &str = "user.panfs.acl";

/// Environment variable overriding [`DEFAULT_ATTRIBUTE`].
pub const ATTRIBUTE_ENV: &str = "PANFSACL_XATTR";

/// Reads and writes the entry list of a filesystem object.
pub trait AclStore {
    /// Reads the current list. A missing attribute is an error.
    fn read_entries(&self, path: &Path) -> Result<AclList, MetadataError>;

    /// Replaces the stored list in a single call.
    fn write_entries(&self, path: &Path, list: &AclList) -> Result<(), MetadataError>;
}

fn missing_attribute() -> io::Error {
    io::Error::from_raw_os_error(libc::ENODATA)
}

/// Store backed by an extended attribute on the object itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XattrStore {
    name: OsString,
}

impl XattrStore {
    /// Uses the attribute called `name`.
    pub fn new(name: impl Into<OsString>) -> Self {
        Self { name: name.into() }
    }

    /// Uses [`ATTRIBUTE_ENV`] when set and non-empty, else [`DEFAULT_ATTRIBUTE`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_override(env::var_os(ATTRIBUTE_ENV))
    }

    /// Same as [`XattrStore::from_env`] with the variable value supplied.
    #[must_use]
    pub fn from_override(value: Option<OsString>) -> Self {
        match value {
            Some(name) if !name.is_empty() => Self::new(name),
            _ => Self::default(),
        }
    }

    /// Attribute name in use.
    #[must_use]
    pub fn attribute(&self) -> &OsStr {
        &self.name
    }
}

impl Default for XattrStore {
    fn default() -> Self {
        Self::new(DEFAULT_ATTRIBUTE)
    }
}

impl AclStore for XattrStore {
    fn read_entries(&self, path: &Path) -> Result<AclList, MetadataError> {
        let value = xattr::get(path, &self.name)
            .map_err(|error| MetadataError::new("read PanFS ACL", path, error))?
            .ok_or_else(|| MetadataError::new("read PanFS ACL", path, missing_attribute()))?;
        let text = String::from_utf8_lossy(&value);
        trace_store!("read {}: {text}", path.display());
        Ok(AclList::parse_value(&text))
    }

    fn write_entries(&self, path: &Path, list: &AclList) -> Result<(), MetadataError> {
        let value = list.to_value();
        trace_store!("write {}: {value}", path.display());
        xattr::set(path, &self.name, value.as_bytes())
            .map_err(|error| MetadataError::new("write PanFS ACL", path, error))
    }
}

/// In-process store used by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<PathBuf, String>>,
    read_only: RefCell<BTreeSet<PathBuf>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the raw attribute value for `path`.
    pub fn insert(&self, path: impl Into<PathBuf>, value: impl Into<String>) {
        self.values.borrow_mut().insert(path.into(), value.into());
    }

    /// Makes writes to `path` fail with `EACCES`.
    pub fn deny_writes(&self, path: impl Into<PathBuf>) {
        self.read_only.borrow_mut().insert(path.into());
    }

    /// Raw attribute value currently held for `path`.
    #[must_use]
    pub fn value(&self, path: &Path) -> Option<String> {
        self.values.borrow().get(path).cloned()
    }

    /// Number of successful writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl AclStore for MemoryStore {
    fn read_entries(&self, path: &Path) -> Result<AclList, MetadataError> {
        self.values
            .borrow()
            .get(path)
            .map(|value| AclList::parse_value(value))
            .ok_or_else(|| MetadataError::new("read PanFS ACL", path, missing_attribute()))
    }

    fn write_entries(&self, path: &Path, list: &AclList) -> Result<(), MetadataError> {
        if self.read_only.borrow().contains(path) {
            return Err(MetadataError::new(
                "write PanFS ACL",
                path,
                io::Error::from_raw_os_error(libc::EACCES),
            ));
        }
        self.values
            .borrow_mut()
            .insert(path.to_path_buf(), list.to_value());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

impl<S: AclStore + ?Sized> AclStore for &S {
    fn read_entries(&self, path: &Path) -> Result<AclList, MetadataError> {
        (**self).read_entries(path)
    }

    fn write_entries(&self, path: &Path, list: &AclList) -> Result<(), MetadataError> {
        (**self).write_entries(path, list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn xattrs_supported(path: &Path) -> bool {
        let test_name = OsStr::new("user.test_support");
        match xattr::set(path, test_name, b"test") {
            Ok(()) => {
                let _ = xattr::remove(path, test_name);
                true
            }
            Err(_) => false,
        }
    }

    #[test]
    fn override_falls_back_when_empty() {
        assert_eq!(
            XattrStore::from_override(None).attribute(),
            OsStr::new(DEFAULT_ATTRIBUTE)
        );
        assert_eq!(
            XattrStore::from_override(Some(OsString::new())).attribute(),
            OsStr::new(DEFAULT_ATTRIBUTE)
        );
        assert_eq!(
            XattrStore::from_override(Some(OsString::from("user.test.acl"))).attribute(),
            OsStr::new("user.test.acl")
        );
    }

    #[test]
    fn memory_store_round_trips_lists() {
        let store = MemoryStore::new();
        let path = Path::new("/panfs/a");
        store.insert(path, "hdr +uid:1,rnkRP");

        let mut list = store.read_entries(path).expect("read");
        assert_eq!(list.preamble(), Some("hdr"));
        list.remove_where(|_| true);
        store.write_entries(path, &list).expect("write");

        assert_eq!(store.value(path).as_deref(), Some("hdr"));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn memory_store_reports_missing_attribute() {
        let store = MemoryStore::new();
        let error = store
            .read_entries(Path::new("/panfs/missing"))
            .expect_err("missing");
        assert_eq!(error.source_error().raw_os_error(), Some(libc::ENODATA));
        assert_eq!(error.context(), "read PanFS ACL");
    }

    #[test]
    fn memory_store_denied_writes_fail() {
        let store = MemoryStore::new();
        let path = Path::new("/panfs/ro");
        store.insert(path, "hdr");
        store.deny_writes(path);
        let list = store.read_entries(path).expect("read");
        assert!(store.write_entries(path, &list).is_err());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn xattr_store_round_trips_value() {
        let dir = tempdir().expect("create temp dir");
        let file = dir.path().join("data");
        fs::write(&file, b"payload").expect("write file");

        if !xattrs_supported(&file) {
            eprintln!("xattrs not supported, skipping test");
            return;
        }

        let store = XattrStore::new("user.panfsacl.test");
        assert!(store.read_entries(&file).is_err());

        let list = AclList::parse_value("7 +uid:1001,rnkRP -gid:5,wadNW");
        store.write_entries(&file, &list).expect("write attr");
        assert_eq!(store.read_entries(&file).expect("read attr"), list);
    }
}
