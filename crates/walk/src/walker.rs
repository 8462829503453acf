use crate::entry::WalkEntry;
use crate::error::WalkError;
use logging::trace_walk;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Depth-first iterator over filesystem entries.
///
/// A directory is yielded before its contents, which are read only when the
/// walker advances past it. A directory that cannot be read produces one
/// error item and traversal continues with its siblings. An unreadable entry
/// inside a readable directory produces one error item and its siblings are
/// still yielded.
pub struct Walker {
    root: Option<WalkEntry>,
    pending: Option<PathBuf>,
    stack: Vec<DirectoryState>,
}

impl Walker {
    pub(crate) fn new(root: PathBuf) -> Result<Self, WalkError> {
        trace_walk!("walking {}", root.display());

        let metadata = fs::symlink_metadata(&root)
            .map_err(|error| WalkError::root_metadata(root.clone(), error))?;
        let file_type = metadata.file_type();

        let pending = file_type.is_dir().then(|| root.clone());
        Ok(Self {
            root: Some(WalkEntry {
                path: root,
                file_type,
            }),
            pending,
            stack: Vec::new(),
        })
    }

    fn open_pending(&mut self) -> Result<(), WalkError> {
        if let Some(path) = self.pending.take() {
            trace_walk!("entering directory {}", path.display());
            let state = DirectoryState::new(path)?;
            self.stack.push(state);
        }
        Ok(())
    }

    fn prepare_entry(&mut self, path: PathBuf) -> Result<WalkEntry, WalkError> {
        let metadata =
            fs::symlink_metadata(&path).map_err(|error| WalkError::metadata(path.clone(), error))?;
        let file_type = metadata.file_type();

        if file_type.is_dir() {
            self.pending = Some(path.clone());
        }

        Ok(WalkEntry { path, file_type })
    }
}

impl Iterator for Walker {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            return Some(Ok(root));
        }

        if let Err(error) = self.open_pending() {
            return Some(Err(error));
        }

        loop {
            let state = self.stack.last_mut()?;
            if let Some(error) = state.failures.pop() {
                return Some(Err(error));
            }
            let Some(name) = state.entries.next() else {
                self.stack.pop();
                continue;
            };

            let path = state.path.join(&name);
            return Some(self.prepare_entry(path));
        }
    }
}

#[derive(Debug)]
struct DirectoryState {
    path: PathBuf,
    entries: std::vec::IntoIter<OsString>,
    failures: Vec<WalkError>,
}

impl DirectoryState {
    fn new(path: PathBuf) -> Result<Self, WalkError> {
        let read_dir =
            fs::read_dir(&path).map_err(|error| WalkError::read_dir(path.clone(), error))?;
        Ok(Self::collect(
            path,
            read_dir.map(|entry| entry.map(|entry| entry.file_name())),
        ))
    }

    /// Sorts the readable names and keeps one error per unreadable entry.
    fn collect<I>(path: PathBuf, names: I) -> Self
    where
        I: IntoIterator<Item = io::Result<OsString>>,
    {
        let mut entries = Vec::new();
        let mut failures = Vec::new();
        for name in names {
            match name {
                Ok(name) => entries.push(name),
                Err(error) => failures.push(WalkError::read_dir_entry(path.clone(), error)),
            }
        }
        entries.sort();
        failures.reverse();

        trace_walk!("found {} entries in {}", entries.len(), path.display());

        Self {
            path,
            entries: entries.into_iter(),
            failures,
        }
    }
}
