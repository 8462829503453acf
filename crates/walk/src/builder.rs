use crate::error::WalkError;
use crate::walker::Walker;
use std::path::PathBuf;

/// Configures a filesystem traversal rooted at a specific path.
///
/// Symbolic links are reported but never followed, so a recursive ACL change
/// cannot escape the tree it was pointed at.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    root: PathBuf,
}

impl WalkBuilder {
    /// Creates a new builder that will traverse the provided root path.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Builds a [`Walker`] that yields the root followed by its descendants.
    pub fn build(self) -> Result<Walker, WalkError> {
        Walker::new(self.root)
    }
}
