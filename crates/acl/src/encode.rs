//! crates/acl/src/encode.rs
//!
//! Translation from a simplified `rwxX` request to native entries.
//!
//! A single request produces three candidate entries because the correct
//! token string depends on the object it is applied to: plain files,
//! executable files and directories each receive their own variant. The
//! reconciliation engine picks the variant once it knows the object.

use crate::capability::{Capability, DIR_WRITE, EXECUTE, FILE_READ, FILE_WRITE, TRAVERSE};
use crate::entry::{AclEntry, Inheritance, PrincipalKind, Sense};

/// Permission letters requested by the user.
///
/// `execute_conditional` is the `X` letter: execute on directories and on
/// files that are already executable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PermissionRequest {
    /// `r`
    pub read: bool,
    /// `w`
    pub write: bool,
    /// `x`
    pub execute: bool,
    /// `X`
    pub execute_conditional: bool,
}

impl PermissionRequest {
    /// Parses a string made of `r`, `w`, `x` and `X` characters.
    ///
    /// Returns `None` for an empty string or any other character. Repeated
    /// letters are accepted.
    #[must_use]
    pub fn parse(letters: &str) -> Option<Self> {
        if letters.is_empty() {
            return None;
        }
        let mut request = Self::default();
        for letter in letters.chars() {
            match letter {
                'r' => request.read = true,
                'w' => request.write = true,
                'x' => request.execute = true,
                'X' => request.execute_conditional = true,
                _ => return None,
            }
        }
        Some(request)
    }

    /// Letters in canonical `rwxX` order.
    #[must_use]
    pub fn letters(self) -> String {
        [
            (self.read, 'r'),
            (self.write, 'w'),
            (self.execute, 'x'),
            (self.execute_conditional, 'X'),
        ]
        .into_iter()
        .filter_map(|(set, letter)| set.then_some(letter))
        .collect()
    }
}

/// One `-m` request with its identifier already resolved to numeric form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModifyRequest {
    /// Allow or deny.
    pub sense: Sense,
    /// User or group.
    pub kind: PrincipalKind,
    /// Numeric identifier.
    pub identifier: String,
    /// Requested permissions.
    pub perms: PermissionRequest,
}

/// The object an encoded bundle is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// A regular file, executable or not for the effective user.
    File {
        /// `access(X_OK)` succeeded.
        executable: bool,
    },
    /// A directory.
    Directory,
}

/// The three native variants produced for one request.
///
/// A variant is `None` when the request maps to no tokens for that object,
/// for example `X` alone on a non-executable file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedBundle {
    file: Option<AclEntry>,
    exec_file: Option<AclEntry>,
    directory: Option<AclEntry>,
}

impl EncodedBundle {
    /// Variant for a non-executable file.
    #[must_use]
    pub fn file(&self) -> Option<&AclEntry> {
        self.file.as_ref()
    }

    /// Variant for an executable file.
    #[must_use]
    pub fn exec_file(&self) -> Option<&AclEntry> {
        self.exec_file.as_ref()
    }

    /// Variant for a directory.
    #[must_use]
    pub fn directory(&self) -> Option<&AclEntry> {
        self.directory.as_ref()
    }

    /// Picks the variant that applies to `target`.
    #[must_use]
    pub fn select(&self, target: Target) -> Option<&AclEntry> {
        match target {
            Target::File { executable: false } => self.file(),
            Target::File { executable: true } => self.exec_file(),
            Target::Directory => self.directory(),
        }
    }
}

struct TokenBuffer(Vec<Capability>);

impl TokenBuffer {
    fn push(&mut self, capability: Capability) {
        if !self.0.contains(&capability) {
            self.0.push(capability);
        }
    }

    fn extend(&mut self, capabilities: &[Capability]) {
        for capability in capabilities {
            self.push(*capability);
        }
    }
}

/// Encodes `request` into its file, executable-file and directory variants.
///
/// When `inherit` is set the directory variant carries the `,I:OICI` suffix
/// so new files and subdirectories pick the entry up.
#[must_use]
pub fn encode(request: &ModifyRequest, inherit: bool) -> EncodedBundle {
    let perms = request.perms;

    let mut base = TokenBuffer(Vec::new());
    if perms.read {
        base.extend(&FILE_READ);
    }
    if perms.write {
        base.extend(&FILE_WRITE);
    }

    let mut directory = TokenBuffer(base.0.clone());
    if perms.read || perms.execute || perms.execute_conditional {
        directory.push(TRAVERSE);
    }
    if perms.write {
        directory.extend(&DIR_WRITE);
    }

    let mut file = TokenBuffer(base.0);
    if perms.execute {
        file.push(EXECUTE);
    }

    let mut exec_file = TokenBuffer(file.0.clone());
    if perms.execute || perms.execute_conditional {
        exec_file.push(EXECUTE);
    }

    let build = |tokens: TokenBuffer, inheritance: Option<Inheritance>| {
        AclEntry::new(
            request.sense,
            request.kind,
            request.identifier.clone(),
            tokens.0,
            inheritance,
        )
    };

    EncodedBundle {
        file: build(file, None),
        exec_file: build(exec_file, None),
        directory: build(
            directory,
            inherit.then(Inheritance::object_and_container),
        ),
    }
}
