//! Translation between user/group names and numeric identifiers.

use std::collections::BTreeMap;

use acl::PrincipalKind;
use logging::trace_ident;
use thiserror::Error;

/// Failure to translate an identifier. Both variants abort the run.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// A numeric identifier has no name in the user or group database.
    #[error("Problem looking up string id for {identifier}")]
    UnknownId {
        /// User or group.
        kind: PrincipalKind,
        /// The identifier that failed to resolve.
        identifier: String,
    },
    /// A name is not present in the user or group database.
    #[error("Problem looking up numeric id for {name}")]
    UnknownName {
        /// User or group.
        kind: PrincipalKind,
        /// The name that failed to resolve.
        name: String,
    },
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}

/// Name service lookups used by the command-line tools.
pub trait IdentityResolver {
    /// Name for a numeric identifier, or `None` when unknown.
    fn name_of(&self, kind: PrincipalKind, id: u32) -> Option<String>;

    /// Numeric identifier for a name, or `None` when unknown.
    fn id_of(&self, kind: PrincipalKind, name: &str) -> Option<u32>;

    /// Name to display for an identifier stored in an entry.
    ///
    /// Identifiers containing a letter are already names and are returned
    /// unchanged.
    fn resolve_name(&self, kind: PrincipalKind, identifier: &str) -> Result<String, IdentityError> {
        if identifier.bytes().any(|byte| byte.is_ascii_alphabetic()) {
            return Ok(identifier.to_owned());
        }
        let name = identifier
            .parse::<u32>()
            .ok()
            .and_then(|id| self.name_of(kind, id))
            .ok_or_else(|| IdentityError::UnknownId {
                kind,
                identifier: identifier.to_owned(),
            })?;
        trace_ident!("{kind} {identifier} is {name}");
        Ok(name)
    }

    /// Numeric identifier, as text, for a name given on the command line.
    ///
    /// All-digit names are taken to be identifiers already.
    fn resolve_id(&self, kind: PrincipalKind, name: &str) -> Result<String, IdentityError> {
        if is_numeric(name) {
            return Ok(name.to_owned());
        }
        let id = self
            .id_of(kind, name)
            .ok_or_else(|| IdentityError::UnknownName {
                kind,
                name: name.to_owned(),
            })?;
        trace_ident!("{kind} {name} is {id}");
        Ok(id.to_string())
    }
}

impl<R: IdentityResolver + ?Sized> IdentityResolver for &R {
    fn name_of(&self, kind: PrincipalKind, id: u32) -> Option<String> {
        (**self).name_of(kind, id)
    }

    fn id_of(&self, kind: PrincipalKind, name: &str) -> Option<u32> {
        (**self).id_of(kind, name)
    }
}

/// Resolver backed by the system user and group databases (NSS).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemResolver;

impl IdentityResolver for SystemResolver {
    fn name_of(&self, kind: PrincipalKind, id: u32) -> Option<String> {
        match kind {
            PrincipalKind::User => uzers::get_user_by_uid(id)
                .map(|user| user.name().to_string_lossy().into_owned()),
            PrincipalKind::Group => uzers::get_group_by_gid(id)
                .map(|group| group.name().to_string_lossy().into_owned()),
        }
        .filter(|name| !name.is_empty())
    }

    fn id_of(&self, kind: PrincipalKind, name: &str) -> Option<u32> {
        match kind {
            PrincipalKind::User => uzers::get_user_by_name(name).map(|user| user.uid()),
            PrincipalKind::Group => uzers::get_group_by_name(name).map(|group| group.gid()),
        }
    }
}

/// Fixed lookup table, used by tests and for offline rendering.
#[derive(Clone, Debug, Default)]
pub struct StaticResolver {
    users: BTreeMap<u32, String>,
    groups: BTreeMap<u32, String>,
}

impl StaticResolver {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user.
    #[must_use]
    pub fn with_user(mut self, uid: u32, name: impl Into<String>) -> Self {
        self.users.insert(uid, name.into());
        self
    }

    /// Adds a group.
    #[must_use]
    pub fn with_group(mut self, gid: u32, name: impl Into<String>) -> Self {
        self.groups.insert(gid, name.into());
        self
    }

    fn table(&self, kind: PrincipalKind) -> &BTreeMap<u32, String> {
        match kind {
            PrincipalKind::User => &self.users,
            PrincipalKind::Group => &self.groups,
        }
    }
}

impl IdentityResolver for StaticResolver {
    fn name_of(&self, kind: PrincipalKind, id: u32) -> Option<String> {
        self.table(kind).get(&id).cloned()
    }

    fn id_of(&self, kind: PrincipalKind, name: &str) -> Option<u32> {
        self.table(kind)
            .iter()
            .find_map(|(id, known)| (known == name).then_some(*id))
    }
}
