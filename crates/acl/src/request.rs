//! crates/acl/src/request.rs
//!
//! Parsing of the user-facing ACL syntax accepted by `setpanfsacl`.
//!
//! ```text
//! modify = [ "+" | "-" ] [ kind ":" ] name ":" perms
//! remove = [ kind ":" ] name
//! kind   = "u" | "user" | "g" | "group"
//! perms  = 1*( "r" / "w" / "x" / "X" )
//! ```
//!
//! A missing kind means a user. Names are resolved to numeric identifiers by
//! the caller before the request reaches the encoder.

use thiserror::Error;

use crate::encode::PermissionRequest;
use crate::entry::{PrincipalKind, SUPERUSER_ID, Sense};

/// A user or group as named on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrincipalRef {
    /// User or group.
    pub kind: PrincipalKind,
    /// Name or numeric identifier as typed.
    pub name: String,
}

/// A parsed `-m/--modify` argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModifySpec {
    /// Allow (default) or deny.
    pub sense: Sense,
    /// Principal the entry applies to.
    pub principal: PrincipalRef,
    /// Requested permissions.
    pub perms: PermissionRequest,
}

/// Errors raised while interpreting ACL arguments.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// A `-m` argument does not follow the modify syntax.
    #[error("{0} is not a valid ACL, (try --help)")]
    InvalidModify(String),
    /// A `-x` argument does not follow the remove syntax.
    #[error("{0}: acl to be removed must be of the form [u[ser]:]uid or g[roup]:gid")]
    InvalidRemove(String),
    /// The request targets the superuser, whose entries are never edited.
    #[error("refusing to modify superuser {kind} entry '{name}'")]
    Superuser {
        /// User or group.
        kind: PrincipalKind,
        /// Name as given on the command line.
        name: String,
    },
}

fn parse_kind(text: &str) -> Option<PrincipalKind> {
    match text {
        "u" | "user" => Some(PrincipalKind::User),
        "g" | "group" => Some(PrincipalKind::Group),
        _ => None,
    }
}

fn is_name(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphanumeric())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'))
}

fn parse_principal(parts: &[&str]) -> Option<PrincipalRef> {
    let (kind, name) = match parts {
        [name] => (PrincipalKind::User, *name),
        [kind, name] => (parse_kind(kind)?, *name),
        _ => return None,
    };
    is_name(name).then(|| PrincipalRef {
        kind,
        name: name.to_owned(),
    })
}

/// Parses one `-m/--modify` argument.
pub fn parse_modify(arg: &str) -> Result<ModifySpec, RequestError> {
    let invalid = || RequestError::InvalidModify(arg.to_owned());

    let (sense, body) = match arg.chars().next() {
        Some('+') => (Sense::Allow, &arg[1..]),
        Some('-') => (Sense::Deny, &arg[1..]),
        _ => (Sense::Allow, arg),
    };

    let parts: Vec<&str> = body.split(':').collect();
    let (perms, principal) = parts.split_last().ok_or_else(invalid)?;
    let perms = PermissionRequest::parse(perms).ok_or_else(invalid)?;
    let principal = parse_principal(principal).ok_or_else(invalid)?;

    Ok(ModifySpec {
        sense,
        principal,
        perms,
    })
}

/// Parses one `-x/--remove` argument.
pub fn parse_remove(arg: &str) -> Result<PrincipalRef, RequestError> {
    let parts: Vec<&str> = arg.split(':').collect();
    parse_principal(&parts).ok_or_else(|| RequestError::InvalidRemove(arg.to_owned()))
}

/// Rejects a resolved identifier that belongs to the superuser.
pub fn ensure_not_superuser(
    principal: &PrincipalRef,
    identifier: &str,
) -> Result<(), RequestError> {
    if identifier == SUPERUSER_ID {
        return Err(RequestError::Superuser {
            kind: principal.kind,
            name: principal.name.clone(),
        });
    }
    Ok(())
}
