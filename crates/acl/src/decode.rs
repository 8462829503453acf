//! crates/acl/src/decode.rs
//!
//! Translation from native entries to the simplified `rwx` vocabulary.
//!
//! Each composite permission is reported when all of its capabilities are
//! present. When more than one (but not all) of a multi-capability family is
//! present the letter is still shown, flagged as partial, and the missing
//! capabilities are listed so the user can see exactly what is absent. A
//! single overlapping capability is not enough to report the permission.

use std::fmt::Write as _;

use logging::trace_acl;

use crate::capability::{Capability, EXECUTE, ObjectKind, Permission, rule};
use crate::entry::{AclEntry, EntryParseError, PrincipalKind, Sense};
use crate::list::AclList;

/// How much of a composite permission an entry grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grant {
    /// Every required capability is present.
    Full,
    /// More than one, but not every, required capability is present.
    Partial,
}

/// Inheritance targets shown for directory entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InheritanceNote {
    /// Inherited by new files.
    pub files: bool,
    /// Inherited by new subdirectories.
    pub directories: bool,
}

/// Simplified view of one native entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedEntry {
    sense: Sense,
    kind: PrincipalKind,
    identifier: String,
    read: Option<Grant>,
    write: Option<Grant>,
    execute: bool,
    missing: Vec<Capability>,
    inheritance: Option<InheritanceNote>,
}

impl DecodedEntry {
    /// Allow or deny.
    #[must_use]
    pub const fn sense(&self) -> Sense {
        self.sense
    }

    /// User or group.
    #[must_use]
    pub const fn kind(&self) -> PrincipalKind {
        self.kind
    }

    /// Identifier as stored in the entry.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Grant level for `permission`, if reported at all.
    #[must_use]
    pub const fn grant(&self, permission: Permission) -> Option<Grant> {
        match permission {
            Permission::Read => self.read,
            Permission::Write => self.write,
        }
    }

    /// Execute (or traverse) capability is present.
    #[must_use]
    pub const fn execute(&self) -> bool {
        self.execute
    }

    /// At least one reported permission is incomplete.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.read == Some(Grant::Partial) || self.write == Some(Grant::Partial)
    }

    /// Capabilities missing from partially granted permissions.
    #[must_use]
    pub fn missing(&self) -> &[Capability] {
        &self.missing
    }

    /// Inheritance targets, for directory entries that carry a suffix.
    #[must_use]
    pub const fn inheritance(&self) -> Option<InheritanceNote> {
        self.inheritance
    }

    /// Permission letters, for example `rx` or `rw`.
    #[must_use]
    pub fn permissions(&self) -> String {
        let mut letters = String::new();
        if self.read.is_some() {
            letters.push(Permission::Read.letter());
        }
        if self.write.is_some() {
            letters.push(Permission::Write.letter());
        }
        if self.execute {
            letters.push('x');
        }
        letters
    }

    /// Renders the listing line using `name` for the principal.
    #[must_use]
    pub fn render(&self, name: &str) -> String {
        let mut line = format!(
            "{}:{}:{}:{}",
            self.sense.label(),
            self.kind.label(),
            name,
            self.permissions()
        );
        if let Some(note) = self.inheritance {
            let targets: Vec<&str> = [
                note.files.then_some("files"),
                note.directories.then_some("directories"),
            ]
            .into_iter()
            .flatten()
            .collect();
            let _ = write!(line, " inherited_to: {}", targets.join(" "));
        }
        if self.is_partial() {
            let missing: String = self.missing.iter().map(|token| token.as_char()).collect();
            let _ = write!(line, " (PARTIAL; missing {missing})");
        }
        line
    }

    const fn display_rank(&self) -> (u8, u8) {
        let sense = match self.sense {
            Sense::Deny => 0,
            Sense::Allow => 1,
        };
        let kind = match self.kind {
            PrincipalKind::User => 0,
            PrincipalKind::Group => 1,
        };
        (sense, kind)
    }
}

/// Decodes one entry as it applies to an object of `kind`.
#[must_use]
pub fn decode_entry(entry: &AclEntry, kind: ObjectKind) -> DecodedEntry {
    let granted = entry.capabilities();
    let mut missing = Vec::new();
    let mut grants = [None, None];

    for (slot, permission) in grants.iter_mut().zip(Permission::ALL) {
        let rule = rule(kind, permission);
        let matched = rule.matched(granted);
        if matched == rule.required_count() {
            *slot = Some(Grant::Full);
        } else if rule.required_count() > 1 && matched > 1 {
            *slot = Some(Grant::Partial);
            missing.extend(rule.missing(granted));
        }
    }

    let inheritance = match (kind, entry.inheritance()) {
        (ObjectKind::Directory, Some(inheritance)) => Some(InheritanceNote {
            files: inheritance.to_files(),
            directories: inheritance.to_directories(),
        }),
        _ => None,
    };

    let [read, write] = grants;
    DecodedEntry {
        sense: entry.sense(),
        kind: entry.kind(),
        identifier: entry.identifier().to_owned(),
        read,
        write,
        execute: granted.contains(EXECUTE),
        missing,
        inheritance,
    }
}

/// Decodes every displayable entry of `list` in listing order.
///
/// Primary, superuser and malformed entries are skipped. The result is
/// ordered deny before allow and, within the same sense, user before group;
/// entries that tie keep their store order.
#[must_use]
pub fn decode_list(list: &AclList, kind: ObjectKind) -> Vec<DecodedEntry> {
    let mut decoded: Vec<DecodedEntry> = list
        .entries()
        .iter()
        .filter_map(|raw| match AclEntry::parse(raw) {
            Ok(entry) if entry.is_superuser() => None,
            Ok(entry) => Some(decode_entry(&entry, kind)),
            Err(EntryParseError::Primary) => None,
            Err(error) => {
                trace_acl!("skipping entry {raw:?}: {error}");
                None
            }
        })
        .collect();
    decoded.sort_by_key(DecodedEntry::display_rank);
    decoded
}
