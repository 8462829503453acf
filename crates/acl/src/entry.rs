//! crates/acl/src/entry.rs
//!
//! Structured representation of a single native PanFS ACL entry together with
//! the grammar check that parses it and the renderer that writes it back.
//!
//! # Grammar
//!
//! ```text
//! entry       = sense kind ":" identifier "," tokens [ inheritance ]
//! sense       = "+" | "-"
//! kind        = "uid" | "gid"
//! identifier  = 1*( ALPHA / DIGIT )
//! tokens      = 1*( capability )            ; see capability::ALPHABET
//! inheritance = ",I:" *( "O" / "I" / "C" / "N" / "P" / "D" )
//! ```
//!
//! Primary (owner/group/other) entries carry a trailing `*`. They are reported
//! as [`EntryParseError::Primary`] so callers can leave them untouched.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::capability::{Capability, CapabilitySet};

const INHERITANCE_PREFIX: &str = ",I:";
const INHERITANCE_FLAGS: &str = "OICNPD";
const PRIMARY_MARKER: char = '*';

/// Identifier reserved for superuser entries, which are never shown or edited.
pub const SUPERUSER_ID: &str = "0";

/// Whether an entry grants or denies its capabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sense {
    /// `+` entries.
    Allow,
    /// `-` entries.
    Deny,
}

impl Sense {
    /// Marker character used in native entries.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Allow => '+',
            Self::Deny => '-',
        }
    }

    /// Word used in decoded listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
        }
    }

    const fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '+' => Some(Self::Allow),
            '-' => Some(Self::Deny),
            _ => None,
        }
    }
}

/// Type of principal an entry applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrincipalKind {
    /// A named user (`uid`).
    User,
    /// A named group (`gid`).
    Group,
}

impl PrincipalKind {
    /// Prefix used in native entries.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::User => "uid",
            Self::Group => "gid",
        }
    }

    /// Word used in decoded listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inheritance suffix attached to directory entries.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Inheritance {
    flags: String,
}

impl Inheritance {
    /// Flags emitted when a new entry should be inherited by both new files
    /// and new subdirectories.
    pub const OBJECT_AND_CONTAINER: &'static str = "OICI";

    /// Builds an inheritance suffix from raw flag characters.
    ///
    /// Returns `None` when `flags` contains a character outside `OICNPD`.
    #[must_use]
    pub fn new(flags: &str) -> Option<Self> {
        flags
            .chars()
            .all(|flag| INHERITANCE_FLAGS.contains(flag))
            .then(|| Self {
                flags: flags.to_owned(),
            })
    }

    /// The suffix that makes new files and subdirectories inherit an entry.
    #[must_use]
    pub fn object_and_container() -> Self {
        Self {
            flags: Self::OBJECT_AND_CONTAINER.to_owned(),
        }
    }

    /// Raw flag characters following `,I:`.
    #[must_use]
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Entry is inherited by files created below the directory.
    #[must_use]
    pub fn to_files(&self) -> bool {
        self.flags.starts_with("OI")
    }

    /// Entry is inherited by directories created below the directory.
    #[must_use]
    pub fn to_directories(&self) -> bool {
        let rest = self.flags.strip_prefix("OI").unwrap_or(&self.flags);
        rest.starts_with("CI")
    }
}

/// A well-formed, non-primary native ACL entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AclEntry {
    sense: Sense,
    kind: PrincipalKind,
    identifier: String,
    tokens: Vec<Capability>,
    inheritance: Option<Inheritance>,
}

impl AclEntry {
    /// Assembles an entry from its parts.
    ///
    /// Returns `None` when `tokens` is empty or when `identifier` is not a
    /// non-empty alphanumeric string, since such entries cannot be written in
    /// the native syntax.
    #[must_use]
    pub fn new(
        sense: Sense,
        kind: PrincipalKind,
        identifier: impl Into<String>,
        tokens: Vec<Capability>,
        inheritance: Option<Inheritance>,
    ) -> Option<Self> {
        let identifier = identifier.into();
        if tokens.is_empty() || !is_identifier(&identifier) {
            return None;
        }
        Some(Self {
            sense,
            kind,
            identifier,
            tokens,
            inheritance,
        })
    }

    /// Parses a raw entry using the native grammar.
    pub fn parse(raw: &str) -> Result<Self, EntryParseError> {
        if let Some(body) = raw.strip_suffix(PRIMARY_MARKER) {
            return match parse_body(body) {
                Ok(_) => Err(EntryParseError::Primary),
                Err(error) => Err(error),
            };
        }
        parse_body(raw)
    }

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

    /// Identifier as stored (numeric id, or occasionally a name).
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Capabilities in the order they appear in the raw entry.
    #[must_use]
    pub fn tokens(&self) -> &[Capability] {
        &self.tokens
    }

    /// Capabilities as a set.
    #[must_use]
    pub fn capabilities(&self) -> CapabilitySet {
        self.tokens.iter().copied().collect()
    }

    /// Optional inheritance suffix.
    #[must_use]
    pub fn inheritance(&self) -> Option<&Inheritance> {
        self.inheritance.as_ref()
    }

    /// Entry belongs to the superuser and must be left alone.
    #[must_use]
    pub fn is_superuser(&self) -> bool {
        self.identifier == SUPERUSER_ID
    }

    /// Renders the entry in native syntax.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AclEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{},",
            self.sense.marker(),
            self.kind.prefix(),
            self.identifier
        )?;
        for token in &self.tokens {
            write!(f, "{token}")?;
        }
        if let Some(inheritance) = &self.inheritance {
            write!(f, "{INHERITANCE_PREFIX}{}", inheritance.flags)?;
        }
        Ok(())
    }
}

impl FromStr for AclEntry {
    type Err = EntryParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

/// Reasons a raw entry is not accepted by [`AclEntry::parse`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EntryParseError {
    /// The first character is neither `+` nor `-`.
    #[error("entry does not start with an allow or deny marker")]
    Sense,
    /// The principal prefix is neither `uid:` nor `gid:`.
    #[error("entry does not name a uid or gid")]
    Principal,
    /// The identifier is empty or contains non-alphanumeric characters.
    #[error("entry identifier is not alphanumeric")]
    Identifier,
    /// The capability string is empty or contains unknown characters.
    #[error("entry capability string is empty or contains unknown tokens")]
    Tokens,
    /// The inheritance suffix contains unknown flags.
    #[error("entry inheritance suffix contains unknown flags")]
    Inheritance,
    /// The entry is an owner/group/other entry marked with `*`.
    #[error("entry is a primary owner/group/other entry")]
    Primary,
}

fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|ch| ch.is_ascii_alphanumeric())
}

fn parse_body(raw: &str) -> Result<AclEntry, EntryParseError> {
    let mut chars = raw.chars();
    let sense = chars
        .next()
        .and_then(Sense::from_marker)
        .ok_or(EntryParseError::Sense)?;
    let rest = chars.as_str();

    let (kind, rest) = if let Some(rest) = rest.strip_prefix("uid:") {
        (PrincipalKind::User, rest)
    } else if let Some(rest) = rest.strip_prefix("gid:") {
        (PrincipalKind::Group, rest)
    } else {
        return Err(EntryParseError::Principal);
    };

    let (identifier, rest) = rest
        .split_once(',')
        .ok_or(EntryParseError::Identifier)?;
    if !is_identifier(identifier) {
        return Err(EntryParseError::Identifier);
    }

    let (token_text, inheritance) = match rest.find(INHERITANCE_PREFIX) {
        Some(index) => {
            let flags = &rest[index + INHERITANCE_PREFIX.len()..];
            let inheritance = Inheritance::new(flags).ok_or(EntryParseError::Inheritance)?;
            (&rest[..index], Some(inheritance))
        }
        None => (rest, None),
    };

    let tokens = token_text
        .chars()
        .map(Capability::from_char)
        .collect::<Option<Vec<_>>>()
        .ok_or(EntryParseError::Tokens)?;
    if tokens.is_empty() {
        return Err(EntryParseError::Tokens);
    }

    Ok(AclEntry {
        sense,
        kind,
        identifier: identifier.to_owned(),
        tokens,
        inheritance,
    })
}
