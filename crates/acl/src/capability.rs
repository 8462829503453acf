//! crates/acl/src/capability.rs
//!
//! Native PanFS capability tokens and the table that maps them onto the
//! simplified read/write vocabulary.
//!
//! A PanFS ACL entry grants a string of single-character capabilities. Several
//! characters jointly make up what a user thinks of as "read" or "write", and
//! the set differs between files and directories. The [`rule`] table captures
//! that mapping so both the decoder and the encoder work from the same data.

use std::fmt;

/// Every capability character accepted in a native entry.
///
/// The position of a character in this string is its bit index inside a
/// [`CapabilitySet`].
pub const ALPHABET: &str = "rwxacdkposCnNDRWPShH";

const fn position(symbol: u8) -> Option<u8> {
    let bytes = ALPHABET.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == symbol {
            return Some(index as u8);
        }
        index += 1;
    }
    None
}

const fn token(symbol: u8) -> Capability {
    match position(symbol) {
        Some(index) => Capability(index),
        None => panic!("capability symbol is not part of the PanFS alphabet"),
    }
}

/// A single native capability character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Capability(u8);

impl Capability {
    /// Looks up the capability for `symbol`, returning `None` when the
    /// character is outside [`ALPHABET`].
    #[must_use]
    pub fn from_char(symbol: char) -> Option<Self> {
        u8::try_from(symbol).ok().and_then(position).map(Self)
    }

    /// Returns the character used for this capability in native entries.
    #[must_use]
    pub fn as_char(self) -> char {
        char::from(ALPHABET.as_bytes()[usize::from(self.0)])
    }

    const fn bit(self) -> u32 {
        1 << self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Capabilities that make up "read" on a file.
pub const FILE_READ: [Capability; 5] = [
    token(b'r'),
    token(b'n'),
    token(b'k'),
    token(b'R'),
    token(b'P'),
];

/// Capabilities that make up "write" on a file.
pub const FILE_WRITE: [Capability; 5] = [
    token(b'w'),
    token(b'a'),
    token(b'd'),
    token(b'N'),
    token(b'W'),
];

/// Capability that lets a principal traverse (search) a directory.
pub const TRAVERSE: Capability = token(b'x');

/// Capability that lets a principal execute a file.
pub const EXECUTE: Capability = token(b'x');

/// Capabilities the encoder adds to a directory entry when write is requested.
pub const DIR_WRITE: [Capability; 3] = [token(b'c'), token(b'C'), token(b'D')];

/// Additional capability checked alongside [`DIR_WRITE`] when decoding.
pub const DIR_WRITE_EXTRA: Capability = token(b'W');

const DIR_READ_REQUIRED: [Capability; 6] = [
    FILE_READ[0],
    FILE_READ[1],
    FILE_READ[2],
    FILE_READ[3],
    FILE_READ[4],
    TRAVERSE,
];

const DIR_WRITE_REQUIRED: [Capability; 4] =
    [DIR_WRITE[0], DIR_WRITE[1], DIR_WRITE[2], DIR_WRITE_EXTRA];

/// Compact set of capabilities backed by a bitmask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet(u32);

impl CapabilitySet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Adds `capability` to the set, returning `true` if it was not present.
    pub fn insert(&mut self, capability: Capability) -> bool {
        let added = !self.contains(capability);
        self.0 |= capability.bit();
        added
    }

    /// Reports whether `capability` is in the set.
    #[must_use]
    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    /// Number of capabilities in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` when the set holds no capabilities.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Capabilities present in both sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut set = Self::new();
        for capability in iter {
            set.insert(capability);
        }
        set
    }
}

/// Object kinds that carry PanFS ACLs this tool understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
}

impl ObjectKind {
    /// Human-readable name used in listings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic permissions that map onto composite capability families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Read access.
    Read,
    /// Write access.
    Write,
}

impl Permission {
    /// Both composite permissions, in display order.
    pub const ALL: [Self; 2] = [Self::Read, Self::Write];

    /// Letter used for this permission in the simplified vocabulary.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Read => 'r',
            Self::Write => 'w',
        }
    }
}

/// Capabilities required for one permission on one object kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapabilityRule {
    required: &'static [Capability],
}

impl CapabilityRule {
    /// The capabilities that together grant the permission, in table order.
    #[must_use]
    pub const fn required(&self) -> &'static [Capability] {
        self.required
    }

    /// Number of capabilities needed for the permission to count as full.
    #[must_use]
    pub const fn required_count(&self) -> usize {
        self.required.len()
    }

    /// How many of the required capabilities are present in `granted`.
    #[must_use]
    pub fn matched(&self, granted: CapabilitySet) -> usize {
        self.required_set().intersection(granted).len()
    }

    /// Required capabilities absent from `granted`, in table order.
    #[must_use]
    pub fn missing(&self, granted: CapabilitySet) -> Vec<Capability> {
        self.required
            .iter()
            .copied()
            .filter(|capability| !granted.contains(*capability))
            .collect()
    }

    fn required_set(&self) -> CapabilitySet {
        self.required.iter().copied().collect()
    }
}

/// Returns the rule describing `permission` on an object of `kind`.
#[must_use]
pub const fn rule(kind: ObjectKind, permission: Permission) -> CapabilityRule {
    let required: &'static [Capability] = match (kind, permission) {
        (ObjectKind::File, Permission::Read) => &FILE_READ,
        (ObjectKind::File, Permission::Write) => &FILE_WRITE,
        (ObjectKind::Directory, Permission::Read) => &DIR_READ_REQUIRED,
        (ObjectKind::Directory, Permission::Write) => &DIR_WRITE_REQUIRED,
    };
    CapabilityRule { required }
}
