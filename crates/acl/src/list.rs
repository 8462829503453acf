//! crates/acl/src/list.rs
//!
//! The ordered list of raw entries stored in the PanFS ACL attribute.

use std::fmt;

use crate::entry::{AclEntry, EntryParseError};

/// Raw entry list for one filesystem object.
///
/// The attribute value is a whitespace separated sequence. When its first
/// token is not an ACL entry it is a preamble, carried through unchanged so a
/// reconciled list can be written back verbatim. The remaining tokens are raw
/// entries in store order, including primary and malformed ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AclList {
    preamble: Option<String>,
    entries: Vec<String>,
}

impl AclList {
    /// Creates a list from a preamble and raw entries.
    #[must_use]
    pub fn new(preamble: Option<String>, entries: Vec<String>) -> Self {
        Self { preamble, entries }
    }

    /// Splits an attribute value into preamble and entries.
    ///
    /// NUL bytes are treated as separators so values read back with a
    /// trailing terminator parse cleanly. A leading token that parses as an
    /// entry, primary ones included, stays in the entry list.
    #[must_use]
    pub fn parse_value(value: &str) -> Self {
        let mut tokens = value
            .split(|ch: char| ch.is_whitespace() || ch == '\0')
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .peekable();
        let preamble = tokens.next_if(|token| !is_entry(token));
        Self {
            preamble,
            entries: tokens.collect(),
        }
    }

    /// Joins preamble and entries back into an attribute value.
    #[must_use]
    pub fn to_value(&self) -> String {
        self.to_string()
    }

    /// The preamble token, if the attribute had one.
    #[must_use]
    pub fn preamble(&self) -> Option<&str> {
        self.preamble.as_deref()
    }

    /// Raw entries in store order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of raw entries (the preamble is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no raw entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry rendered in native syntax.
    pub fn push(&mut self, entry: &AclEntry) {
        self.entries.push(entry.render());
    }

    /// Drops every raw entry for which `remove` returns `true`, returning how
    /// many were dropped.
    pub fn remove_where<F>(&mut self, mut remove: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|raw| !remove(raw));
        before - self.entries.len()
    }
}

fn is_entry(token: &str) -> bool {
    matches!(AclEntry::parse(token), Ok(_) | Err(EntryParseError::Primary))
}

impl fmt::Display for AclList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in self.preamble.iter().chain(self.entries.iter()) {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
            first = false;
        }
        Ok(())
    }
}
