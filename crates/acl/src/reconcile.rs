//! crates/acl/src/reconcile.rs
//!
//! Merging requested changes into an existing entry list.
//!
//! A [`PlanBuilder`] accumulates removals and modifications from the command
//! line. The finished [`ReconcilePlan`] is then applied to each object in
//! turn, moving the list through the [`Loaded`], [`Removed`] and [`Appended`]
//! stages before producing an [`Outcome`]. Each stage is a separate type so a
//! list cannot be written before removals have been applied.

use logging::trace_acl;

use crate::encode::{EncodedBundle, ModifyRequest, Target, encode};
use crate::entry::{AclEntry, PrincipalKind};
use crate::list::AclList;

/// Selects existing entries to strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoveSpec {
    /// Every user or group entry with a numeric identifier.
    All,
    /// Entries for one principal, regardless of sense.
    Principal {
        /// User or group.
        kind: PrincipalKind,
        /// Identifier as stored in the entry.
        identifier: String,
    },
}

impl RemoveSpec {
    /// Reports whether `entry` is selected.
    ///
    /// Superuser entries never match.
    #[must_use]
    pub fn matches(&self, entry: &AclEntry) -> bool {
        if entry.is_superuser() {
            return false;
        }
        match self {
            Self::All => entry.identifier().bytes().all(|byte| byte.is_ascii_digit()),
            Self::Principal { kind, identifier } => {
                entry.kind() == *kind && entry.identifier() == identifier
            }
        }
    }

    /// Same as [`RemoveSpec::matches`] for a raw entry; primary and
    /// malformed entries never match.
    #[must_use]
    pub fn matches_raw(&self, raw: &str) -> bool {
        AclEntry::parse(raw).is_ok_and(|entry| self.matches(&entry))
    }
}

/// Accumulates the changes requested for a run.
#[derive(Clone, Debug, Default)]
pub struct PlanBuilder {
    remove_all: bool,
    removals: Vec<RemoveSpec>,
    modifications: Vec<ModifyRequest>,
    inherit: bool,
}

impl PlanBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Strips every numeric user and group entry.
    pub fn remove_all(&mut self) -> &mut Self {
        self.remove_all = true;
        self
    }

    /// Strips the entries of one principal.
    pub fn remove(&mut self, kind: PrincipalKind, identifier: impl Into<String>) -> &mut Self {
        let spec = RemoveSpec::Principal {
            kind,
            identifier: identifier.into(),
        };
        if !self.removals.contains(&spec) {
            self.removals.push(spec);
        }
        self
    }

    /// Replaces whatever the principal currently has with `request`.
    ///
    /// A later request for the same principal supersedes an earlier one.
    pub fn modify(&mut self, request: ModifyRequest) -> &mut Self {
        self.modifications
            .retain(|existing| existing.kind != request.kind || existing.identifier != request.identifier);
        self.modifications.push(request);
        self
    }

    /// Directory variants inherit to new files and subdirectories.
    pub fn inherit(&mut self, inherit: bool) -> &mut Self {
        self.inherit = inherit;
        self
    }

    /// Nothing has been requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.remove_all && self.removals.is_empty() && self.modifications.is_empty()
    }

    /// Finalises the plan, encoding each modification once.
    #[must_use]
    pub fn build(&self) -> ReconcilePlan {
        let mut removals = Vec::new();
        if self.remove_all {
            removals.push(RemoveSpec::All);
        }
        removals.extend(self.removals.iter().cloned());
        for request in &self.modifications {
            let implicit = RemoveSpec::Principal {
                kind: request.kind,
                identifier: request.identifier.clone(),
            };
            if !removals.contains(&implicit) {
                removals.push(implicit);
            }
        }

        let additions = self
            .modifications
            .iter()
            .map(|request| encode(request, self.inherit))
            .collect();

        ReconcilePlan {
            removals,
            additions,
        }
    }
}

/// Fully formed set of removals and encoded additions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcilePlan {
    removals: Vec<RemoveSpec>,
    additions: Vec<EncodedBundle>,
}

impl ReconcilePlan {
    /// Removal patterns, explicit ones first.
    #[must_use]
    pub fn removals(&self) -> &[RemoveSpec] {
        &self.removals
    }

    /// Encoded additions in command-line order.
    #[must_use]
    pub fn additions(&self) -> &[EncodedBundle] {
        &self.additions
    }

    /// Runs every stage against `list` for an object described by `target`.
    #[must_use]
    pub fn apply(&self, list: AclList, target: Target) -> Outcome {
        Loaded::new(list)
            .remove(&self.removals)
            .append(&self.additions, target)
            .finish()
    }
}

/// A list freshly read from the store.
#[derive(Debug)]
pub struct Loaded {
    list: AclList,
}

impl Loaded {
    /// Wraps a list read from the store.
    #[must_use]
    pub fn new(list: AclList) -> Self {
        Self { list }
    }

    /// Strips every entry selected by `removals`.
    #[must_use]
    pub fn remove(mut self, removals: &[RemoveSpec]) -> Removed {
        let mut removed = 0;
        for spec in removals {
            let count = self.list.remove_where(|raw| spec.matches_raw(raw));
            if count > 0 {
                trace_acl!("{spec:?} matched {count} entries");
            }
            removed += count;
        }
        Removed {
            list: self.list,
            removed,
        }
    }
}

/// A list after removal patterns have been applied.
#[derive(Debug)]
pub struct Removed {
    list: AclList,
    removed: usize,
}

impl Removed {
    /// Appends the variant of each bundle that applies to `target`.
    #[must_use]
    pub fn append(mut self, additions: &[EncodedBundle], target: Target) -> Appended {
        let mut appended = 0;
        for bundle in additions {
            if let Some(entry) = bundle.select(target) {
                trace_acl!("appending {entry}");
                self.list.push(entry);
                appended += 1;
            }
        }
        Appended {
            list: self.list,
            removed: self.removed,
            appended,
        }
    }
}

/// A list after additions have been appended.
#[derive(Debug)]
pub struct Appended {
    list: AclList,
    removed: usize,
    appended: usize,
}

impl Appended {
    /// Decides whether the list has to be written back.
    #[must_use]
    pub fn finish(self) -> Outcome {
        if self.removed == 0 && self.appended == 0 {
            Outcome::Unchanged
        } else {
            Outcome::Write {
                list: self.list,
                removed: self.removed,
                appended: self.appended,
            }
        }
    }
}

/// Result of reconciling one object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing matched and nothing was added; no write is needed.
    Unchanged,
    /// The list changed and must be written back in a single call.
    Write {
        /// The complete new list, preamble included.
        list: AclList,
        /// Entries stripped by removal patterns.
        removed: usize,
        /// Entries appended from modifications.
        appended: usize,
    },
}
