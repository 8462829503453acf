#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `acl` is the translation and reconciliation engine behind `getpanfsacl`
//! and `setpanfsacl`. PanFS stores supplementary access-control entries in
//! the `user.panfs.acl` extended attribute using a token encoding that is
//! richer than POSIX permissions. This crate converts between that encoding
//! and the familiar `rwx` vocabulary, and merges user requests into an
//! existing entry list.
//!
//! # Design
//!
//! - [`capability`] holds the static table mapping read and write onto
//!   native capability tokens for files and directories.
//! - [`entry`] parses and renders individual native entries and [`list`]
//!   splits the attribute value into an ordered entry list.
//! - [`decode`] reports which simplified permissions an entry grants,
//!   including partially granted ones, and orders entries for display.
//! - [`encode`] turns an `rwxX` request into file, executable-file and
//!   directory variants.
//! - [`request`] parses the `-m`/`-x` command-line syntax.
//! - [`reconcile`] strips matching entries and appends new ones, deciding
//!   whether the list needs to be written back.
//!
//! The crate performs no I/O. Reading and writing the attribute, resolving
//! names and probing object kinds live in the `metadata` crate.
//!
//! # Invariants
//!
//! - `render(parse(s)) == s` for every entry accepted by [`AclEntry::parse`].
//! - Superuser (`0`) entries are never displayed and never removed.
//! - Primary entries (trailing `*`) and malformed entries are never matched
//!   by removal and survive reconciliation verbatim.
//! - After reconciling a modification there is at most one entry for the
//!   modified principal.
//!
//! # Errors
//!
//! [`RequestError`] reports malformed command-line ACL arguments and
//! requests that target the superuser. [`EntryParseError`] explains why a raw
//! entry was not accepted; decoding and reconciliation treat such entries as
//! opaque rather than failing.
//!
//! # Examples
//!
//! ```
//! use acl::{AclList, ObjectKind, decode_list};
//!
//! let list = AclList::parse_value("1 +uid:1001,rnkRPx -gid:20,rn");
//! let lines: Vec<String> = decode_list(&list, ObjectKind::Directory)
//!     .iter()
//!     .map(|entry| entry.render(entry.identifier()))
//!     .collect();
//!
//! assert_eq!(
//!     lines,
//!     [
//!         "deny:group:20:r (PARTIAL; missing kRPx)",
//!         "allow:user:1001:rx",
//!     ]
//! );
//! ```

pub mod capability;
pub mod decode;
pub mod encode;
pub mod entry;
pub mod list;
pub mod reconcile;
pub mod request;

pub use capability::{Capability, CapabilityRule, CapabilitySet, ObjectKind, Permission, rule};
pub use decode::{DecodedEntry, Grant, InheritanceNote, decode_entry, decode_list};
pub use encode::{EncodedBundle, ModifyRequest, PermissionRequest, Target, encode};
pub use entry::{AclEntry, EntryParseError, Inheritance, PrincipalKind, SUPERUSER_ID, Sense};
pub use list::AclList;
pub use reconcile::{Outcome, PlanBuilder, ReconcilePlan, RemoveSpec};
pub use request::{
    ModifySpec, PrincipalRef, RequestError, ensure_not_superuser, parse_modify, parse_remove,
};
