#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `metadata` connects the pure ACL engine to the host system. It reads and
//! writes the PanFS ACL extended attribute, translates user and group names,
//! classifies filesystem objects and renders the base ownership header shown
//! by `getpanfsacl`.
//!
//! # Design
//!
//! Each concern sits behind a trait so the command-line layer can run against
//! in-memory doubles in tests:
//!
//! - [`AclStore`] with [`XattrStore`] (the `user.panfs.acl` attribute, or the
//!   name in `PANFSACL_XATTR`) and [`MemoryStore`].
//! - [`IdentityResolver`] with [`SystemResolver`] (NSS through `uzers`) and
//!   [`StaticResolver`].
//! - [`ObjectProbe`] with [`FsProbe`] (`lstat(2)` and `access(2)`).
//!
//! # Errors
//!
//! I/O failures are reported as [`MetadataError`], which records the
//! attempted operation and the path. Name lookups fail with
//! [`IdentityError`].

mod base;
mod error;
pub mod identity;
pub mod probe;
pub mod store;

pub use base::BasePermissions;
pub use error::MetadataError;
pub use identity::{IdentityError, IdentityResolver, StaticResolver, SystemResolver};
pub use probe::{FsProbe, ObjectProbe, ProbedKind};
pub use store::{ATTRIBUTE_ENV, AclStore, DEFAULT_ATTRIBUTE, MemoryStore, XattrStore};
