//! The collaborators a run consults for each path.

use metadata::{AclStore, FsProbe, IdentityResolver, ObjectProbe, SystemResolver, XattrStore};

/// Store, resolver and probe used by one run.
///
/// The front-ends use [`Services::system`]; tests substitute in-memory
/// backends.
#[derive(Clone, Debug)]
pub struct Services<S, R, P> {
    store: S,
    resolver: R,
    probe: P,
}

impl<S, R, P> Services<S, R, P>
where
    S: AclStore,
    R: IdentityResolver,
    P: ObjectProbe,
{
    /// Bundles the given backends.
    pub const fn new(store: S, resolver: R, probe: P) -> Self {
        Self {
            store,
            resolver,
            probe,
        }
    }

    /// The ACL store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The identity resolver.
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    /// The object probe.
    pub const fn probe(&self) -> &P {
        &self.probe
    }
}

impl Services<XattrStore, SystemResolver, FsProbe> {
    /// Extended attributes, NSS lookups and `lstat`/`access` probes.
    ///
    /// The attribute name honours `PANFSACL_XATTR`.
    #[must_use]
    pub fn system() -> Self {
        Self::new(XattrStore::from_env(), SystemResolver, FsProbe)
    }
}
