//! The `getpanfsacl` listing of one object.

use std::io::Write;
use std::path::Path;

use acl::decode_list;
use logging::{trace_skip, trace_store};
use metadata::{AclStore, BasePermissions, IdentityResolver, ObjectProbe};

use crate::error::CliError;
use crate::services::Services;
use crate::session::Session;

/// Prints the base permission header and decoded PanFS entries of `path`.
///
/// Objects other than files and directories are skipped with a notice.
/// A missing or unreadable attribute fails only this path; an entry whose
/// identifier cannot be resolved aborts the run.
pub(crate) fn list_path<S, R, P, Out, Err>(
    services: &Services<S, R, P>,
    session: &mut Session<'_, Out, Err>,
    path: &Path,
    show_raw: bool,
) -> Result<(), CliError>
where
    S: AclStore,
    R: IdentityResolver,
    P: ObjectProbe,
    Out: Write,
    Err: Write,
{
    let probed = match services.probe().kind_of(path) {
        Ok(probed) => probed,
        Err(error) => return session.path_failed(&error),
    };
    let Some(kind) = probed.object_kind() else {
        trace_skip!("Ignoring {} at '{}'", probed.description(), path.display());
        return Ok(());
    };

    let base = match BasePermissions::read(path, services.resolver()) {
        Ok(base) => base,
        Err(error) => return session.path_failed(&error),
    };
    let out = session.stdout();
    writeln!(out, "# {kind} permissions:")?;
    write!(out, "{}", base.render())?;

    let list = match services.store().read_entries(path) {
        Ok(list) => list,
        Err(error) => {
            trace_store!("{error}");
            return session.path_failed(format_args!("Failure getting ACL for {}", path.display()));
        }
    };

    let out = session.stdout();
    if show_raw {
        writeln!(out, "{}", list.to_value())?;
    }
    writeln!(out, "# PanFS ACLs:")?;
    for entry in decode_list(&list, kind) {
        let name = services
            .resolver()
            .resolve_name(entry.kind(), entry.identifier())?;
        writeln!(out, "{}", entry.render(&name))?;
    }
    Ok(())
}
