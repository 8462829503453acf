//! The `setpanfsacl` change requests and their application to one object.

use std::io::Write;
use std::path::Path;

use acl::{
    ModifyRequest, ModifySpec, Outcome, PlanBuilder, PrincipalRef, ReconcilePlan, RequestError,
    ensure_not_superuser, parse_modify, parse_remove,
};
use logging::{trace_acl, trace_change, trace_skip, trace_store};
use metadata::{AclStore, IdentityResolver, ObjectProbe};

use crate::args::SetArgs;
use crate::error::CliError;
use crate::services::Services;
use crate::session::Session;

/// Syntax-checked requests, before names are resolved.
#[derive(Debug, Default)]
pub(crate) struct Requests {
    remove_all: bool,
    inherit: bool,
    removals: Vec<PrincipalRef>,
    modifications: Vec<ModifySpec>,
}

impl Requests {
    /// Checks the syntax of every `-m` and `-x` argument.
    pub(crate) fn parse(args: &SetArgs) -> Result<Self, RequestError> {
        Ok(Self {
            remove_all: args.remove_all,
            inherit: args.inherit,
            removals: args
                .remove
                .iter()
                .map(|arg| parse_remove(arg))
                .collect::<Result<_, _>>()?,
            modifications: args
                .modify
                .iter()
                .map(|arg| parse_modify(arg))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Resolves names to numeric identifiers and builds the plan applied to
    /// every path.
    pub(crate) fn into_plan<R>(self, resolver: &R) -> Result<ReconcilePlan, CliError>
    where
        R: IdentityResolver,
    {
        let mut builder = PlanBuilder::new();
        builder.inherit(self.inherit);
        if self.remove_all {
            builder.remove_all();
        }
        for principal in &self.removals {
            let identifier = resolver.resolve_id(principal.kind, &principal.name)?;
            builder.remove(principal.kind, identifier);
        }
        for spec in self.modifications {
            let identifier = resolver.resolve_id(spec.principal.kind, &spec.principal.name)?;
            ensure_not_superuser(&spec.principal, &identifier)?;
            trace_acl!(
                "{} {} {} -> {}",
                spec.sense.label(),
                spec.principal.kind,
                identifier,
                spec.perms.letters()
            );
            builder.modify(ModifyRequest {
                sense: spec.sense,
                kind: spec.principal.kind,
                identifier,
                perms: spec.perms,
            });
        }
        Ok(builder.build())
    }
}

/// Reconciles the entries of `path` with `plan` and writes the result.
///
/// Nothing is written when the plan leaves the list unchanged, or when
/// `dry_run` is set.
pub(crate) fn modify_path<S, R, P, Out, Err>(
    services: &Services<S, R, P>,
    session: &mut Session<'_, Out, Err>,
    plan: &ReconcilePlan,
    path: &Path,
    dry_run: bool,
) -> Result<(), CliError>
where
    S: AclStore,
    R: IdentityResolver,
    P: ObjectProbe,
    Out: Write,
    Err: Write,
{
    trace_acl!("PATH: {}", path.display());
    let probed = match services.probe().kind_of(path) {
        Ok(probed) => probed,
        Err(error) => return session.path_failed(&error),
    };
    let Some(kind) = probed.object_kind() else {
        trace_skip!("Ignoring {} at '{}'", probed.description(), path.display());
        return Ok(());
    };

    let list = match services.store().read_entries(path) {
        Ok(list) => list,
        Err(error) => {
            trace_store!("{error}");
            return session.path_failed(format_args!("Failure getting ACL for {}", path.display()));
        }
    };
    trace_acl!("current: {}", list.to_value());

    let target = services.probe().target(path, kind);
    match plan.apply(list, target) {
        Outcome::Unchanged => {
            trace_acl!("no change required");
        }
        Outcome::Write {
            list,
            removed,
            appended,
        } => {
            trace_acl!("removed {removed}, appended {appended}");
            let value = list.to_value();
            if dry_run {
                trace_change!("{}: {} (dry run)", path.display(), value);
                return Ok(());
            }
            if let Err(error) = services.store().write_entries(path, &list) {
                return session.path_failed(&error);
            }
            trace_change!("{}: {}", path.display(), value);
        }
    }
    Ok(())
}
