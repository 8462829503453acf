#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the two command-line front-ends of the workspace:
//! `getpanfsacl`, which lists the PanFS ACL entries of files and directories
//! in a simplified `allow:user:name:rwx` vocabulary, and `setpanfsacl`, which
//! adds, replaces and removes entries using a `setfacl`-like syntax.
//!
//! # Design
//!
//! [`run_get`] and [`run_set`] accept an iterator of arguments together with
//! handles for standard output and error and return the process exit status.
//! Arguments are parsed with a [`clap`](https://docs.rs/clap/) command that
//! keeps help rendering under the tool's control. The per-path work runs
//! against a [`Services`] bundle; the front-ends use [`Services::system`]
//! while [`run_get_with`] and [`run_set_with`] accept any store, resolver and
//! probe, which lets tests drive the full flow against in-memory backends.
//!
//! Notices are emitted as `tracing` events and collected by the `logging`
//! bridge; they are written to standard error after each path.
//!
//! # Invariants
//!
//! - The run functions never panic; output failures become exit status `1`.
//! - Every path is processed to completion before the next one starts.
//! - A reconciled list is written in a single store call, and only when it
//!   differs from the stored one.
//!
//! # Errors
//!
//! Exit status `1` is returned for usage errors, malformed ACL arguments,
//! superuser targets and identifiers that cannot be resolved. Exit status `2`
//! is returned when the run completed but at least one path could not be
//! inspected, read or written.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run_set(["setpanfsacl", "-m", "u:alice"], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 1);
//! assert_eq!(
//!     String::from_utf8(stderr).unwrap(),
//!     "u:alice is not a valid ACL, (try --help)\n"
//! );
//! ```

use std::ffi::OsString;
use std::io::Write;

use logging::{VerbosityConfig, with_tracing};
use metadata::{AclStore, IdentityResolver, ObjectProbe};

mod args;
mod error;
mod help;
mod modify;
mod query;
mod services;
mod session;
mod traverse;

pub use error::CliError;
pub use services::Services;

use args::{parse_get_args, parse_set_args};
use help::{GET_HELP_TEXT, MISSING_FILE_TEXT, SET_HELP_TEXT};
use modify::{Requests, modify_path};
use query::list_path;
use session::Session;
use traverse::for_each_path;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

fn write_help<Out: Write, Err: Write>(text: &str, stdout: &mut Out, stderr: &mut Err) -> i32 {
    match stdout.write_all(text.as_bytes()) {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "failed to write help: {error}");
            1
        }
    }
}

fn usage_error<Err: Write>(message: impl std::fmt::Display, stderr: &mut Err) -> i32 {
    let _ = writeln!(stderr, "{message}");
    1
}

/// Runs `getpanfsacl` against the local system.
pub fn run_get<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    run_get_with(arguments, &Services::system(), stdout, stderr)
}

/// Runs `getpanfsacl` with the supplied backends.
pub fn run_get_with<I, A, St, R, P, Out, Err>(
    arguments: I,
    services: &Services<St, R, P>,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
    St: AclStore,
    R: IdentityResolver,
    P: ObjectProbe,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_get_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => return usage_error(error.to_string().trim_end(), stderr),
    };
    if parsed.show_help {
        return write_help(GET_HELP_TEXT, stdout, stderr);
    }
    if parsed.files.is_empty() {
        return usage_error(MISSING_FILE_TEXT, stderr);
    }

    let show_raw = parsed.verbose || parsed.debug;
    let config = VerbosityConfig::from_flags(parsed.verbose, parsed.debug);
    let mut session = Session::new(stdout, stderr);
    let result = with_tracing(config, || {
        for_each_path(&mut session, parsed.files.as_slice(), parsed.recursive, |session, path| {
            list_path(services, session, path, show_raw)
        })
    });
    session.finish(result)
}

/// Runs `setpanfsacl` against the local system.
pub fn run_set<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    run_set_with(arguments, &Services::system(), stdout, stderr)
}

/// Runs `setpanfsacl` with the supplied backends.
pub fn run_set_with<I, A, St, R, P, Out, Err>(
    arguments: I,
    services: &Services<St, R, P>,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
    St: AclStore,
    R: IdentityResolver,
    P: ObjectProbe,
    Out: Write,
    Err: Write,
{
    let parsed = match parse_set_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => return usage_error(error.to_string().trim_end(), stderr),
    };
    if parsed.show_help {
        return write_help(SET_HELP_TEXT, stdout, stderr);
    }
    let requests = match Requests::parse(&parsed) {
        Ok(requests) => requests,
        Err(error) => return usage_error(error, stderr),
    };
    if parsed.files.is_empty() {
        return usage_error(MISSING_FILE_TEXT, stderr);
    }

    let config = VerbosityConfig::from_flags(parsed.verbose, parsed.debug);
    let mut session = Session::new(stdout, stderr);
    let result = with_tracing(config, || -> Result<(), CliError> {
        let plan = requests.into_plan(services.resolver())?;
        for_each_path(&mut session, parsed.files.as_slice(), parsed.recursive, |session, path| {
            modify_path(services, session, &plan, path, parsed.dry_run)
        })
    });
    session.finish(result)
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
///
/// Values outside the `0..=255` range are clamped.
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}

#[cfg(test)]
mod tests;
