//! Fatal errors that abort a run with exit status 1.

use std::io;

use acl::RequestError;
use metadata::IdentityError;
use thiserror::Error;

/// Errors that stop processing of every remaining path.
///
/// Path-scoped failures are reported and counted by the session instead.
#[derive(Debug, Error)]
pub enum CliError {
    /// An `-m` or `-x` argument is malformed or targets the superuser.
    #[error(transparent)]
    Request(#[from] RequestError),
    /// A user or group could not be resolved.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// Standard output or standard error could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
