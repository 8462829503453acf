//! crates/logging/src/tracing_macros.rs
//! Convenience macros for panfsacl-specific tracing.
//!
//! These macros wrap the standard tracing macros with the targets that
//! [`VerbosityLayer`](crate::VerbosityLayer) maps onto verbosity flags.
//! Callers must depend on `tracing` themselves.

/// Emit a change notice for a list that was (or would be) written.
///
/// # Example
/// ```ignore
/// trace_change!("{}", value);
/// ```
#[macro_export]
macro_rules! trace_change {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "panfsacl::change", $($arg)*);
    };
}

/// Emit a skip notice for an object that carries no PanFS ACL.
///
/// # Example
/// ```ignore
/// trace_skip!("Ignoring {} at '{}'", kind, path.display());
/// ```
#[macro_export]
macro_rules! trace_skip {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "panfsacl::skip", $($arg)*);
    };
}

/// Emit an ACL decoding or reconciliation trace.
#[macro_export]
macro_rules! trace_acl {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "panfsacl::acl", $($arg)*);
    };
}

/// Emit an identity lookup trace.
#[macro_export]
macro_rules! trace_ident {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "panfsacl::ident", $($arg)*);
    };
}

/// Emit an attribute store trace.
#[macro_export]
macro_rules! trace_store {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "panfsacl::store", $($arg)*);
    };
}

/// Emit a traversal trace.
///
/// # Example
/// ```ignore
/// trace_walk!("entering directory {}", path.display());
/// ```
#[macro_export]
macro_rules! trace_walk {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "panfsacl::walk", $($arg)*);
    };
}
