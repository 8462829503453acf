#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` carries the verbosity model shared by `getpanfsacl` and
//! `setpanfsacl`. Library crates emit ordinary [`tracing`] events under
//! `panfsacl::*` targets; this crate decides which of them the user asked to
//! see and collects them so the front-end can print them beside the output
//! they relate to.
//!
//! # Design
//!
//! - [`InfoFlag`] and [`DebugFlag`] name the notice categories. Their levels
//!   live in [`InfoLevels`] and [`DebugLevels`], combined as
//!   [`VerbosityConfig`].
//! - The active configuration and pending events are thread-local
//!   ([`init`], [`info_gte`], [`debug_gte`], [`drain_events`]).
//! - [`VerbosityLayer`] is a [`tracing_subscriber::Layer`] that maps event
//!   targets onto flags and records the events that pass.
//!   [`with_tracing`] installs it for the duration of a closure.
//! - [`EventSink`] writes drained events to a stream.
//! - The `trace_*!` macros emit events under the right targets.
//!
//! # Invariants
//!
//! - Level 0 records nothing. `--verbose` enables change and skip notices;
//!   `--debug` additionally enables every debug category.
//! - Events are recorded in emission order and drained exactly once.
//!
//! # Examples
//!
//! ```
//! use logging::{EventSink, VerbosityConfig, trace_change, with_tracing};
//!
//! with_tracing(VerbosityConfig::from_flags(true, false), || {
//!     trace_change!("{}", "+uid:1001,rx");
//! });
//!
//! let mut sink = EventSink::new(Vec::new());
//! sink.flush_pending()?;
//! assert_eq!(sink.into_inner(), b"+uid:1001,rx\n".to_vec());
//! # Ok::<(), std::io::Error>(())
//! ```

mod config;
mod levels;
mod sink;
mod thread_local;
mod tracing_bridge;
mod tracing_macros;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use sink::EventSink;
pub use thread_local::{
    DiagnosticEvent, debug_gte, drain_events, emit_debug, emit_info, info_gte, init,
};
pub use tracing_bridge::{VerbosityLayer, with_tracing};
