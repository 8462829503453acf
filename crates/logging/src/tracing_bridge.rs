//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the verbosity flag system.
//!
//! Library crates emit ordinary `tracing` events with `panfsacl::*` targets.
//! [`VerbosityLayer`] maps each target onto an info or debug flag, consults
//! the thread-local configuration and records the events that pass as
//! [`DiagnosticEvent`](crate::DiagnosticEvent)s for the front-end to print.
//!
//! # Usage
//!
//! ```
//! use logging::{VerbosityConfig, drain_events, with_tracing};
//!
//! with_tracing(VerbosityConfig::from_verbose_level(1), || {
//!     tracing::info!(target: "panfsacl::skip", "Ignoring fifo at 'pipe'");
//!     tracing::debug!(target: "panfsacl::acl", "not shown at level 1");
//! });
//!
//! let events = drain_events();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].message(), "Ignoring fifo at 'pipe'");
//! ```

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use super::thread_local::{debug_gte, emit_debug, emit_info, info_gte};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

/// A tracing layer that bridges tracing events to the verbosity flags.
#[derive(Clone, Copy, Debug, Default)]
pub struct VerbosityLayer;

impl VerbosityLayer {
    /// Map a tracing target to an info flag.
    fn target_to_info_flag(target: &str) -> Option<InfoFlag> {
        match target {
            t if t.ends_with("::change") || t == "change" => Some(InfoFlag::Change),
            t if t.ends_with("::skip") || t == "skip" => Some(InfoFlag::Skip),
            _ => None,
        }
    }

    /// Map a tracing target to a debug flag.
    fn target_to_debug_flag(target: &str) -> Option<DebugFlag> {
        match target {
            t if t.ends_with("::acl") || t == "acl" => Some(DebugFlag::Acl),
            t if t.ends_with("::ident") || t == "ident" => Some(DebugFlag::Ident),
            t if t.ends_with("::store") || t == "store" => Some(DebugFlag::Store),
            t if t.ends_with("::walk") || t == "walk" => Some(DebugFlag::Walk),
            _ => None,
        }
    }

    /// Map a tracing level to a verbosity level.
    const fn level_to_verbosity_level(level: &Level) -> u8 {
        match *level {
            Level::ERROR | Level::WARN | Level::INFO => 1,
            Level::DEBUG => 2,
            Level::TRACE => 3,
        }
    }
}

impl<S> Layer<S> for VerbosityLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        let verbosity_level = Self::level_to_verbosity_level(metadata.level());

        if let Some(debug_flag) = Self::target_to_debug_flag(target) {
            if debug_gte(debug_flag, verbosity_level) {
                let mut visitor = MessageVisitor::default();
                event.record(&mut visitor);
                if let Some(message) = visitor.message {
                    emit_debug(debug_flag, verbosity_level, message);
                }
            }
            return;
        }

        if let Some(info_flag) = Self::target_to_info_flag(target) {
            if info_gte(info_flag, verbosity_level) {
                let mut visitor = MessageVisitor::default();
                event.record(&mut visitor);
                if let Some(message) = visitor.message {
                    emit_info(info_flag, verbosity_level, message);
                }
            }
        }
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Runs `f` with the verbosity bridge installed as the thread's default
/// subscriber.
///
/// The subscriber is scoped to the call, so repeated runs inside one process
/// (for example in tests) never conflict with each other or with a global
/// subscriber.
pub fn with_tracing<T>(config: VerbosityConfig, f: impl FnOnce() -> T) -> T {
    super::thread_local::init(config);
    let subscriber = tracing_subscriber::registry().with(VerbosityLayer);
    tracing::subscriber::with_default(subscriber, f)
}
