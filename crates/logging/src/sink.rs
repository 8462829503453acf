//! crates/logging/src/sink.rs
//! Writes collected diagnostics to a stream, one per line.

use std::io::{self, Write};

use crate::thread_local::{DiagnosticEvent, drain_events};

/// Streaming sink that renders [`DiagnosticEvent`]s into an
/// [`io::Write`] target.
///
/// The front-ends drain the thread-local buffer after each path so notices
/// appear next to the output they describe.
///
/// # Examples
///
/// ```
/// use logging::{DiagnosticEvent, EventSink, InfoFlag};
///
/// let mut sink = EventSink::new(Vec::new());
/// sink.write(&DiagnosticEvent::Info {
///     flag: InfoFlag::Change,
///     level: 1,
///     message: "no change required".to_owned(),
/// })?;
/// assert_eq!(sink.into_inner(), b"no change required\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct EventSink<W> {
    writer: W,
}

impl<W: Write> EventSink<W> {
    /// Creates a sink that writes to `writer`.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one event followed by a newline.
    pub fn write(&mut self, event: &DiagnosticEvent) -> io::Result<()> {
        writeln!(self.writer, "{}", event.message())
    }

    /// Drains the thread-local buffer into the writer.
    ///
    /// Returns the number of events written.
    pub fn flush_pending(&mut self) -> io::Result<usize> {
        let events = drain_events();
        for event in &events {
            self.write(event)?;
        }
        Ok(events.len())
    }

    /// Borrows the underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrows the underlying writer, for lines that bypass the
    /// event buffer such as error reports.
    pub const fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
