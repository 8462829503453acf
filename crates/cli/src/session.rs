//! Output handles and failure accounting for one run.

use std::fmt::Display;
use std::io::{self, Write};

use logging::EventSink;

use crate::error::CliError;

/// Exit status for a run that completed with path-scoped failures.
pub(crate) const PARTIAL_FAILURE: i32 = 2;

/// Standard output plus a diagnostic stream that collects notices.
pub(crate) struct Session<'a, Out, Err> {
    stdout: &'a mut Out,
    diagnostics: EventSink<&'a mut Err>,
    failed_paths: usize,
}

impl<'a, Out, Err> Session<'a, Out, Err>
where
    Out: Write,
    Err: Write,
{
    pub(crate) const fn new(stdout: &'a mut Out, stderr: &'a mut Err) -> Self {
        Self {
            stdout,
            diagnostics: EventSink::new(stderr),
            failed_paths: 0,
        }
    }

    pub(crate) fn stdout(&mut self) -> &mut Out {
        &mut *self.stdout
    }

    /// Writes pending notices so they appear next to the path they concern.
    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.diagnostics.flush_pending().map(drop)
    }

    /// Reports a failure that only affects the current path.
    pub(crate) fn path_failed(&mut self, message: impl Display) -> Result<(), CliError> {
        self.flush()?;
        writeln!(self.diagnostics.get_mut(), "{message}")?;
        self.failed_paths += 1;
        Ok(())
    }

    /// Converts the run result into an exit status, reporting fatal errors.
    pub(crate) fn finish(mut self, result: Result<(), CliError>) -> i32 {
        let _ = self.flush();
        match result {
            Ok(()) if self.failed_paths == 0 => 0,
            Ok(()) => PARTIAL_FAILURE,
            Err(error) => {
                let _ = writeln!(self.diagnostics.get_mut(), "{error}");
                1
            }
        }
    }
}
