//! Expansion of path operands, recursively when `-R` is given.

use std::io::Write;
use std::path::Path;

use walk::WalkBuilder;

use crate::error::CliError;
use crate::session::Session;

/// Calls `visit` for every operand, or for every object below each operand
/// when `recursive` is set. Notices are flushed after each path.
pub(crate) fn for_each_path<Out, Err, F>(
    session: &mut Session<'_, Out, Err>,
    operands: &[impl AsRef<Path>],
    recursive: bool,
    mut visit: F,
) -> Result<(), CliError>
where
    Out: Write,
    Err: Write,
    F: FnMut(&mut Session<'_, Out, Err>, &Path) -> Result<(), CliError>,
{
    for operand in operands {
        let operand = operand.as_ref();
        if !recursive {
            visit(session, operand)?;
            session.flush()?;
            continue;
        }

        let walker = match WalkBuilder::new(operand).build() {
            Ok(walker) => walker,
            Err(error) => {
                session.path_failed(&error)?;
                continue;
            }
        };
        for entry in walker {
            match entry {
                Ok(entry) => visit(session, entry.path())?,
                Err(error) => session.path_failed(&error)?,
            }
            session.flush()?;
        }
    }
    Ok(())
}
