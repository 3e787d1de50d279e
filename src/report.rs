//! Fatal-error display: message, source text, and a caret under the
//! offending command.

use std::io::{self, Write};

use crate::error::Error;

/// Write the standard error report for `err` to `out`.
///
/// Errors carrying a source index render as
///
/// ```text
/// Error: <message>, cause:
/// <full source text>
///        ^
/// ```
///
/// with the caret aligned under the offending index. Errors without one
/// (file reads that never produced a source) render as the plain message.
pub fn write_report<W: Write>(out: &mut W, source: Option<&str>, err: &Error) -> io::Result<()> {
    match (err.index(), source) {
        (Some(index), Some(source)) => {
            writeln!(out, "Error: {err}, cause:")?;
            writeln!(out, "{source}")?;
            writeln!(out, "{:>width$}", '^', width = index + 1)
        }
        _ => writeln!(out, "{err}"),
    }
}

/// Print the standard error report to stdout.
pub fn print_report(source: Option<&str>, err: &Error) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let _ = write_report(&mut out, source, err);
    let _ = out.flush();
}
