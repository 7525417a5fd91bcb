//! Usage text printed when the argument count is wrong.

use std::io::Write;

/// First usage line: what the tool expects.
pub const USAGE_PROMPT: &str = "Please specify the fast5 file you wish to clean.";

/// Second usage line: an example invocation.
pub const USAGE_EXAMPLE: &str = "eg. 'f5clean test_run.fast5'";

/// Write both usage lines to `out`.
///
/// # Errors
///
/// Returns an error if writing to the provided output fails.
///
/// # Examples
///
/// ```
/// use f5clean::usage::write_usage;
///
/// let mut out = Vec::new();
/// write_usage(&mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
/// ```
pub fn write_usage<W: Write>(mut out: W) -> std::io::Result<()> {
    writeln!(out, "{USAGE_PROMPT}")?;
    writeln!(out, "{USAGE_EXAMPLE}")?;
    Ok(())
}
