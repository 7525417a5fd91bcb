//! Destination path derivation.
//!
//! Cleaned files sit next to their source with `_clean` spliced in before the
//! `.fast5` extension, e.g. `run.fast5` becomes `run_clean.fast5`.

use crate::CleanError;
use std::path::{Path, PathBuf};

/// Extension marking a fast5 file.
pub const FAST5_SUFFIX: &str = ".fast5";

/// Replacement written in place of [`FAST5_SUFFIX`].
pub const CLEAN_SUFFIX: &str = "_clean.fast5";

/// Derive the cleaned file's path from the source path.
///
/// Every `.fast5` in the file name is replaced; parent directories are left
/// alone. A name without `.fast5` comes back unchanged, which callers treat
/// as a collision with the input.
///
/// # Errors
///
/// Returns [`CleanError::InvalidPath`] when the path has no file name or the
/// name is not valid UTF-8.
///
/// # Examples
///
/// ```
/// use f5clean::output_path::derive_output_path;
/// use std::path::Path;
///
/// let out = derive_output_path(Path::new("reads/run.fast5")).unwrap();
/// assert_eq!(out, Path::new("reads/run_clean.fast5"));
/// ```
pub fn derive_output_path(input: &Path) -> Result<PathBuf, CleanError> {
    let name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CleanError::InvalidPath(input.to_path_buf()))?;
    Ok(input.with_file_name(name.replace(FAST5_SUFFIX, CLEAN_SUFFIX)))
}
