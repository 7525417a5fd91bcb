//! Configuration loading and resolution.
//!
//! Merges configuration files and environment variables through
//! `ortho_config`, then turns the merged arguments into concrete
//! [`CleanOptions`].

use crate::CleanError;
use crate::cli_args::CleanArgs;
use crate::output_path::derive_output_path;
use ortho_config::{OrthoError, load_and_merge_subcommand_for};
use std::path::PathBuf;

/// Group kept when the file has one of this name.
pub const DEFAULT_GROUP: &str = "UniqueGlobalKey";

/// Metadata subgroups kept when none are configured.
pub const DEFAULT_SUBGROUPS: [&str; 2] = ["tracking_id", "context_tags"];

/// Merge configuration files and environment variables under `cli_args`.
///
/// Settings live in the `[cmds.f5clean]` table of `.f5clean.toml`; command
/// line values win over environment values, which win over the file.
///
/// # Errors
///
/// Returns an [`OrthoError`] if a configuration source cannot be read or
/// does not deserialize into [`CleanArgs`].
#[expect(
    clippy::result_large_err,
    reason = "configuration loading errors can be verbose"
)]
pub fn load_config(cli_args: &CleanArgs) -> Result<CleanArgs, OrthoError> {
    load_and_merge_subcommand_for::<CleanArgs>(cli_args).map_err(|e| OrthoError::aggregate([e]))
}

/// How the destination file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Create the file, truncating any previous content.
    #[default]
    Replace,
    /// Open read/write, creating the file when it does not exist.
    Append,
}

/// Fully resolved settings for one cleaning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub preferred_group: String,
    pub subgroups: Vec<String>,
    pub mode: OutputMode,
}

impl CleanOptions {
    /// Build options for `input` with every default applied.
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::InvalidPath`] when no output path can be derived.
    pub fn for_input(input: impl Into<PathBuf>) -> Result<Self, CleanError> {
        let input = input.into();
        let output = derive_output_path(&input)?;
        Ok(Self {
            input,
            output,
            preferred_group: DEFAULT_GROUP.to_owned(),
            subgroups: DEFAULT_SUBGROUPS.iter().map(|s| (*s).to_owned()).collect(),
            mode: OutputMode::Replace,
        })
    }

    /// Resolve merged arguments, filling unset values with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::InvalidPath`] when `args` does not hold exactly
    /// one file or no output path can be derived from it.
    pub fn resolve(args: CleanArgs) -> Result<Self, CleanError> {
        let input = args
            .single_file()
            .cloned()
            .ok_or_else(|| CleanError::InvalidPath(PathBuf::new()))?;
        let mut options = Self::for_input(input)?;
        if let Some(output) = args.output {
            options.output = output;
        }
        if let Some(group) = args.preferred_group {
            options.preferred_group = group;
        }
        if !args.subgroups.is_empty() {
            options.subgroups = args.subgroups;
        }
        if args.append {
            options.mode = OutputMode::Append;
        }
        Ok(options)
    }
}
