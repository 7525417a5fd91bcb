//! Command-line argument structures.
//!
//! Isolates clap derivations so lint expectations remain scoped, keeping
//! `main.rs` focused on runtime logic.

use clap::Parser;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Returns `true` when the flag is unset.
///
/// Used by `skip_serializing_if` so a `false` CLI default never masks a value
/// from the environment or a configuration file.
#[expect(clippy::trivially_copy_pass_by_ref, reason = "serde passes a reference")]
fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Arguments accepted by `f5clean`.
#[derive(Parser, Deserialize, Serialize, Debug, OrthoConfig, Clone, Default)]
#[command(
    name = "f5clean",
    version,
    about = "Strip a fast5 file down to one read group and its metadata"
)]
#[ortho_config(prefix = "F5CLEAN")]
pub struct CleanArgs {
    /// Fast5 file to clean
    #[arg(value_name = "FILE", num_args = 0..)]
    // Left unbounded so `main` can answer a wrong count with the usage text
    // rather than a clap error.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<PathBuf>,
    /// Top-level group to keep when the file has one of this name
    #[arg(long = "group", value_name = "NAME")]
    pub preferred_group: Option<String>,
    /// Metadata subgroup to keep; repeat for several
    #[arg(long = "subgroup", value_name = "NAME")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subgroups: Vec<String>,
    /// Write the cleaned file here instead of `<name>_clean.fast5`
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Add to an existing destination file instead of replacing it
    #[arg(long)]
    #[serde(default, skip_serializing_if = "is_false")]
    pub append: bool,
}

impl CleanArgs {
    /// The single input file, if exactly one was given.
    #[must_use]
    pub fn single_file(&self) -> Option<&PathBuf> {
        match self.files.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}
