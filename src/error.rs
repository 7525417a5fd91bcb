//! Error type shared by the cleaning pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by library functions.
#[derive(Error, Debug)]
pub enum CleanError {
    #[error("input file not found: {}", .0.display())]
    InputMissing(PathBuf),
    #[error("path has no usable file name: {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("output path {} is the input file", .0.display())]
    OutputIsInput(PathBuf),
    #[error("no top-level groups in {}", .0.display())]
    NoGroups(PathBuf),
    #[error("'{0}' is not a group")]
    NotAGroup(String),
    #[error("group '{group}' has no subgroup '{subgroup}'")]
    MissingSubgroup { group: String, subgroup: String },
    #[error("group '{0}' already exists in the destination")]
    GroupExists(String),
    #[error("attribute '{name}' cannot be copied: {reason}")]
    UnsupportedAttribute { name: String, reason: String },
    #[error("{call} failed for attribute '{name}'")]
    AttributeCall { call: &'static str, name: String },
    #[error("hdf5 error: {0}")]
    Hdf5(#[from] hdf5::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(#[from] ortho_config::OrthoError),
}
