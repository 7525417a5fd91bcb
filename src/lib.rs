//! Strip fast5 files down to the metadata test suites need.
//!
//! The library keeps one read group from an HDF5 fast5 file together with its
//! `tracking_id` and `context_tags` subgroups, copies their attributes
//! verbatim and drops every dataset. The `f5clean` binary wraps [`clean`]
//! with argument handling and layered configuration.

pub mod attributes;
pub mod cli_args;
pub mod config;
pub mod copier;
pub mod error;
pub mod output_path;
pub mod select;
pub mod test_utils;
pub mod usage;

pub use cli_args::CleanArgs;
pub use config::{CleanOptions, OutputMode};
pub use copier::{CleanReport, clean};
pub use error::CleanError;
