//! The cleaning run: open the source, keep one read group and its metadata
//! subgroups, and write them to the destination.

use crate::attributes::copy_attributes;
use crate::config::{CleanOptions, OutputMode};
use crate::select::{open_subgroup, select_read_group};
use crate::CleanError;
use hdf5::File;
use log::info;
use std::path::{Path, PathBuf};

/// What a cleaning run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub output: PathBuf,
    pub group: String,
    /// Kept subgroups with the number of attributes copied into each.
    pub subgroups: Vec<(String, usize)>,
}

/// Whether `output` names the existing `input`, through any spelling of the path.
fn same_file(input: &Path, output: &Path) -> bool {
    if input == output {
        return true;
    }
    match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn open_destination(path: &Path, mode: OutputMode) -> Result<File, CleanError> {
    let file = match mode {
        OutputMode::Replace => File::create(path)?,
        OutputMode::Append => File::append(path)?,
    };
    Ok(file)
}

/// Strip `options.input` down to one read group and write it to
/// `options.output`.
///
/// Only the configured subgroups and their attributes are kept; datasets are
/// never copied. A failure part-way through may leave a partial destination
/// file behind.
///
/// # Errors
///
/// Returns [`CleanError::InputMissing`] or [`CleanError::OutputIsInput`]
/// before touching any file, group lookup errors from
/// [`select_read_group`] and [`open_subgroup`],
/// [`CleanError::GroupExists`] when appending to a file that already holds the
/// group, and any HDF5 failure.
pub fn clean(options: &CleanOptions) -> Result<CleanReport, CleanError> {
    if !options.input.is_file() {
        return Err(CleanError::InputMissing(options.input.clone()));
    }
    if same_file(&options.input, &options.output) {
        return Err(CleanError::OutputIsInput(options.output.clone()));
    }

    let source = File::open(&options.input)?;
    let destination = open_destination(&options.output, options.mode)?;

    let (group_name, read_group) = select_read_group(&source, &options.preferred_group)?;
    info!("keeping group '{group_name}' from {}", options.input.display());
    if destination.link_exists(&group_name) {
        return Err(CleanError::GroupExists(group_name));
    }
    let kept = destination.create_group(&group_name)?;

    let mut subgroups = Vec::with_capacity(options.subgroups.len());
    for sub_name in &options.subgroups {
        let src_sub = open_subgroup(&read_group, &group_name, sub_name)?;
        let dst_sub = kept.create_group(sub_name)?;
        let copied = copy_attributes(&src_sub, &dst_sub)?;
        info!("copied {copied} attributes into {group_name}/{sub_name}");
        subgroups.push((sub_name.clone(), copied));
    }

    destination.flush()?;
    info!("wrote {}", options.output.display());
    Ok(CleanReport {
        output: options.output.clone(),
        group: group_name,
        subgroups,
    })
}
