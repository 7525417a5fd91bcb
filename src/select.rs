//! Choose which top-level read group survives cleaning.

use crate::CleanError;
use hdf5::{File, Group};
use log::warn;

/// Pick the read group to keep from `file`.
///
/// The group named `preferred` wins when it exists. Otherwise the member whose
/// name sorts first is used, the same key h5py lists first.
/// Returns the member name alongside the opened group.
///
/// # Errors
///
/// Returns [`CleanError::NoGroups`] for a file without members and
/// [`CleanError::NotAGroup`] when the chosen member is a dataset or other
/// non-group object.
pub fn select_read_group(file: &File, preferred: &str) -> Result<(String, Group), CleanError> {
    let name = if file.link_exists(preferred) {
        preferred.to_owned()
    } else {
        let first = file
            .member_names()?
            .into_iter()
            .min()
            .ok_or_else(|| CleanError::NoGroups(file.filename().into()))?;
        warn!("group '{preferred}' not found; keeping first group '{first}'");
        first
    };
    let group = file
        .group(&name)
        .map_err(|_| CleanError::NotAGroup(name.clone()))?;
    Ok((name, group))
}

/// Open the subgroup `name` of `parent`, naming the parent in any error.
///
/// # Errors
///
/// Returns [`CleanError::MissingSubgroup`] when no link of that name exists
/// and [`CleanError::NotAGroup`] when the link is not a group.
pub fn open_subgroup(parent: &Group, parent_name: &str, name: &str) -> Result<Group, CleanError> {
    if !parent.link_exists(name) {
        return Err(CleanError::MissingSubgroup {
            group: parent_name.to_owned(),
            subgroup: name.to_owned(),
        });
    }
    parent
        .group(name)
        .map_err(|_| CleanError::NotAGroup(format!("{parent_name}/{name}")))
}
