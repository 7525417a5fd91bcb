//! Test utilities used across integration and unit tests.
//!
//! Writes small synthetic fast5 files shaped like the ones sequencers
//! produce: a read group holding metadata subgroups and a raw signal dataset.

use anyhow::{anyhow, bail};
use hdf5::types::{FixedAscii, VarLenUnicode};
use hdf5::{File, Group};
use hdf5_sys::h5i::hid_t;
use hdf5_sys::h5a::{H5Aclose, H5Acreate2, H5Aread, H5Awrite};
use hdf5_sys::h5p::H5P_DEFAULT;
use hdf5_sys::h5s::{H5S_class_t, H5Sclose, H5Screate};
use hdf5_sys::h5t::{H5T_STD_REF_OBJ, H5T_class_t, H5Tclose, H5Tcreate, H5Tset_tag};
use std::ffi::CString;
use std::path::Path;

/// Run identifier written into `tracking_id`.
pub const RUN_ID: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678";

/// Flow cell identifier written into `tracking_id` as a fixed-length string.
pub const FLOW_CELL_ID: &[u8; 8] = b"FAK12345";

/// Sequencing kit written into `context_tags`.
pub const SEQUENCING_KIT: &str = "sqk-lsk109";

fn unicode(value: &str) -> anyhow::Result<VarLenUnicode> {
    value.parse().map_err(|e| anyhow!("invalid string {value:?}: {e:?}"))
}

fn write_tracking_id(group: &Group) -> anyhow::Result<()> {
    group
        .new_attr::<VarLenUnicode>()
        .shape(())
        .create("run_id")?
        .write_scalar(&unicode(RUN_ID)?)?;
    let flow_cell =
        FixedAscii::<8>::from_ascii(FLOW_CELL_ID).map_err(|e| anyhow!("flow cell id: {e:?}"))?;
    group
        .new_attr::<FixedAscii<8>>()
        .shape(())
        .create("flow_cell_id")?
        .write_scalar(&flow_cell)?;
    group
        .new_attr::<u32>()
        .shape(())
        .create("exp_start_time")?
        .write_scalar(&1_546_300_800_u32)?;
    Ok(())
}

fn write_context_tags(group: &Group) -> anyhow::Result<()> {
    group
        .new_attr::<VarLenUnicode>()
        .shape(())
        .create("sequencing_kit")?
        .write_scalar(&unicode(SEQUENCING_KIT)?)?;
    group
        .new_attr::<i32>()
        .shape(())
        .create("sample_frequency")?
        .write_scalar(&4000_i32)?;
    group
        .new_attr::<f64>()
        .shape(3)
        .create("calibration")?
        .write_raw(&[0.5_f64, 1.25, -3.0])?;
    Ok(())
}

/// Write a read group called `read_name` into `file`.
///
/// Only the subgroups named in `subgroups` are created; `tracking_id` and
/// `context_tags` receive known attributes, any other name stays empty. A
/// `Raw/Signal` dataset is always added.
///
/// # Errors
///
/// Returns an error if any HDF5 call fails.
pub fn write_read_group(file: &File, read_name: &str, subgroups: &[&str]) -> anyhow::Result<()> {
    let read = file.create_group(read_name)?;
    for name in subgroups {
        let sub = read.create_group(name)?;
        match *name {
            "tracking_id" => write_tracking_id(&sub)?,
            "context_tags" => write_context_tags(&sub)?,
            _ => {}
        }
    }
    let raw = read.create_group("Raw")?;
    raw.new_dataset::<i16>()
        .shape(6)
        .create("Signal")?
        .write_raw(&[512_i16, 498, 530, 601, 477, 489])?;
    Ok(())
}

/// Create a fast5 file at `path` with one read group per entry in `reads`,
/// each holding both metadata subgroups.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_sample_fast5(path: &Path, reads: &[&str]) -> anyhow::Result<()> {
    let file = File::create(path)?;
    for read in reads {
        write_read_group(&file, read, &["tracking_id", "context_tags"])?;
    }
    Ok(())
}

/// Create a scalar attribute of raw type `type_id`, writing `bytes` when given.
fn write_scalar_of_type(
    group: &Group,
    name: &str,
    type_id: hid_t,
    bytes: Option<&[u8]>,
) -> anyhow::Result<()> {
    let c_name = CString::new(name)?;
    // SAFETY: creating a scalar dataspace has no preconditions.
    let space = unsafe { H5Screate(H5S_class_t::H5S_SCALAR) };
    if space < 0 {
        bail!("H5Screate failed for {name}");
    }
    // SAFETY: `group`, `type_id` and `space` are open identifiers and `c_name`
    // outlives the call.
    let attr = unsafe {
        H5Acreate2(group.id(), c_name.as_ptr(), type_id, space, H5P_DEFAULT, H5P_DEFAULT)
    };
    // SAFETY: `space` was created above and nothing else owns it.
    let space_closed = unsafe { H5Sclose(space) };
    if attr < 0 {
        bail!("H5Acreate2 failed for {name}");
    }
    let written = match bytes {
        // SAFETY: callers pass exactly one element's worth of bytes for `type_id`.
        Some(buf) => unsafe { H5Awrite(attr, type_id, buf.as_ptr().cast()) },
        None => 0,
    };
    // SAFETY: `attr` was created above and nothing else owns it.
    let attr_closed = unsafe { H5Aclose(attr) };
    if written < 0 || attr_closed < 0 || space_closed < 0 {
        bail!("failed to write attribute {name}");
    }
    Ok(())
}

/// Attach a scalar object-reference attribute called `name` to `group`.
///
/// The reference is left unset; only its type matters to the copier.
///
/// # Errors
///
/// Returns an error if any HDF5 call fails.
pub fn write_reference_attr(group: &Group, name: &str) -> anyhow::Result<()> {
    write_scalar_of_type(group, name, *H5T_STD_REF_OBJ, None)
}

/// Attach a scalar opaque attribute tagged `tag` holding `bytes` to `group`.
///
/// # Errors
///
/// Returns an error if any HDF5 call fails.
pub fn write_opaque_attr(group: &Group, name: &str, tag: &str, bytes: &[u8]) -> anyhow::Result<()> {
    let c_tag = CString::new(tag)?;
    // SAFETY: an opaque type may be created with any non-zero size.
    let dtype = unsafe { H5Tcreate(H5T_class_t::H5T_OPAQUE, bytes.len()) };
    if dtype < 0 {
        bail!("H5Tcreate failed for {name}");
    }
    // SAFETY: `dtype` was just created and `c_tag` outlives the call.
    let tagged = unsafe { H5Tset_tag(dtype, c_tag.as_ptr()) };
    let written = if tagged < 0 {
        Err(anyhow!("H5Tset_tag failed for {name}"))
    } else {
        write_scalar_of_type(group, name, dtype, Some(bytes))
    };
    // SAFETY: `dtype` is owned here and closed exactly once.
    let closed = unsafe { H5Tclose(dtype) };
    written?;
    if closed < 0 {
        bail!("H5Tclose failed for {name}");
    }
    Ok(())
}

/// Read the stored bytes of attribute `name` on `group` without conversion.
///
/// # Errors
///
/// Returns an error if the attribute is missing or cannot be read.
pub fn read_attr_bytes(group: &Group, name: &str) -> anyhow::Result<Vec<u8>> {
    let attr = group.attr(name)?;
    let dtype = attr.dtype()?;
    let mut buf = vec![0_u8; dtype.size() * attr.space()?.size()];
    // SAFETY: `buf` holds one `dtype`-sized slot per element and reading with
    // the stored type performs no conversion.
    let status = unsafe { H5Aread(attr.id(), dtype.id(), buf.as_mut_ptr().cast()) };
    if status < 0 {
        bail!("H5Aread failed for {name}");
    }
    Ok(buf)
}
