//! Verbatim attribute transfer between groups.
//!
//! Fixed-size values are moved as raw bytes under the source's own datatype
//! and dataspace, so integer width, endianness and fixed string padding come
//! through untouched. Variable-length strings hold heap pointers and go
//! through the typed `VarLenUnicode` / `VarLenAscii` API instead. Types the
//! `hdf5` crate has no descriptor for, such as opaque blobs, are copied as
//! bytes too.
//!
//! The raw calls bypass the `hdf5` crate's global lock. Callers must not use
//! HDF5 from other threads while a copy is running.

use crate::CleanError;
use hdf5::types::{TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Attribute, Dataspace, Datatype, Group, H5Type};
use hdf5_sys::h5a::{H5Aclose, H5Acreate2, H5Aread, H5Awrite};
use hdf5_sys::h5p::H5P_DEFAULT;
use hdf5_sys::h5t::{H5T_class_t, H5Tdetect_class};
use log::debug;
use std::ffi::CString;

/// How an attribute's values are carried across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transfer {
    Utf8,
    Ascii,
    Bytes,
}

/// Whether values of `desc` contain heap pointers that a byte copy would
/// leave dangling.
fn holds_pointers(desc: &TypeDescriptor) -> bool {
    match desc {
        TypeDescriptor::VarLenArray(_)
        | TypeDescriptor::VarLenAscii
        | TypeDescriptor::VarLenUnicode => true,
        TypeDescriptor::FixedArray(inner, _) => holds_pointers(inner),
        TypeDescriptor::Compound(compound) => {
            compound.fields.iter().any(|field| holds_pointers(&field.ty))
        }
        _ => false,
    }
}

fn transfer_for(name: &str, dtype: &Datatype) -> Result<Transfer, CleanError> {
    let unsupported = |reason: String| CleanError::UnsupportedAttribute {
        name: name.to_owned(),
        reason,
    };
    // SAFETY: `dtype` keeps its identifier open for the duration of the call.
    let references = unsafe { H5Tdetect_class(dtype.id(), H5T_class_t::H5T_REFERENCE) };
    if references > 0 {
        return Err(unsupported("object references are local to their file".into()));
    }
    match dtype.to_descriptor() {
        Ok(TypeDescriptor::VarLenUnicode) => Ok(Transfer::Utf8),
        Ok(TypeDescriptor::VarLenAscii) => Ok(Transfer::Ascii),
        Ok(desc) if holds_pointers(&desc) => {
            Err(unsupported(format!("variable-length data in {desc:?}")))
        }
        // Types the typed API cannot describe (opaque, bitfield) carry no
        // pointers once references are ruled out.
        _ => Ok(Transfer::Bytes),
    }
}

fn check_call(status: i32, call: &'static str, name: &str) -> Result<(), CleanError> {
    if status < 0 {
        return Err(CleanError::AttributeCall {
            call,
            name: name.to_owned(),
        });
    }
    Ok(())
}

fn copy_typed<T: H5Type>(
    attr: &Attribute,
    space: &Dataspace,
    dst: &Group,
    name: &str,
) -> Result<(), CleanError> {
    let out = dst.new_attr::<T>().shape(space.extents()?).create(name)?;
    if space.size() > 0 {
        let values = attr.read_raw::<T>()?;
        out.write_raw(values.as_slice())?;
    }
    Ok(())
}

fn copy_bytes(
    attr: &Attribute,
    dtype: &Datatype,
    space: &Dataspace,
    dst: &Group,
    name: &str,
) -> Result<(), CleanError> {
    let mut buf = vec![0_u8; dtype.size() * space.size()];
    if !buf.is_empty() {
        // SAFETY: `buf` holds `dtype.size()` bytes for every element of the
        // dataspace, and reading with the stored type performs no conversion.
        let status = unsafe { H5Aread(attr.id(), dtype.id(), buf.as_mut_ptr().cast()) };
        check_call(status, "H5Aread", name)?;
    }

    let c_name = CString::new(name).map_err(|_| CleanError::UnsupportedAttribute {
        name: name.to_owned(),
        reason: "name contains a NUL byte".into(),
    })?;
    // SAFETY: every identifier is owned by a live handle and `c_name` outlives
    // the call.
    let id = unsafe {
        H5Acreate2(
            dst.id(),
            c_name.as_ptr(),
            dtype.id(),
            space.id(),
            H5P_DEFAULT,
            H5P_DEFAULT,
        )
    };
    if id < 0 {
        return Err(CleanError::AttributeCall {
            call: "H5Acreate2",
            name: name.to_owned(),
        });
    }
    let written = if buf.is_empty() {
        0
    } else {
        // SAFETY: `id` was just created with `dtype` and `space`, so `buf` has
        // exactly the size the write expects.
        unsafe { H5Awrite(id, dtype.id(), buf.as_ptr().cast()) }
    };
    // SAFETY: `id` is a valid attribute identifier that nothing else owns.
    let closed = unsafe { H5Aclose(id) };
    check_call(written, "H5Awrite", name)?;
    check_call(closed, "H5Aclose", name)
}

/// Copy the attribute `name` from `src` onto `dst` unchanged.
///
/// # Errors
///
/// Returns [`CleanError::UnsupportedAttribute`] for object references and for
/// types holding variable-length data other than plain strings, and
/// propagates any HDF5 failure while reading or writing.
pub fn copy_attribute(src: &Group, dst: &Group, name: &str) -> Result<(), CleanError> {
    let attr = src.attr(name)?;
    let dtype = attr.dtype()?;
    let space = attr.space()?;
    match transfer_for(name, &dtype)? {
        Transfer::Utf8 => copy_typed::<VarLenUnicode>(&attr, &space, dst, name),
        Transfer::Ascii => copy_typed::<VarLenAscii>(&attr, &space, dst, name),
        Transfer::Bytes => copy_bytes(&attr, &dtype, &space, dst, name),
    }
}

/// Copy every attribute of `src` onto `dst`, returning how many were copied.
///
/// Attributes are visited in the order HDF5 lists them.
///
/// # Errors
///
/// Stops at the first attribute that fails; see [`copy_attribute`].
pub fn copy_attributes(src: &Group, dst: &Group) -> Result<usize, CleanError> {
    let names = src.attr_names()?;
    for name in &names {
        copy_attribute(src, dst, name)?;
        debug!("copied attribute {}/{name}", dst.name());
    }
    Ok(names.len())
}

#[cfg(test)]
mod tests {
    use super::holds_pointers;
    use hdf5::types::{FloatSize, IntSize, TypeDescriptor};
    use rstest::rstest;

    #[rstest]
    #[case(TypeDescriptor::Integer(IntSize::U4), false)]
    #[case(TypeDescriptor::Float(FloatSize::U8), false)]
    #[case(TypeDescriptor::FixedAscii(16), false)]
    #[case(TypeDescriptor::VarLenUnicode, true)]
    #[case(TypeDescriptor::VarLenArray(Box::new(TypeDescriptor::Unsigned(IntSize::U1))), true)]
    #[case(TypeDescriptor::FixedArray(Box::new(TypeDescriptor::VarLenAscii), 3), true)]
    #[case(TypeDescriptor::FixedArray(Box::new(TypeDescriptor::Boolean), 3), false)]
    fn detects_heap_pointers(#[case] desc: TypeDescriptor, #[case] expected: bool) {
        assert_eq!(holds_pointers(&desc), expected);
    }
}
