use std::ffi::CString;
use std::slice;

use metcalc_core::Field;
use ndarray::{ArrayView1, ArrayView2, Dimension};

use crate::error::{with_last_error_mut, DefaultMetCalcError, MetCalcError, MetCalcErrorCode};

/// Set the thread-local error message and code.
/// Accepts any type implementing `MetCalcError` trait.
pub(crate) fn set_last_error(error: &impl MetCalcError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl MetCalcError) -> MetCalcErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = MetCalcErrorCode::Ok;
    });
}

/// Run the body of an FFI function and convert its outcome into the code
/// returned to C, recording or clearing the thread-local error.
pub(crate) fn ffi_call<F>(body: F) -> MetCalcErrorCode
where
    F: FnOnce() -> Result<(), DefaultMetCalcError>,
{
    match body() {
        Ok(()) => {
            clear_last_error();
            MetCalcErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Number of samples in an `nx` by `ny` grid.
pub(crate) fn grid_len(nx: usize, ny: usize) -> Result<usize, DefaultMetCalcError> {
    if nx == 0 || ny == 0 {
        return Err(DefaultMetCalcError::invalid_parameter(format!(
            "Grid dimensions must be positive, got {nx}x{ny}"
        )));
    }
    nx.checked_mul(ny).ok_or_else(|| {
        DefaultMetCalcError::invalid_parameter(format!("Grid {nx}x{ny} exceeds addressable size"))
    })
}

/// Borrow a caller buffer of `len` samples as a 1-D view.
///
/// # Safety
/// `ptr` must be null or point to `len` readable, initialised `f64`s that
/// stay valid and unmodified for `'a`.
pub(crate) unsafe fn input_1d<'a>(
    ptr: *const f64,
    len: usize,
    name: &str,
) -> Result<ArrayView1<'a, f64>, DefaultMetCalcError> {
    if ptr.is_null() {
        return Err(DefaultMetCalcError::null_pointer(name));
    }
    Ok(ArrayView1::from(slice::from_raw_parts(ptr, len)))
}

/// Borrow a caller buffer as a row-major `(nx, ny)` grid.
///
/// # Safety
/// `ptr` must be null or point to `nx * ny` readable, initialised `f64`s that
/// stay valid and unmodified for `'a`.
pub(crate) unsafe fn input_2d<'a>(
    ptr: *const f64,
    nx: usize,
    ny: usize,
    name: &str,
) -> Result<ArrayView2<'a, f64>, DefaultMetCalcError> {
    let len = grid_len(nx, ny)?;
    let flat = input_1d(ptr, len, name)?;
    flat.into_shape_with_order((nx, ny)).map_err(|e| {
        DefaultMetCalcError::invalid_parameter(format!("Parameter '{name}': {e}"))
    })
}

/// Borrow a caller output buffer of `len` samples.
///
/// # Safety
/// `ptr` must be null or point to `len` writable `f64`s not aliased by any
/// other argument, valid for `'a`.
pub(crate) unsafe fn output<'a, T>(
    ptr: *mut T,
    len: usize,
    name: &str,
) -> Result<&'a mut [T], DefaultMetCalcError> {
    if ptr.is_null() {
        return Err(DefaultMetCalcError::null_pointer(name));
    }
    Ok(slice::from_raw_parts_mut(ptr, len))
}

/// Copy a result field into a caller buffer in logical (row-major) order.
pub(crate) fn write_field<D: Dimension>(out: &mut [f64], field: &Field<D>) {
    for (slot, value) in out.iter_mut().zip(field.iter()) {
        *slot = *value;
    }
}
