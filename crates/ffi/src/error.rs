use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use metcalc_core::CalcError;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait MetCalcError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> MetCalcErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `MetCalcError` for FFI failures.
///
/// Wraps a `MetCalcErrorCode` with a message. Calculation failures from the
/// core library convert into this via `From<CalcError>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultMetCalcError {
    code: MetCalcErrorCode,
    msg: String,
}

impl DefaultMetCalcError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"field"`, `"out_u"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: MetCalcErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for an invalid scalar parameter.
    ///
    /// # Arguments
    /// * `message` - Description of the error
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: MetCalcErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl From<CalcError> for DefaultMetCalcError {
    fn from(error: CalcError) -> Self {
        let code = match error {
            CalcError::InvalidShape(_) => MetCalcErrorCode::InvalidShape,
            CalcError::InvalidSpacingCount { .. } => MetCalcErrorCode::InvalidSpacingCount,
            CalcError::InvalidSpacing(_) => MetCalcErrorCode::InvalidSpacing,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl MetCalcError for DefaultMetCalcError {
    fn code(&self) -> MetCalcErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by calculation functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetCalcErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Input arrays have incompatible shapes or too few samples along an axis.
    InvalidShape = 2,

    /// Number of grid spacings does not match the number of velocity components.
    InvalidSpacingCount = 3,

    /// Grid spacing is not finite and positive.
    InvalidSpacing = 4,

    /// Invalid parameter passed to function.
    InvalidParameter = 5,
}

impl From<DefaultMetCalcError> for MetCalcErrorCode {
    fn from(error: DefaultMetCalcError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The `CString` is stored so the pointer handed out by `metcalc_get_last_error` stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, MetCalcErrorCode)> = const { RefCell::new((None, MetCalcErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, MetCalcErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, MetCalcErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded or no call has been made.
///
/// # Thread Safety
/// Error messages are stored per-thread (thread-local storage), so this is thread-safe.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// MetCalcErrorCode err = metcalc_gradient_2d(field, nx, ny, 100.0, 0, out);
/// if (err != Ok) {
///     const char* error = metcalc_get_last_error();
///     if (error) {
///         printf("gradient failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn metcalc_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns:
/// - `MetCalcErrorCode::Ok` (0) if the last call on this thread succeeded
/// - The specific error code from the last failed operation
#[no_mangle]
pub extern "C" fn metcalc_get_last_error_code() -> MetCalcErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
