//! Elementwise thermodynamic and wind formulas over flat buffers of `n` samples.

use metcalc_core::{
    dewpoint, heat_index, vapor_pressure, wind_chill, wind_components, HeatIndexConfig, Masked,
    WindChillConfig,
};
use ndarray::Ix1;

use crate::error::{DefaultMetCalcError, MetCalcErrorCode};
use crate::helpers::{ffi_call, input_1d, output, write_field};

/// Write a masked result: values into `out`, and flags as 0/1 into
/// `out_mask` when the caller supplied one.
///
/// # Safety
/// Same buffer requirements as the calling entry point.
unsafe fn write_masked(
    result: &Masked<Ix1>,
    out: *mut f64,
    out_mask: *mut u8,
    n: usize,
) -> Result<(), DefaultMetCalcError> {
    let out = output(out, n, "out")?;
    write_field(out, result.data());
    if out_mask.is_null() {
        return Ok(());
    }
    let out_mask = output(out_mask, n, "out_mask")?;
    match result.mask() {
        Some(mask) => {
            for (slot, &flag) in out_mask.iter_mut().zip(mask.iter()) {
                *slot = u8::from(flag);
            }
        }
        None => out_mask.fill(0),
    }
    Ok(())
}

/// Saturation vapor pressure (hPa) at `temperature` (°C).
///
/// # Returns
/// - `Ok` with `out` filled on success
/// - `NullPointer` if either buffer is null
///
/// # Safety
/// `temperature` must point to `n` readable values and `out` to `n` writable values.
#[no_mangle]
pub unsafe extern "C" fn metcalc_vapor_pressure(
    temperature: *const f64,
    n: usize,
    out: *mut f64,
) -> MetCalcErrorCode {
    ffi_call(|| {
        let temperature = input_1d(temperature, n, "temperature")?;
        let out = output(out, n, "out")?;
        write_field(out, &vapor_pressure(&temperature));
        Ok(())
    })
}

/// Dewpoint (°C) from temperature (°C) and relative humidity (fraction, 0-1).
///
/// # Returns
/// - `Ok` with `out` filled on success
/// - `NullPointer` if any buffer is null
///
/// # Safety
/// Inputs must point to `n` readable values and `out` to `n` writable values.
#[no_mangle]
pub unsafe extern "C" fn metcalc_dewpoint(
    temperature: *const f64,
    relative_humidity: *const f64,
    n: usize,
    out: *mut f64,
) -> MetCalcErrorCode {
    ffi_call(|| {
        let temperature = input_1d(temperature, n, "temperature")?;
        let relative_humidity = input_1d(relative_humidity, n, "relative_humidity")?;
        let out = output(out, n, "out")?;
        write_field(out, &dewpoint(&temperature, &relative_humidity)?);
        Ok(())
    })
}

/// Split speed and meteorological direction (degrees) into `(u, v)`.
///
/// # Returns
/// - `Ok` with `out_u` and `out_v` filled on success
/// - `NullPointer` if any buffer is null
///
/// # Safety
/// Inputs must point to `n` readable values and outputs to `n` writable values.
#[no_mangle]
pub unsafe extern "C" fn metcalc_wind_components(
    speed: *const f64,
    direction: *const f64,
    n: usize,
    out_u: *mut f64,
    out_v: *mut f64,
) -> MetCalcErrorCode {
    ffi_call(|| {
        let speed = input_1d(speed, n, "speed")?;
        let direction = input_1d(direction, n, "direction")?;
        let out_u = output(out_u, n, "out_u")?;
        let out_v = output(out_v, n, "out_v")?;

        let (u, v) = wind_components(&speed, &direction)?;
        write_field(out_u, &u);
        write_field(out_v, &v);
        Ok(())
    })
}

/// Wind chill temperature index.
///
/// With `metric` the inputs are °C and m/s and the result is °C, otherwise
/// °F and mph. `face_level_winds` scales speeds measured at face height up to
/// the 10 m standard. When `out_mask` is non-null, samples outside the
/// formula's range are flagged with 1 and the rest with 0.
///
/// # Returns
/// - `Ok` with `out` (and `out_mask`) filled on success
/// - `NullPointer` if an input or `out` is null
///
/// # Safety
/// Inputs must point to `n` readable values, `out` to `n` writable values and
/// `out_mask` must be null or point to `n` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn metcalc_wind_chill(
    temperature: *const f64,
    speed: *const f64,
    n: usize,
    metric: bool,
    face_level_winds: bool,
    out: *mut f64,
    out_mask: *mut u8,
) -> MetCalcErrorCode {
    ffi_call(|| {
        let temperature = input_1d(temperature, n, "temperature")?;
        let speed = input_1d(speed, n, "speed")?;
        let config = WindChillConfig {
            metric,
            face_level_winds,
            mask_undefined: !out_mask.is_null(),
        };
        let result = wind_chill(&temperature, &speed, config)?;
        write_masked(&result, out, out_mask, n)
    })
}

/// Heat index (°F) from temperature (°F) and relative humidity (%).
///
/// When `out_mask` is non-null, samples below 80°F or 40% are flagged with 1
/// and the rest with 0.
///
/// # Returns
/// - `Ok` with `out` (and `out_mask`) filled on success
/// - `NullPointer` if an input or `out` is null
///
/// # Safety
/// Inputs must point to `n` readable values, `out` to `n` writable values and
/// `out_mask` must be null or point to `n` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn metcalc_heat_index(
    temperature: *const f64,
    relative_humidity: *const f64,
    n: usize,
    out: *mut f64,
    out_mask: *mut u8,
) -> MetCalcErrorCode {
    ffi_call(|| {
        let temperature = input_1d(temperature, n, "temperature")?;
        let relative_humidity = input_1d(relative_humidity, n, "relative_humidity")?;
        let config = HeatIndexConfig {
            mask_undefined: !out_mask.is_null(),
        };
        let result = heat_index(&temperature, &relative_humidity, config)?;
        write_masked(&result, out, out_mask, n)
    })
}
