//! Finite-difference kinematics over row-major `(nx, ny)` buffers.
//!
//! Element `[i * ny + j]` is the sample at x index `i`, y index `j`. Output
//! buffers must hold `nx * ny` values and must not overlap the inputs.

use metcalc_core::{advection, convergence_vorticity, geostrophic_wind, gradient, Velocity};

use crate::error::MetCalcErrorCode;
use crate::helpers::{ffi_call, grid_len, input_2d, output, write_field};

/// Derivative of a 2-D field along `axis` (0 = x, 1 = y) with uniform `spacing`.
///
/// # Returns
/// - `Ok` with `out` filled on success
/// - `NullPointer` if `field` or `out` is null
/// - `InvalidShape` if `axis > 1` or the grid has fewer than two samples along it
/// - `InvalidSpacing` if `spacing` is not finite and positive
///
/// # Safety
/// `field` must point to `nx * ny` readable values and `out` to `nx * ny`
/// writable values.
#[no_mangle]
pub unsafe extern "C" fn metcalc_gradient_2d(
    field: *const f64,
    nx: usize,
    ny: usize,
    spacing: f64,
    axis: usize,
    out: *mut f64,
) -> MetCalcErrorCode {
    ffi_call(|| {
        let field = input_2d(field, nx, ny, "field")?;
        let out = output(out, grid_len(nx, ny)?, "out")?;
        let derivative = gradient(&field, spacing, axis)?;
        write_field(out, &derivative);
        Ok(())
    })
}

/// Horizontal divergence and vertical vorticity of the wind `(u, v)`.
///
/// # Returns
/// - `Ok` with `out_divergence` and `out_vorticity` filled on success
/// - `NullPointer` if any buffer is null
/// - `InvalidShape` if either extent is below two
/// - `InvalidSpacing` if `dx` or `dy` is not finite and positive
///
/// # Safety
/// `u` and `v` must point to `nx * ny` readable values; both outputs to
/// `nx * ny` writable values.
#[no_mangle]
pub unsafe extern "C" fn metcalc_convergence_vorticity(
    u: *const f64,
    v: *const f64,
    nx: usize,
    ny: usize,
    dx: f64,
    dy: f64,
    out_divergence: *mut f64,
    out_vorticity: *mut f64,
) -> MetCalcErrorCode {
    ffi_call(|| {
        let u = input_2d(u, nx, ny, "u")?;
        let v = input_2d(v, nx, ny, "v")?;
        let len = grid_len(nx, ny)?;
        let out_divergence = output(out_divergence, len, "out_divergence")?;
        let out_vorticity = output(out_vorticity, len, "out_vorticity")?;

        let (divergence, vorticity) = convergence_vorticity(&u, &v, dx, dy)?;
        write_field(out_divergence, &divergence);
        write_field(out_vorticity, &vorticity);
        Ok(())
    })
}

/// Horizontal advection of `scalar` by the wind `(u, v)`.
///
/// # Returns
/// - `Ok` with `out` filled on success
/// - `NullPointer` if any buffer is null
/// - `InvalidShape` if either extent is below two
/// - `InvalidSpacing` if `dx` or `dy` is not finite and positive
///
/// # Safety
/// `scalar`, `u` and `v` must point to `nx * ny` readable values and `out`
/// to `nx * ny` writable values.
#[no_mangle]
pub unsafe extern "C" fn metcalc_advection_2d(
    scalar: *const f64,
    u: *const f64,
    v: *const f64,
    nx: usize,
    ny: usize,
    dx: f64,
    dy: f64,
    out: *mut f64,
) -> MetCalcErrorCode {
    ffi_call(|| {
        let scalar = input_2d(scalar, nx, ny, "scalar")?;
        let u = input_2d(u, nx, ny, "u")?;
        let v = input_2d(v, nx, ny, "v")?;
        let out = output(out, grid_len(nx, ny)?, "out")?;

        let tendency = advection(&scalar, Velocity::PerAxis(vec![u, v]), &[dx, dy])?;
        write_field(out, &tendency);
        Ok(())
    })
}

/// Geostrophic wind from a geopotential height field (m) and a single
/// Coriolis parameter `f` (1/s).
///
/// # Returns
/// - `Ok` with `out_u` and `out_v` filled on success
/// - `NullPointer` if any buffer is null
/// - `InvalidShape` if either extent is below two
/// - `InvalidSpacing` if `dx` or `dy` is not finite and positive
///
/// # Safety
/// `height` must point to `nx * ny` readable values; both outputs to
/// `nx * ny` writable values.
#[no_mangle]
pub unsafe extern "C" fn metcalc_geostrophic_wind(
    height: *const f64,
    nx: usize,
    ny: usize,
    f: f64,
    dx: f64,
    dy: f64,
    out_u: *mut f64,
    out_v: *mut f64,
) -> MetCalcErrorCode {
    ffi_call(|| {
        let height = input_2d(height, nx, ny, "height")?;
        let len = grid_len(nx, ny)?;
        let out_u = output(out_u, len, "out_u")?;
        let out_v = output(out_v, len, "out_v")?;

        let (u_geo, v_geo) = geostrophic_wind(&height, f, dx, dy)?;
        write_field(out_u, &u_geo);
        write_field(out_v, &v_geo);
        Ok(())
    })
}
