//! C bindings for the meteorological calculations in `metcalc-core`.
//!
//! Every entry point takes caller-owned flat buffers, writes its results into
//! caller-owned output buffers and returns a [`MetCalcErrorCode`]. On failure
//! the message is available from [`metcalc_get_last_error`] on the same
//! thread; a successful call clears it.
//!
//! Grids are row-major `(nx, ny)`: x is the slow axis.

mod error;
mod helpers;
mod kinematics;
mod thermo;

pub use error::{metcalc_get_last_error, metcalc_get_last_error_code, MetCalcErrorCode};
pub use kinematics::{
    metcalc_advection_2d, metcalc_convergence_vorticity, metcalc_geostrophic_wind,
    metcalc_gradient_2d,
};
pub use thermo::{
    metcalc_dewpoint, metcalc_heat_index, metcalc_vapor_pressure, metcalc_wind_chill,
    metcalc_wind_components,
};
