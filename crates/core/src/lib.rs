//! Meteorological Calculations Core Library
//!
//! Derived atmospheric and kinematic quantities from scalar or gridded
//! observations, built on `ndarray` so that the same function accepts a
//! single value (`Array0`) or a grid of any rank and returns the same rank.
//!
//! ## Kinematics
//!
//! Finite-difference operators on regular grids (axis 0 = x, axis 1 = y):
//! - [`gradient`] along any axis, uniform or variable spacing
//! - [`convergence_vorticity`] / [`h_divergence`] / [`v_vorticity`]
//! - [`advection`] of a scalar by one or more velocity components
//! - [`geostrophic_wind`] from a height field and Coriolis parameter
//!
//! ## Thermodynamics and wind
//!
//! Elementwise formulas: vapor pressure, dewpoint, wind chill and heat index
//! (the last two return a [`Masked`] result flagging samples outside the
//! formula's range), and speed/direction to (u, v) conversion.

// Shared types and utilities
pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod masked;

// Calculations
pub mod kinematics;
pub mod thermo;
pub mod wind;

// Re-export common types
pub use config::{HeatIndexConfig, WindChillConfig};
pub use error::{CalcError, Result};
pub use field::{promote, Field, Spacing};
pub use masked::Masked;

// Re-export calculations
pub use kinematics::{
    advection, convergence_vorticity, coriolis_parameter, geostrophic_wind, gradient,
    h_divergence, v_vorticity, Coriolis, Velocity,
};
pub use thermo::{dewpoint, dewpoint_from_vapor_pressure, heat_index, vapor_pressure, wind_chill};
pub use wind::{wind_components, wind_speed_direction};
