//! Finite-difference kinematics on regular grids.
//!
//! Every operator here is built on [`gradient`], which differentiates one
//! axis at a time:
//!
//! - [`convergence_vorticity`], [`h_divergence`], [`v_vorticity`] - wind field
//!   divergence and relative vorticity
//! - [`advection`] - transport of a scalar by one or more velocity components
//! - [`geostrophic_wind`] - wind in balance with a height field
//!
//! Axis 0 is x and axis 1 is y throughout.

pub mod advection;
pub mod divergence;
pub mod geostrophic;
pub mod gradient;

pub use advection::{advection, Velocity};
pub use divergence::{convergence_vorticity, h_divergence, v_vorticity};
pub use geostrophic::{coriolis_parameter, geostrophic_wind, Coriolis};
pub use gradient::gradient;
