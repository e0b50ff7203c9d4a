//! Geostrophic wind from a geopotential height field.
//!
//! The geostrophic wind balances the pressure-gradient and Coriolis forces:
//!
//! - `u_g = -(g / f) ∂Z/∂y`
//! - `v_g =  (g / f) ∂Z/∂x`
//!
//! # References
//!
//! - J.R. Holton (2004). An Introduction to Dynamic Meteorology, 4th ed.,
//!   section 3.2.

use ndarray::{arr0, ArrayBase, ArrayD, Data, Dimension, Zip};
use tracing::debug;

use super::gradient::gradient;
use crate::constants::{G, OMEGA};
use crate::error::{CalcError, Result};
use crate::field::{ensure_2d, Field};

/// Coriolis parameter supplied to [`geostrophic_wind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Coriolis {
    /// Same value at every grid point (f-plane)
    Parameter(f64),
    /// Values broadcastable to the height field's shape, e.g. one per y index
    Field(ArrayD<f64>),
}

impl From<f64> for Coriolis {
    fn from(f: f64) -> Self {
        Coriolis::Parameter(f)
    }
}

impl<D: Dimension> From<Field<D>> for Coriolis {
    fn from(f: Field<D>) -> Self {
        Coriolis::Field(f.into_dyn())
    }
}

impl Coriolis {
    fn into_field(self) -> ArrayD<f64> {
        match self {
            Coriolis::Parameter(f) => arr0(f).into_dyn(),
            Coriolis::Field(f) => f,
        }
    }
}

/// Coriolis parameter `f = 2Ω sin(φ)` for latitudes in degrees.
///
/// Rank-preserving: a scalar latitude gives a scalar parameter, a grid of
/// latitudes gives a grid.
pub fn coriolis_parameter<S, D>(latitude: &ArrayBase<S, D>) -> Field<D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    latitude.mapv(|lat| 2.0 * OMEGA * lat.to_radians().sin())
}

/// Geostrophic wind components `(u_g, v_g)` of a 2-D height field.
///
/// # Arguments
///
/// * `height` - Geopotential height (m), axis 0 is x and axis 1 is y
/// * `f` - Coriolis parameter (1/s), constant or broadcastable to `height`
/// * `dx` - Grid spacing along axis 0 (m)
/// * `dy` - Grid spacing along axis 1 (m)
///
/// Passing `f = G` makes the `g / f` factor exactly one, which returns the
/// raw height gradients rotated into wind components.
///
/// # Errors
///
/// `InvalidShape` if `height` is not 2-D, has an axis with fewer than two
/// samples, or `f` does not broadcast to its shape.
pub fn geostrophic_wind<S, D>(
    height: &ArrayBase<S, D>,
    f: impl Into<Coriolis>,
    dx: f64,
    dy: f64,
) -> Result<(Field<D>, Field<D>)>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    ensure_2d("height field", height)?;

    let coriolis: Coriolis = f.into();
    let coriolis = coriolis.into_field();
    let f = coriolis.broadcast(height.raw_dim()).ok_or_else(|| {
        CalcError::InvalidShape(format!(
            "Coriolis parameter of shape {:?} does not broadcast to height field shape {:?}",
            coriolis.shape(),
            height.shape()
        ))
    })?;

    debug!(shape = ?height.shape(), dx, dy, "computing geostrophic wind");

    let dzdx = gradient(height, dx, 0)?;
    let dzdy = gradient(height, dy, 1)?;

    let u_g = Zip::from(&dzdy)
        .and(&f)
        .map_collect(|&grad, &f| -(G / f) * grad);
    let v_g = Zip::from(&dzdx)
        .and(&f)
        .map_collect(|&grad, &f| (G / f) * grad);

    Ok((u_g, v_g))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2};

    #[test]
    fn test_coriolis_parameter() {
        let f = coriolis_parameter(&array![0.0, 45.0, 90.0, -90.0]);
        assert_abs_diff_eq!(f[0], 0.0, epsilon = 1e-20);
        assert_abs_diff_eq!(f[1], 1.0313e-4, epsilon = 1e-8);
        assert_abs_diff_eq!(f[2], 2.0 * OMEGA, epsilon = 1e-20);
        assert_abs_diff_eq!(f[3], -2.0 * OMEGA, epsilon = 1e-20);

        let scalar = coriolis_parameter(&arr0(30.0));
        assert_abs_diff_eq!(scalar.into_scalar(), OMEGA, epsilon = 1e-12);
    }

    #[test]
    fn test_height_rising_northward_gives_easterly() {
        // Z increases along y: low to the south, so the wind blows from the east (u < 0)
        let z = Array2::from_shape_fn((3, 4), |(_, j)| 5500.0 + 10.0 * j as f64);
        let f = 1e-4;
        let (u_g, v_g) = geostrophic_wind(&z, f, 1e5, 1e5).unwrap();
        let expected = -(G / f) * 10.0 / 1e5;
        for &u in &u_g {
            assert_abs_diff_eq!(u, expected, epsilon = 1e-12);
        }
        assert!(v_g.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_coriolis_field_per_column() {
        // f varies along y only: a length-ny vector broadcasts across rows
        let z = Array2::from_shape_fn((3, 3), |(i, _)| 100.0 * i as f64);
        let f: Array1<f64> = array![G, 2.0 * G, 4.0 * G];
        let (_, v_g) = geostrophic_wind(&z, f, 1.0, 1.0).unwrap();
        assert_eq!(v_g.row(0), array![100.0, 50.0, 25.0]);
    }

    #[test]
    fn test_rejects_unbroadcastable_coriolis() {
        let z = Array2::<f64>::zeros((3, 3));
        let f = Array1::from_elem(2, 1e-4);
        assert!(matches!(
            geostrophic_wind(&z, f, 1.0, 1.0),
            Err(CalcError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_rejects_non_2d_height() {
        let z = array![1.0, 2.0, 3.0];
        assert!(matches!(
            geostrophic_wind(&z, 1e-4, 1.0, 1.0),
            Err(CalcError::InvalidShape(_))
        ));
    }
}
