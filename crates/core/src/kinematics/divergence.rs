//! Horizontal divergence and relative vorticity of a 2-D wind field.
//!
//! Axis 0 of every grid is x and axis 1 is y:
//!
//! - divergence = ∂u/∂x + ∂v/∂y
//! - vorticity  = ∂v/∂x − ∂u/∂y

use ndarray::{ArrayBase, Data, Dimension};
use tracing::debug;

use super::gradient::gradient;
use crate::error::Result;
use crate::field::{ensure_2d, ensure_same_shape, Field};

/// Divergence and vorticity of the wind `(u, v)` in one pass.
///
/// The first field is the raw horizontal divergence `∂u/∂x + ∂v/∂y`;
/// negate it to obtain convergence. The second is the relative vorticity
/// `∂v/∂x − ∂u/∂y`.
///
/// # Arguments
///
/// * `u` - x-component of the wind, 2-D
/// * `v` - y-component of the wind, same shape as `u`
/// * `dx` - Grid spacing along axis 0
/// * `dy` - Grid spacing along axis 1
///
/// # Errors
///
/// `InvalidShape` if `u` and `v` differ in shape, are not 2-D, or either
/// axis has fewer than two samples. `InvalidSpacing` for a non-positive step.
///
/// # Example
///
/// ```
/// use metcalc_core::kinematics::convergence_vorticity;
/// use ndarray::Array2;
///
/// // Solid-body rotation u = -y, v = x has zero divergence and vorticity 2
/// let u = Array2::from_shape_fn((4, 4), |(_, j)| -(j as f64));
/// let v = Array2::from_shape_fn((4, 4), |(i, _)| i as f64);
/// let (div, vort) = convergence_vorticity(&u, &v, 1.0, 1.0).unwrap();
/// assert!(div.iter().all(|&d| d == 0.0));
/// assert!(vort.iter().all(|&z| z == 2.0));
/// ```
pub fn convergence_vorticity<S1, S2, D>(
    u: &ArrayBase<S1, D>,
    v: &ArrayBase<S2, D>,
    dx: f64,
    dy: f64,
) -> Result<(Field<D>, Field<D>)>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    validate_wind(u, v)?;
    debug!(shape = ?u.shape(), dx, dy, "computing divergence and vorticity");

    let dudx = gradient(u, dx, 0)?;
    let dudy = gradient(u, dy, 1)?;
    let dvdx = gradient(v, dx, 0)?;
    let dvdy = gradient(v, dy, 1)?;

    Ok((dudx + dvdy, dvdx - dudy))
}

/// Horizontal divergence `∂u/∂x + ∂v/∂y`.
///
/// # Errors
///
/// Same conditions as [`convergence_vorticity`].
pub fn h_divergence<S1, S2, D>(
    u: &ArrayBase<S1, D>,
    v: &ArrayBase<S2, D>,
    dx: f64,
    dy: f64,
) -> Result<Field<D>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    validate_wind(u, v)?;
    debug!(shape = ?u.shape(), dx, dy, "computing horizontal divergence");

    Ok(gradient(u, dx, 0)? + gradient(v, dy, 1)?)
}

/// Relative (vertical) vorticity `∂v/∂x − ∂u/∂y`.
///
/// # Errors
///
/// Same conditions as [`convergence_vorticity`].
pub fn v_vorticity<S1, S2, D>(
    u: &ArrayBase<S1, D>,
    v: &ArrayBase<S2, D>,
    dx: f64,
    dy: f64,
) -> Result<Field<D>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    validate_wind(u, v)?;
    debug!(shape = ?u.shape(), dx, dy, "computing vertical vorticity");

    Ok(gradient(v, dx, 0)? - gradient(u, dy, 1)?)
}

fn validate_wind<S1, S2, D>(u: &ArrayBase<S1, D>, v: &ArrayBase<S2, D>) -> Result<()>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    ensure_2d("u", u)?;
    ensure_same_shape("u", u, "v", v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use ndarray::{array, Array2, Array3};

    #[test]
    fn test_split_functions_match_combined() {
        let u = array![[1.0, 4.0, 2.0], [0.5, -3.0, 7.0], [2.0, 2.0, 1.0]];
        let v = array![[-2.0, 1.0, 0.0], [3.0, 3.0, -1.0], [6.0, 0.0, 4.0]];

        let (div, vort) = convergence_vorticity(&u, &v, 2.0, 0.5).unwrap();
        assert_eq!(h_divergence(&u, &v, 2.0, 0.5).unwrap(), div);
        assert_eq!(v_vorticity(&u, &v, 2.0, 0.5).unwrap(), vort);
    }

    #[test]
    fn test_pure_shear() {
        // u = y: no divergence, vorticity -1
        let u = Array2::from_shape_fn((3, 5), |(_, j)| j as f64);
        let v = Array2::zeros((3, 5));
        let (div, vort) = convergence_vorticity(&u, &v, 1.0, 1.0).unwrap();
        assert!(div.iter().all(|&d| d == 0.0));
        assert!(vort.iter().all(|&z| z == -1.0));
    }

    #[test]
    fn test_shape_mismatch() {
        let u = Array2::<f64>::zeros((3, 3));
        let v = Array2::<f64>::zeros((3, 4));
        assert!(matches!(
            convergence_vorticity(&u, &v, 1.0, 1.0),
            Err(CalcError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_rejects_non_2d() {
        let u = Array3::<f64>::zeros((3, 3, 3));
        assert!(matches!(
            h_divergence(&u, &u, 1.0, 1.0),
            Err(CalcError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_rejects_degenerate_axis() {
        let u = Array2::<f64>::zeros((1, 4));
        assert!(matches!(
            v_vorticity(&u, &u, 1.0, 1.0),
            Err(CalcError::InvalidShape(_))
        ));
    }
}
