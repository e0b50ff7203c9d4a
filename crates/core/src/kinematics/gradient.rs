//! Finite-difference partial derivative along one axis of an n-dimensional field.
//!
//! Interior samples use second-order centered differences; the first and
//! last sample along the axis use first-order one-sided differences, so the
//! output always has the input's shape:
//!
//! ```text
//! d[0]   = (f[1]   - f[0])   / h[0]
//! d[i]   = (h0² f[i+1] - h1² f[i-1] + (h1² - h0²) f[i]) / (h0 h1 (h0 + h1))
//! d[n-1] = (f[n-1] - f[n-2]) / h[n-2]
//! ```
//!
//! where `h0 = h[i-1]` and `h1 = h[i]`. The interior stencil is exact for
//! quadratics on stretched grids; with uniform spacing `h` it reduces to
//! `(f[i+1] - f[i-1]) / 2h`.

use ndarray::{Array, ArrayBase, ArrayView1, ArrayViewMut1, Axis, Data, Dimension, Zip};
use tracing::trace;

use crate::error::{CalcError, Result};
use crate::field::{Field, Spacing};

/// Partial derivative of `field` along `axis`.
///
/// # Arguments
///
/// * `field` - Samples on a regular grid, rank >= 1
/// * `spacing` - Grid step along `axis`; an `f64` converts to uniform spacing
/// * `axis` - Index of the dimension to differentiate along
///
/// # Returns
///
/// Field of the same shape holding ∂field/∂axis at every sample.
///
/// # Errors
///
/// * `InvalidShape` - `axis` is out of range, or the field has fewer than two
///   samples along it
/// * `InvalidSpacing` - a step is not finite and positive, or a variable
///   spacing does not hold exactly one step per adjacent pair
///
/// # Example
///
/// ```
/// use metcalc_core::kinematics::gradient;
/// use ndarray::array;
///
/// let field = array![[1.0, 2.0, 4.0], [2.0, 4.0, 8.0]];
/// let d_dy = gradient(&field, 1.0, 1).unwrap();
/// assert_eq!(d_dy, array![[1.0, 1.5, 2.0], [2.0, 3.0, 4.0]]);
/// ```
pub fn gradient<S, D>(
    field: &ArrayBase<S, D>,
    spacing: impl Into<Spacing>,
    axis: usize,
) -> Result<Field<D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let spacing = spacing.into();

    if axis >= field.ndim() {
        return Err(CalcError::InvalidShape(format!(
            "axis {axis} is out of range for a field of shape {:?}",
            field.shape()
        )));
    }

    let extent = field.len_of(Axis(axis));
    if extent < 2 {
        return Err(CalcError::InvalidShape(format!(
            "at least 2 samples are needed along axis {axis} to difference, got shape {:?}",
            field.shape()
        )));
    }
    spacing.validate(extent)?;

    trace!(axis, extent, shape = ?field.shape(), "differencing along axis");

    let mut derivative: Field<D> = Array::zeros(field.raw_dim());
    Zip::from(derivative.lanes_mut(Axis(axis)))
        .and(field.lanes(Axis(axis)))
        .for_each(|out, lane| difference_lane(lane, out, &spacing));

    Ok(derivative)
}

/// Difference a single 1-D lane into `out`. `lane.len()` is at least 2.
fn difference_lane(lane: ArrayView1<'_, f64>, mut out: ArrayViewMut1<'_, f64>, spacing: &Spacing) {
    let n = lane.len();

    out[0] = (lane[1] - lane[0]) / spacing.step(0);
    match spacing {
        Spacing::Uniform(step) => {
            for i in 1..n - 1 {
                out[i] = (lane[i + 1] - lane[i - 1]) / (2.0 * step);
            }
        }
        Spacing::Variable(steps) => {
            for i in 1..n - 1 {
                let (h0, h1) = (steps[i - 1], steps[i]);
                out[i] = (h0 * h0 * lane[i + 1] - h1 * h1 * lane[i - 1]
                    + (h1 * h1 - h0 * h0) * lane[i])
                    / (h0 * h1 * (h0 + h1));
            }
        }
    }
    out[n - 1] = (lane[n - 1] - lane[n - 2]) / spacing.step(n - 2);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr0, array, Array2, Array3};

    #[test]
    fn test_linear_ramp_is_exact() {
        let field = array![0.0, 2.0, 4.0, 6.0, 8.0];
        let d = gradient(&field, 0.5, 0).unwrap();
        assert_eq!(d, array![4.0, 4.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_boundaries_are_one_sided() {
        // Quadratic: centered differences are exact in the interior, the ends are not
        let field = array![0.0, 1.0, 4.0, 9.0];
        let d = gradient(&field, 1.0, 0).unwrap();
        assert_eq!(d, array![1.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn test_two_samples_use_forward_and_backward_difference() {
        let field = array![1.0, 3.0];
        let d = gradient(&field, 2.0, 0).unwrap();
        assert_eq!(d, array![1.0, 1.0]);
    }

    #[test]
    fn test_axis_selection_on_2d() {
        // Varies only along axis 0
        let field = array![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]];
        assert_eq!(gradient(&field, 1.0, 0).unwrap(), Array2::from_elem((3, 3), 1.0));
        assert_eq!(gradient(&field, 1.0, 1).unwrap(), Array2::<f64>::zeros((3, 3)));
    }

    #[test]
    fn test_3d_field() {
        let field = Array3::from_shape_fn((2, 3, 4), |(i, j, k)| {
            (i as f64) + 10.0 * (j as f64) + 100.0 * (k as f64)
        });
        assert!(gradient(&field, 1.0, 0).unwrap().iter().all(|&v| v == 1.0));
        assert!(gradient(&field, 2.0, 1).unwrap().iter().all(|&v| v == 5.0));
        assert!(gradient(&field, 4.0, 2).unwrap().iter().all(|&v| v == 25.0));
    }

    #[test]
    fn test_variable_spacing() {
        // f = x at x = [0, 1, 3, 6]: exact slope of one everywhere
        let field = array![0.0, 1.0, 3.0, 6.0];
        let d = gradient(&field, vec![1.0, 2.0, 3.0], 0).unwrap();
        assert_eq!(d, array![1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_variable_spacing_exact_for_quadratic() {
        // f = x² at x = [0, 1, 3]: interior slope 2 despite unequal steps
        let field = array![0.0, 1.0, 9.0];
        let d = gradient(&field, vec![1.0, 2.0], 0).unwrap();
        assert_eq!(d, array![1.0, 2.0, 4.0]);

        // x = [0, 1, 3, 6]: interior slopes 2 and 6
        let field = array![0.0, 1.0, 9.0, 36.0];
        let d = gradient(&field, vec![1.0, 2.0, 3.0], 0).unwrap();
        assert_eq!(d, array![1.0, 2.0, 6.0, 9.0]);
    }

    #[test]
    fn test_variable_spacing_matches_uniform() {
        let field = array![[3.0, -1.0, 4.0], [1.0, 5.0, -9.0]];
        let uniform = gradient(&field, 0.25, 1).unwrap();
        let variable = gradient(&field, vec![0.25, 0.25], 1).unwrap();
        assert_eq!(uniform, variable);
    }

    #[test]
    fn test_rejects_short_axis() {
        let field = array![[1.0, 2.0, 3.0]];
        assert!(matches!(
            gradient(&field, 1.0, 0),
            Err(CalcError::InvalidShape(_))
        ));
        assert!(gradient(&field, 1.0, 1).is_ok());
    }

    #[test]
    fn test_rejects_scalar_and_bad_axis() {
        assert!(matches!(
            gradient(&arr0(1.0), 1.0, 0),
            Err(CalcError::InvalidShape(_))
        ));
        assert!(matches!(
            gradient(&array![1.0, 2.0], 1.0, 1),
            Err(CalcError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_rejects_bad_spacing() {
        let field = array![1.0, 2.0, 3.0];
        assert!(matches!(
            gradient(&field, 0.0, 0),
            Err(CalcError::InvalidSpacing(_))
        ));
        assert!(matches!(
            gradient(&field, vec![1.0], 0),
            Err(CalcError::InvalidSpacing(_))
        ));
    }

    #[test]
    fn test_works_on_views() {
        let field = array![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]];
        let d = gradient(&field.t(), 1.0, 1).unwrap();
        assert_eq!(d, array![[2.0, 2.0, 2.0], [2.0, 2.0, 2.0]]);
    }
}
