//! Advection of a scalar field by a velocity field.
//!
//! The advective tendency is the local rate of change of a scalar due to
//! transport: `-Σ_i v_i ∂s/∂x_i`, summed over the axes for which a velocity
//! component is supplied.

use ndarray::{Array, ArrayBase, ArrayView, Data, Dimension, Zip};
use tracing::debug;

use super::gradient::gradient;
use crate::error::{CalcError, Result};
use crate::field::{ensure_same_shape, Field};

/// Velocity components paired with the axes of the advected field.
#[derive(Debug, Clone)]
pub enum Velocity<'a, D: Dimension> {
    /// A single component acting along axis 0
    Single(ArrayView<'a, f64, D>),
    /// One component per axis, in axis order: component `i` acts along axis `i`
    PerAxis(Vec<ArrayView<'a, f64, D>>),
}

impl<'a, D: Dimension> Velocity<'a, D> {
    /// Components in axis order.
    fn into_components(self) -> Vec<ArrayView<'a, f64, D>> {
        match self {
            Velocity::Single(component) => vec![component],
            Velocity::PerAxis(components) => components,
        }
    }
}

impl<'a, D: Dimension> From<ArrayView<'a, f64, D>> for Velocity<'a, D> {
    fn from(component: ArrayView<'a, f64, D>) -> Self {
        Velocity::Single(component)
    }
}

impl<'a, D: Dimension> From<Vec<ArrayView<'a, f64, D>>> for Velocity<'a, D> {
    fn from(components: Vec<ArrayView<'a, f64, D>>) -> Self {
        Velocity::PerAxis(components)
    }
}

/// Advective tendency of `scalar` under `velocity`.
///
/// For each component `i`, the gradient of `scalar` along axis `i` (with
/// `spacings[i]`) is weighted by the component and subtracted from the total.
///
/// # Arguments
///
/// * `scalar` - Field being transported
/// * `velocity` - One component, or one per axis in axis order
/// * `spacings` - Grid step for each component's axis
///
/// # Errors
///
/// * `InvalidSpacingCount` - `spacings` and `velocity` have different lengths
/// * `InvalidShape` - no components, more components than axes, a component
///   shaped differently from `scalar`, or an axis with fewer than two samples
/// * `InvalidSpacing` - a non-positive step
///
/// # Example
///
/// ```
/// use metcalc_core::kinematics::{advection, Velocity};
/// use ndarray::array;
///
/// let temperature = array![10.0, 12.0, 14.0];
/// let wind = array![5.0, 5.0, 5.0];
/// let tendency = advection(&temperature, Velocity::Single(wind.view()), &[2.0]).unwrap();
/// assert_eq!(tendency, array![-5.0, -5.0, -5.0]);
/// ```
pub fn advection<S, D>(
    scalar: &ArrayBase<S, D>,
    velocity: Velocity<'_, D>,
    spacings: &[f64],
) -> Result<Field<D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let components = velocity.into_components();

    if components.len() != spacings.len() {
        return Err(CalcError::InvalidSpacingCount {
            expected: components.len(),
            found: spacings.len(),
        });
    }
    if components.is_empty() {
        return Err(CalcError::InvalidShape(
            "advection needs at least one velocity component".into(),
        ));
    }
    if components.len() > scalar.ndim() {
        return Err(CalcError::InvalidShape(format!(
            "{} velocity components for a field of shape {:?}",
            components.len(),
            scalar.shape()
        )));
    }
    for component in &components {
        ensure_same_shape("velocity component", component, "scalar field", scalar)?;
    }

    debug!(
        shape = ?scalar.shape(),
        components = components.len(),
        "computing advection"
    );

    let mut total: Field<D> = Array::zeros(scalar.raw_dim());
    for (axis, (component, &spacing)) in components.iter().zip(spacings).enumerate() {
        let grad = gradient(scalar, spacing, axis)?;
        Zip::from(&mut total)
            .and(component)
            .and(&grad)
            .for_each(|t, &v, &g| *t -= v * g);
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_opposite_wind_reverses_sign() {
        let s = array![0.0, 1.0, 4.0, 9.0];
        let east = array![2.0, 2.0, 2.0, 2.0];
        let west = -&east;
        let a = advection(&s, east.view().into(), &[1.0]).unwrap();
        let b = advection(&s, west.view().into(), &[1.0]).unwrap();
        assert_eq!(a, -b);
    }

    #[test]
    fn test_per_axis_single_component_matches_single() {
        let s = array![[1.0, 3.0], [2.0, 7.0], [5.0, 0.0]];
        let u = array![[1.0, -1.0], [0.5, 2.0], [3.0, 1.0]];
        let single = advection(&s, Velocity::Single(u.view()), &[2.0]).unwrap();
        let per_axis = advection(&s, Velocity::PerAxis(vec![u.view()]), &[2.0]).unwrap();
        assert_eq!(single, per_axis);
    }

    #[test]
    fn test_spacing_count_mismatch() {
        let s = Array2::<f64>::zeros((3, 3));
        let u = Array2::<f64>::ones((3, 3));
        let result = advection(&s, vec![u.view(), u.view()].into(), &[1.0]);
        assert_eq!(
            result,
            Err(CalcError::InvalidSpacingCount {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_component_shape_mismatch() {
        let s = Array2::<f64>::zeros((3, 3));
        let u = Array2::<f64>::ones((3, 4));
        assert!(matches!(
            advection(&s, u.view().into(), &[1.0]),
            Err(CalcError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_too_many_components() {
        let s = array![1.0, 2.0, 3.0];
        let u = array![1.0, 1.0, 1.0];
        assert!(matches!(
            advection(&s, vec![u.view(), u.view()].into(), &[1.0, 1.0]),
            Err(CalcError::InvalidShape(_))
        ));
    }

    #[test]
    fn test_empty_components() {
        let s = array![1.0, 2.0, 3.0];
        assert!(matches!(
            advection(&s, Velocity::PerAxis(Vec::new()), &[]),
            Err(CalcError::InvalidShape(_))
        ));
    }
}
