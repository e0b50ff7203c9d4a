//! Field and spacing types shared by the kinematic and thermodynamic calculations.
//!
//! A field is any `ndarray` array of `f64` samples on a regular grid. The
//! dimension type parameter carries the rank, so rank-0 arrays (`Ix0`) are
//! the scalar case and every elementwise calculation preserves rank:
//! scalar in, scalar out; grid in, grid out.

use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::error::{CalcError, Result};

/// Owned n-dimensional field of samples.
pub type Field<D> = Array<f64, D>;

/// Convert integer (or any lossless-to-`f64`) observations into a floating point field.
///
/// # Example
///
/// ```
/// use metcalc_core::field::promote;
/// use ndarray::array;
///
/// let temps = promote(&array![5_i32, 10, 18]);
/// assert_eq!(temps, array![5.0, 10.0, 18.0]);
/// ```
pub fn promote<S, A, D>(values: &ArrayBase<S, D>) -> Field<D>
where
    S: Data<Elem = A>,
    A: Copy + Into<f64>,
    D: Dimension,
{
    values.mapv(Into::into)
}

/// Grid step along one axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Spacing {
    /// Same step between every pair of adjacent samples
    Uniform(f64),
    /// One step per adjacent pair: `n - 1` entries for an axis of extent `n`
    Variable(Vec<f64>),
}

impl From<f64> for Spacing {
    fn from(step: f64) -> Self {
        Spacing::Uniform(step)
    }
}

impl From<Vec<f64>> for Spacing {
    fn from(steps: Vec<f64>) -> Self {
        Spacing::Variable(steps)
    }
}

impl Spacing {
    /// Check every step is finite and positive, and that a variable spacing
    /// matches an axis of `extent` samples.
    pub(crate) fn validate(&self, extent: usize) -> Result<()> {
        match self {
            Spacing::Uniform(step) => check_step(*step),
            Spacing::Variable(steps) => {
                if steps.len() + 1 != extent {
                    return Err(CalcError::InvalidSpacing(format!(
                        "{} steps supplied for an axis of {extent} samples",
                        steps.len()
                    )));
                }
                steps.iter().try_for_each(|&step| check_step(step))
            }
        }
    }

    /// Distance between sample `i` and sample `i + 1`.
    #[inline]
    pub(crate) fn step(&self, i: usize) -> f64 {
        match self {
            Spacing::Uniform(step) => *step,
            Spacing::Variable(steps) => steps[i],
        }
    }
}

fn check_step(step: f64) -> Result<()> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(CalcError::InvalidSpacing(format!(
            "spacing must be finite and positive, got {step}"
        )))
    }
}

/// Fail with `InvalidShape` unless both inputs have the same shape.
pub(crate) fn ensure_same_shape<S1, S2, D>(
    lhs_name: &str,
    lhs: &ArrayBase<S1, D>,
    rhs_name: &str,
    rhs: &ArrayBase<S2, D>,
) -> Result<()>
where
    S1: Data,
    S2: Data,
    D: Dimension,
{
    if lhs.shape() == rhs.shape() {
        Ok(())
    } else {
        Err(CalcError::shape_mismatch(
            lhs_name,
            lhs.shape(),
            rhs_name,
            rhs.shape(),
        ))
    }
}

/// Fail with `InvalidShape` unless the input is a 2-D grid.
pub(crate) fn ensure_2d<S, D>(name: &str, field: &ArrayBase<S, D>) -> Result<()>
where
    S: Data,
    D: Dimension,
{
    if field.ndim() == 2 {
        Ok(())
    } else {
        Err(CalcError::InvalidShape(format!(
            "{name} must be 2-D, got shape {:?}",
            field.shape()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr0, array};

    #[test]
    fn test_promote_preserves_rank() {
        let scalar = promote(&arr0(7_u8));
        assert_eq!(scalar.ndim(), 0);
        assert_eq!(scalar.into_scalar(), 7.0);

        let grid = promote(&array![[1_i32, -2], [3, 4]]);
        assert_eq!(grid, array![[1.0, -2.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_spacing_validation() {
        assert!(Spacing::from(0.5).validate(3).is_ok());
        assert!(Spacing::from(0.0).validate(3).is_err());
        assert!(Spacing::from(-1.0).validate(3).is_err());
        assert!(Spacing::from(f64::NAN).validate(3).is_err());
        assert!(Spacing::from(f64::INFINITY).validate(3).is_err());

        assert!(Spacing::from(vec![1.0, 2.0]).validate(3).is_ok());
        assert!(Spacing::from(vec![1.0, 2.0]).validate(4).is_err());
        assert!(Spacing::from(vec![1.0, 0.0]).validate(3).is_err());
    }

    #[test]
    fn test_spacing_step_lookup() {
        assert_eq!(Spacing::Uniform(2.5).step(7), 2.5);
        assert_eq!(Spacing::Variable(vec![1.0, 3.0]).step(1), 3.0);
    }

    #[test]
    fn test_shape_checks() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert!(ensure_same_shape("a", &a, "a", &a).is_ok());
        assert!(matches!(
            ensure_same_shape("a", &a, "b", &b),
            Err(CalcError::InvalidShape(_))
        ));

        assert!(ensure_2d("a", &a).is_ok());
        assert!(ensure_2d("row", &array![1.0, 2.0]).is_err());
    }
}
