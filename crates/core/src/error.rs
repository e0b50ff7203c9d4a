//! Error type shared by every calculation in the crate.

use std::fmt;

/// Errors raised when inputs to a calculation are malformed.
///
/// All failures are deterministic: the same inputs always produce the same
/// error, so callers should fix the inputs rather than retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Combined inputs have incompatible shapes, a field has the wrong rank,
    /// or a differentiated axis is missing or shorter than two samples.
    InvalidShape(String),
    /// Advection received a different number of spacings than velocity components.
    InvalidSpacingCount {
        /// Number of velocity components supplied
        expected: usize,
        /// Number of spacings supplied
        found: usize,
    },
    /// A grid spacing was non-positive, non-finite, or had the wrong number of steps.
    InvalidSpacing(String),
}

impl CalcError {
    /// Shape mismatch between two named inputs.
    pub(crate) fn shape_mismatch(
        lhs: &str,
        lhs_shape: &[usize],
        rhs: &str,
        rhs_shape: &[usize],
    ) -> Self {
        CalcError::InvalidShape(format!(
            "{lhs} has shape {lhs_shape:?} but {rhs} has shape {rhs_shape:?}"
        ))
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::InvalidShape(msg) => write!(f, "Invalid shape: {msg}"),
            CalcError::InvalidSpacingCount { expected, found } => write!(
                f,
                "Invalid spacing count: expected {expected} spacings for {expected} velocity components, got {found}"
            ),
            CalcError::InvalidSpacing(msg) => write!(f, "Invalid spacing: {msg}"),
        }
    }
}

impl std::error::Error for CalcError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CalcError::shape_mismatch("u", &[3, 3], "v", &[3, 4]);
        assert_eq!(
            err.to_string(),
            "Invalid shape: u has shape [3, 3] but v has shape [3, 4]"
        );

        let err = CalcError::InvalidSpacingCount {
            expected: 2,
            found: 1,
        };
        assert!(err.to_string().contains("got 1"));
    }

    #[test]
    fn test_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&CalcError::InvalidSpacing("spacing must be positive, got 0".into()));
    }
}
