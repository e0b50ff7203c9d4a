//! Data plus validity mask for formulas defined only over part of their input range.

use ndarray::{Array, Dimension, Zip};

use crate::error::{CalcError, Result};
use crate::field::Field;

/// A field paired with an optional mask of the same shape.
///
/// `true` in the mask marks a sample that lies outside the formula's domain
/// of validity. The data value is still computed for those samples; the mask
/// only flags them. A mask of `None` means masking was disabled and every
/// sample should be treated as valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Masked<D: Dimension> {
    data: Field<D>,
    mask: Option<Array<bool, D>>,
}

impl<D: Dimension> Masked<D> {
    /// Pair data with a mask.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if the mask and data shapes differ.
    pub fn new(data: Field<D>, mask: Array<bool, D>) -> Result<Self> {
        if data.shape() != mask.shape() {
            return Err(CalcError::shape_mismatch(
                "data",
                data.shape(),
                "mask",
                mask.shape(),
            ));
        }
        Ok(Self {
            data,
            mask: Some(mask),
        })
    }

    /// Wrap data with no mask.
    #[must_use]
    pub fn unmasked(data: Field<D>) -> Self {
        Self { data, mask: None }
    }

    /// Computed values, including those flagged as out of range.
    pub fn data(&self) -> &Field<D> {
        &self.data
    }

    /// The mask, if masking was enabled.
    pub fn mask(&self) -> Option<&Array<bool, D>> {
        self.mask.as_ref()
    }

    /// Number of flagged samples.
    pub fn masked_count(&self) -> usize {
        self.mask
            .as_ref()
            .map_or(0, |mask| mask.iter().filter(|&&m| m).count())
    }

    /// Copy of the data with flagged samples replaced by `fill`.
    #[must_use]
    pub fn filled(&self, fill: f64) -> Field<D> {
        match &self.mask {
            Some(mask) => Zip::from(&self.data)
                .and(mask)
                .map_collect(|&value, &masked| if masked { fill } else { value }),
            None => self.data.clone(),
        }
    }

    /// Split into data and mask.
    pub fn into_parts(self) -> (Field<D>, Option<Array<bool, D>>) {
        (self.data, self.mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_new_rejects_mismatched_mask() {
        let result = Masked::new(array![1.0, 2.0], array![true, false, true]);
        assert!(matches!(result, Err(CalcError::InvalidShape(_))));
    }

    #[test]
    fn test_filled_replaces_flagged_samples() {
        let masked = Masked::new(array![1.0, 2.0, 3.0], array![false, true, false]).unwrap();
        assert_eq!(masked.masked_count(), 1);
        assert_eq!(masked.filled(f64::NAN)[0], 1.0);
        assert!(masked.filled(f64::NAN)[1].is_nan());
        assert_eq!(masked.filled(-99.0), array![1.0, -99.0, 3.0]);
    }

    #[test]
    fn test_unmasked_has_no_mask() {
        let masked = Masked::unmasked(array![[1.0, 2.0]]);
        assert!(masked.mask().is_none());
        assert_eq!(masked.masked_count(), 0);
        let (data, mask) = masked.into_parts();
        assert_eq!(data, array![[1.0, 2.0]]);
        assert!(mask.is_none());
    }
}
