use std::ops::{AddAssign, Sub, SubAssign};

/// Numeric type usable as an entry of a cost matrix.
///
/// Any copyable, partially ordered number with a zero and closed
/// addition/subtraction qualifies, so integers (signed or unsigned) and
/// floats all work. Entries must additionally stay ordered after being
/// subtracted from themselves, which rules out `NaN` and infinities; see
/// [`Cost::is_supported`].
pub trait Cost:
    nalgebra::Scalar
    + Copy
    + PartialOrd
    + num_traits::Zero
    + Sub<Self, Output = Self>
    + AddAssign
    + SubAssign
{
    /// Returns `false` for values that have no ordering, such as `NaN`.
    #[inline]
    fn is_comparable(&self) -> bool {
        self.partial_cmp(self).is_some()
    }

    /// Returns `false` for values the reduction steps cannot work with:
    /// unordered ones, and ones whose difference with themselves is
    /// unordered (`inf - inf` is `NaN`).
    #[inline]
    fn is_supported(&self) -> bool {
        self.is_comparable() && (*self - *self).is_comparable()
    }
}

impl<T> Cost for T where
    T: nalgebra::Scalar
        + Copy
        + PartialOrd
        + num_traits::Zero
        + Sub<T, Output = T>
        + AddAssign
        + SubAssign
{
}

/// Sums the entries of `costs` at the given coordinates.
pub(crate) fn total<T, I>(costs: &nalgebra::DMatrix<T>, cells: I) -> T
where
    T: Cost,
    I: IntoIterator<Item = (usize, usize)>,
{
    cells
        .into_iter()
        .fold(T::zero(), |acc, cell| acc + costs[cell])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nan_is_not_comparable() {
        assert!(!f64::NAN.is_comparable());
        assert!(!f32::NAN.is_comparable());
    }

    #[test]
    fn ordinary_values_are_comparable() {
        assert!(0.5f64.is_comparable());
        assert!(f64::INFINITY.is_comparable());
        assert!((-3i32).is_comparable());
        assert!(7u8.is_comparable());
    }

    #[test]
    fn infinities_are_not_supported() {
        assert!(f64::INFINITY.is_comparable());
        assert!(!f64::INFINITY.is_supported());
        assert!(!f64::NEG_INFINITY.is_supported());
        assert!(!f32::NAN.is_supported());
        assert!(f64::MAX.is_supported());
        assert!((-4i64).is_supported());
        assert!(u32::MAX.is_supported());
    }

    #[test]
    fn total_sums_selected_cells() {
        #[rustfmt::skip]
        let costs = nalgebra::DMatrix::from_row_slice(2, 3, &[
            1, 2, 3,
            4, 5, 6,
        ]);
        assert_eq!(total(&costs, [(0, 2), (1, 0)]), 7);
        assert_eq!(total(&costs, std::iter::empty()), 0);
    }
}
