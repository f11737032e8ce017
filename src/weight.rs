/*!
# Edge Weights

Weighted algorithms need to add weights, compare them and start from an additive identity.
Any type offering these operations is a [`Weight`]; integers and floats work out of the box.

There is no "infinity" value: unreachable distances are reported as `None`, so adding to
infinity can never overflow. Negative weights are accepted by the graphs but shortest-path
results on them are unspecified.
*/

use std::{fmt::Debug, ops::Add};

use num::Zero;

/// Helper trait for values that can be used as edge weights
pub trait Weight: Copy + Debug + PartialOrd + Add<Output = Self> + Zero {
    /// Returns *true* if `self` is strictly smaller than `other`.
    /// Incomparable values (e.g. `NaN`) are never smaller.
    #[inline]
    fn is_less(&self, other: &Self) -> bool {
        self.lt(other)
    }

    /// Adds an optional distance and a weight, propagating `None` as infinity
    #[inline]
    fn add_to(self, distance: Option<Self>) -> Option<Self> {
        distance.map(|d| d + self)
    }
}

impl<W> Weight for W where W: Copy + Debug + PartialOrd + Add<Output = W> + Zero {}

/// Returns *true* if a tentative distance `candidate` improves on `current`,
/// where `None` means infinity.
#[inline]
pub(crate) fn improves<W: Weight>(candidate: W, current: Option<W>) -> bool {
    current.is_none_or(|c| candidate.is_less(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn improvement_treats_none_as_infinity() {
        assert!(improves(5, None));
        assert!(improves(4, Some(5)));
        assert!(!improves(5, Some(5)));
        assert!(!improves(f64::NAN, Some(1.0)));
        assert_eq!(3.add_to(Some(4)), Some(7));
        assert_eq!(3.add_to(None), None);
    }
}
