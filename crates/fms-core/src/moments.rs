//! Running moments expressed as monoids.

use num_traits::Float;

use crate::monoid::Monoid;

/// Running mean over `(count, mean)` pairs.
///
/// Combining two summaries weights each mean by its count, so partial
/// averages can be merged in any grouping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Average;

impl Average {
    /// Summary of a single observation.
    pub fn observe<F: Float>(x: F) -> (F, F) {
        (F::one(), x)
    }
}

impl<F: Float> Monoid<(F, F)> for Average {
    fn identity(&self) -> (F, F) {
        (F::zero(), F::zero())
    }

    fn op(&self, (n1, m1): (F, F), (n2, m2): (F, F)) -> (F, F) {
        let n = n1 + n2;
        if n == F::zero() {
            return self.identity();
        }
        (n, (n1 * m1 + n2 * m2) / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monoid::fold;

    #[test]
    fn merges_partial_means() {
        let a = Average;
        let xs: Vec<(f64, f64)> = [1.0, 2.0, 3.0, 6.0].into_iter().map(Average::observe).collect();
        assert_eq!(fold(&a, &xs), (4.0, 3.0));
        let left = a.op(xs[0], xs[1]);
        let right = a.op(xs[2], xs[3]);
        assert_eq!(a.op(left, right), (4.0, 3.0));
    }

    #[test]
    fn empty_summaries_stay_empty() {
        let a = Average;
        let e: (f64, f64) = a.identity();
        assert_eq!(a.op(e, e), e);
        assert_eq!(a.op(e, (2.0, 5.0)), (2.0, 5.0));
    }
}
