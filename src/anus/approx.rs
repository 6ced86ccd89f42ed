//! Piecewise-polynomial approximation, dispatching on sorted breakpoints.

use core::cmp::Ordering;

use crate::anus::poly::Poly;
use crate::dynfixed::DynFixed;
use crate::policy::PolicyBundle;

/// A piecewise polynomial: `breakpoints.len() + 1` segments, each a
/// degree-`N-1` [`Poly`]. `breakpoints` must be sorted ascending.
#[derive(Debug, Clone)]
pub struct Approx<const N: usize> {
    breakpoints: Vec<DynFixed>,
    polys: Vec<Poly<N>>,
}

impl<const N: usize> Approx<N> {
    /// Builds a piecewise approximation from its breakpoints and segment
    /// polynomials.
    ///
    /// # Panics
    /// Panics unless `polys.len() == breakpoints.len() + 1`.
    #[must_use]
    pub fn new(breakpoints: Vec<DynFixed>, polys: Vec<Poly<N>>) -> Self {
        assert_eq!(
            polys.len(),
            breakpoints.len() + 1,
            "Approx needs exactly one more polynomial than breakpoints"
        );
        Self { breakpoints, polys }
    }

    /// Evaluates the segment polynomial whose interval contains `x`.
    #[must_use]
    pub fn eval(&self, x: DynFixed, mul_bundle: &PolicyBundle, add_bundle: &PolicyBundle) -> DynFixed {
        let mut segment = 0;
        for bp in &self.breakpoints {
            if matches!(x.cmp3(*bp), Ordering::Greater) {
                segment += 1;
            } else {
                break;
            }
        }
        self.polys[segment].eval(x, mul_bundle, add_bundle)
    }
}
