//! Fixed-point polynomial evaluation via Horner's scheme.

use crate::dynfixed::DynFixed;
use crate::policy::PolicyBundle;

/// A degree-`N-1` polynomial, coefficients ordered low-to-high degree
/// (`coeffs[0]` is the constant term).
#[derive(Debug, Clone, Copy)]
pub struct Poly<const N: usize> {
    coeffs: [DynFixed; N],
}

impl<const N: usize> Poly<N> {
    /// Builds a polynomial from its coefficients, low-to-high degree.
    ///
    /// # Panics
    /// Panics if `N == 0`: a polynomial needs at least a constant term.
    #[must_use]
    pub const fn new(coeffs: [DynFixed; N]) -> Self {
        assert!(N > 0, "Poly requires at least a constant term");
        Self { coeffs }
    }

    /// Evaluates the polynomial at `x` via Horner's scheme:
    /// `((c_{n-1}*x + c_{n-2})*x + ... )*x + c_0`.
    #[must_use]
    pub fn eval(&self, x: DynFixed, mul_bundle: &PolicyBundle, add_bundle: &PolicyBundle) -> DynFixed {
        let mut acc = self.coeffs[N - 1];
        for coeff in self.coeffs[..N - 1].iter().rev() {
            acc = acc.mul(x, mul_bundle).add(*coeff, add_bundle);
        }
        acc
    }
}
