//! `Qsytrf`: `LDL^T` factorization of a symmetric matrix.
//!
//! Unlike [`Qpotrf`](crate::linalg::potrf::qpotrf), this factorization
//! works for indefinite matrices too (no square root is needed), so it
//! divides by the pivot directly rather than pre-computing a reciprocal.

use crate::dynfixed::DynFixed;
use crate::format::DynFormat;
use crate::matrix::{Matrix, Vector};
use crate::policy::SytrfArgs;
use crate::reduce::qreduce;

/// Result of an `LDL^T` factorization attempt.
#[derive(Debug, Clone, Copy)]
pub enum SytrfOutcome<const N: usize> {
    /// Factorization succeeded: `l` is unit lower triangular (diagonal
    /// entries are exactly one), `d` holds the diagonal pivots.
    Factored {
        /// Unit lower-triangular factor.
        l: Matrix<N, N>,
        /// Diagonal pivots.
        d: Vector<N>,
    },
    /// The `pivot`-th diagonal entry quantized to exactly zero, so no
    /// further column could be eliminated.
    ZeroPivot {
        /// Index of the pivot that quantized to zero.
        pivot: usize,
    },
}

/// Factorizes symmetric `a` (only its lower triangle is read) into `L` and
/// `D` such that `a = L * D * L^T`.
#[must_use]
pub fn qsytrf<const N: usize>(
    a: &Matrix<N, N>,
    out_format: DynFormat,
    args: &SytrfArgs,
) -> SytrfOutcome<N> {
    let mul_bundle = &args.mul;
    let add_bundle = &args.add;
    let mut l = Matrix::<N, N>::zeros(out_format);
    let mut d = Vector::<N>::zeros(out_format);
    let one = DynFixed::new(1i32 << out_format.frac_bits, out_format);

    for j in 0..N {
        let terms: Vec<_> = (0..j)
            .map(|k| l.at(j, k).mul(l.at(j, k), mul_bundle).mul(d.at(k, 0), mul_bundle))
            .collect();
        let correction = if terms.is_empty() {
            DynFixed::zero(out_format)
        } else {
            qreduce(&terms, core::slice::from_ref(add_bundle))
        };
        let dj = a.at(j, j).sub(correction, add_bundle).cast_to(out_format);
        if dj.data == 0 {
            return SytrfOutcome::ZeroPivot { pivot: j };
        }
        d.set(j, 0, dj);
        l.set(j, j, one);

        for i in (j + 1)..N {
            let terms: Vec<_> = (0..j)
                .map(|k| l.at(i, k).mul(l.at(j, k), mul_bundle).mul(d.at(k, 0), mul_bundle))
                .collect();
            let correction = if terms.is_empty() {
                DynFixed::zero(out_format)
            } else {
                qreduce(&terms, core::slice::from_ref(add_bundle))
            };
            let numer = a.at(i, j).sub(correction, add_bundle).cast_to(out_format);
            let lij = numer.div(dj, mul_bundle).cast_to(out_format);
            l.set(i, j, lij);
        }
    }
    SytrfOutcome::Factored { l, d }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::format::{OvfMode, RndMode};

    fn fmt() -> DynFormat {
        DynFormat::try_new(8, 16, true, RndMode::Tcpl, OvfMode::SatTcpl).unwrap()
    }

    #[test]
    fn factors_a_symmetric_indefinite_matrix() {
        // A = [[4, 2], [2, 1]] -> d0 = 4, l10 = 2/4 = 0.5, d1 = 1 - 0.5^2*4 = 0
        // choose a matrix with a nonzero second pivot instead:
        let a = Matrix::<2, 2>::from_reals(fmt(), [[4.0, 2.0], [2.0, 3.0]]);
        let outcome = qsytrf(&a, fmt(), &SytrfArgs::default());
        match outcome {
            SytrfOutcome::Factored { l, d } => {
                assert!((l.at(1, 0).to_f64() - 0.5).abs() < 1e-2);
                assert!((d.at(0, 0).to_f64() - 4.0).abs() < 1e-2);
                // d1 = 3 - 0.5^2 * 4 = 2
                assert!((d.at(1, 0).to_f64() - 2.0).abs() < 1e-2);
            }
            SytrfOutcome::ZeroPivot { .. } => panic!("expected a successful factorization"),
        }
    }

    #[test]
    fn reports_a_zero_pivot() {
        let a = Matrix::<2, 2>::from_reals(fmt(), [[4.0, 2.0], [2.0, 1.0]]);
        let outcome = qsytrf(&a, fmt(), &SytrfArgs::default());
        assert!(matches!(outcome, SytrfOutcome::ZeroPivot { pivot: 1 }));
    }
}
