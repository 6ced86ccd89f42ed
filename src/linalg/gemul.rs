//! `Qgemul`: general matrix-matrix multiply.
//!
//! Shapes are enforced by the type checker: `a: Matrix<M, K>` and
//! `b: Matrix<K, N>` share the const generic `K`, so a caller cannot even
//! construct a call with a mismatched inner dimension. A transposed
//! operand is produced by calling [`crate::matrix::Matrix::transpose`]
//! before invoking this kernel rather than by a runtime transpose flag.

use crate::format::DynFormat;
use crate::matrix::Matrix;
use crate::policy::GemulArgs;
use crate::reduce::qreduce;

/// Computes `A * B`, reducing each output element's partial-product row
/// through [`qreduce`] so the same per-layer bundle semantics apply to the
/// accumulation as everywhere else in the crate.
#[must_use]
pub fn qgemul<const M: usize, const K: usize, const N: usize>(
    a: &Matrix<M, K>,
    b: &Matrix<K, N>,
    out_format: DynFormat,
    args: &GemulArgs,
) -> Matrix<M, N> {
    Matrix::from_fn(out_format, |r, c| {
        let terms: Vec<_> = (0..K).map(|k| a.at(r, k).mul(b.at(k, c), &args.mul)).collect();
        qreduce(&terms, core::slice::from_ref(&args.add)).cast_to(out_format)
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::format::{OvfMode, RndMode};

    fn fmt() -> DynFormat {
        DynFormat::try_new(12, 8, true, RndMode::Tcpl, OvfMode::SatTcpl).unwrap()
    }

    // Identity times a scaled matrix returns the scaled matrix unchanged.
    #[test]
    fn multiplying_by_identity_is_a_no_op() {
        let identity = Matrix::<3, 3>::from_reals(
            fmt(),
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        );
        let a = Matrix::<3, 3>::from_reals(
            fmt(),
            [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]],
        );
        let out = qgemul(&a, &identity, fmt(), &GemulArgs::default());
        for r in 0..3 {
            for c in 0..3 {
                assert!((out.at(r, c).to_f64() - a.at(r, c).to_f64()).abs() < 1e-2);
            }
        }
    }

    #[test]
    fn transpose_composes_with_gemul_for_at_times_b() {
        let a = Matrix::<2, 3>::from_reals(fmt(), [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = Matrix::<2, 2>::from_reals(fmt(), [[1.0, 0.0], [0.0, 1.0]]);
        let at = a.transpose();
        let out = qgemul(&at, &b, fmt(), &GemulArgs::default());
        assert_eq!(out.shape(), (3, 2));
        assert!((out.at(0, 0).to_f64() - 1.0).abs() < 1e-2);
    }

    #[test]
    fn rectangular_product_matches_hand_computation() {
        let a = Matrix::<2, 2>::from_reals(fmt(), [[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix::<2, 2>::from_reals(fmt(), [[5.0, 6.0], [7.0, 8.0]]);
        let out = qgemul(&a, &b, fmt(), &GemulArgs::default());
        // [[1*5+2*7, 1*6+2*8], [3*5+4*7, 3*6+4*8]] = [[19,22],[43,50]]
        assert!((out.at(0, 0).to_f64() - 19.0).abs() < 1e-2);
        assert!((out.at(0, 1).to_f64() - 22.0).abs() < 1e-2);
        assert!((out.at(1, 0).to_f64() - 43.0).abs() < 1e-2);
        assert!((out.at(1, 1).to_f64() - 50.0).abs() < 1e-2);
    }
}
