//! `Qgramul`: Gram-matrix products `A^T*A` and `A*A^T`.
//!
//! The result is always symmetric, so the diagonal and off-diagonal
//! entries are allowed to accumulate under distinct policy bundles — e.g. a
//! datapath might keep full precision on the diagonal (used for pivoting)
//! while saturating the off-diagonal entries to a narrower storage format.

use crate::format::DynFormat;
use crate::matrix::Matrix;
use crate::policy::GramulArgs;
use crate::reduce::qreduce;

/// Computes `A^T * A` for `a: Matrix<K, N>`, producing a symmetric
/// `Matrix<N, N>`.
#[must_use]
pub fn qgramul_ata<const K: usize, const N: usize>(
    a: &Matrix<K, N>,
    out_format: DynFormat,
    args: &GramulArgs,
) -> Matrix<N, N> {
    Matrix::from_fn(out_format, |r, c| {
        let (mul_bundle, add_bundle) = if r == c {
            (&args.diag_mul, &args.diag_add)
        } else {
            (&args.off_mul, &args.off_add)
        };
        let terms: Vec<_> = (0..K).map(|k| a.at(k, r).mul(a.at(k, c), mul_bundle)).collect();
        qreduce(&terms, core::slice::from_ref(add_bundle)).cast_to(out_format)
    })
}

/// Computes `A * A^T` for `a: Matrix<M, K>`, producing a symmetric
/// `Matrix<M, M>`.
#[must_use]
pub fn qgramul_aat<const M: usize, const K: usize>(
    a: &Matrix<M, K>,
    out_format: DynFormat,
    args: &GramulArgs,
) -> Matrix<M, M> {
    Matrix::from_fn(out_format, |r, c| {
        let (mul_bundle, add_bundle) = if r == c {
            (&args.diag_mul, &args.diag_add)
        } else {
            (&args.off_mul, &args.off_add)
        };
        let terms: Vec<_> = (0..K).map(|k| a.at(r, k).mul(a.at(c, k), mul_bundle)).collect();
        qreduce(&terms, core::slice::from_ref(add_bundle)).cast_to(out_format)
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::format::{OvfMode, RndMode};
    use crate::policy::PolicyBundle;

    fn fmt() -> DynFormat {
        DynFormat::try_new(12, 8, true, RndMode::Tcpl, OvfMode::SatTcpl).unwrap()
    }

    #[test]
    fn ata_is_symmetric() {
        let a = Matrix::<3, 2>::from_reals(fmt(), [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let out = qgramul_ata(&a, fmt(), &GramulArgs::default());
        assert!((out.at(0, 1).to_f64() - out.at(1, 0).to_f64()).abs() < 1e-3);
    }

    #[test]
    fn ata_diagonal_matches_column_norms() {
        let a = Matrix::<2, 2>::from_reals(fmt(), [[3.0, 0.0], [4.0, 0.0]]);
        let out = qgramul_ata(&a, fmt(), &GramulArgs::default());
        // column 0 is (3,4), squared-norm 25
        assert!((out.at(0, 0).to_f64() - 25.0).abs() < 1e-2);
        assert!((out.at(1, 1).to_f64() - 0.0).abs() < 1e-6);
    }

    #[test]
    fn aat_is_symmetric() {
        let a = Matrix::<2, 3>::from_reals(fmt(), [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let out = qgramul_aat(&a, fmt(), &GramulArgs::default());
        assert!((out.at(0, 1).to_f64() - out.at(1, 0).to_f64()).abs() < 1e-3);
    }

    #[test]
    fn diagonal_multiply_bundle_is_independent_of_off_diagonal() {
        // A 2x2 all-ones input: every dot product sums two equal terms, so
        // giving the diagonal multiply full precision (widened product) and
        // the off-diagonal multiply a deliberately narrow/truncating format
        // should make the two paths disagree, proving the multiply bundles
        // are genuinely separate rather than both reading `off_mul`.
        let a = Matrix::<2, 2>::from_reals(fmt(), [[1.5, 1.5], [1.5, 1.5]]);
        let args = GramulArgs {
            diag_mul: PolicyBundle::new().full_prec(),
            diag_add: PolicyBundle::new(),
            off_mul: PolicyBundle::new().int_bits(1).frac_bits(1),
            off_add: PolicyBundle::new(),
        };
        let out = qgramul_ata(&a, fmt(), &args);
        // Diagonal: 1.5*1.5 + 1.5*1.5 = 4.5, computed at full precision.
        assert!((out.at(0, 0).to_f64() - 4.5).abs() < 1e-2);
        // Off-diagonal multiply is pinned to a 1-int/1-frac-bit format, so
        // each 1.5*1.5=2.25 product saturates well below the diagonal's
        // unrounded value — if the two paths shared one multiply bundle
        // this would equal the diagonal instead of falling short of it.
        assert!(out.at(0, 1).to_f64() < 4.0);
    }
}
