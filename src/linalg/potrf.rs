//! `Qpotrf`: Cholesky factorization of a symmetric positive-definite
//! matrix.
//!
//! Stores the reciprocal square root of each diagonal pivot rather than
//! the pivot itself (`1/L[j][j]` instead of `L[j][j]`): the off-diagonal
//! entries below it are each divided by that pivot, and a fixed-point
//! divide is far more expensive to model faithfully than a multiply, so
//! the factorization pays for one reciprocal-square-root lookup per pivot
//! and turns every subsequent division into a multiply. [`Qpotrs`] (see
//! [`crate::linalg::potrs`]) consumes this same reciprocal storage.

use crate::anus::rsqrt_table;
use crate::dynfixed::DynFixed;
use crate::format::DynFormat;
use crate::matrix::Matrix;
use crate::policy::PotrfArgs;
use crate::reduce::qreduce;

/// Result of attempting a Cholesky factorization: the input may not be
/// positive-definite, which is a documented outcome, not an error.
#[derive(Debug, Clone, Copy)]
pub enum PotrfOutcome<const N: usize> {
    /// Factorization succeeded. The lower triangle holds `L`'s
    /// off-diagonal entries; the diagonal holds `1/L[j][j]`, not `L[j][j]`.
    Factored(Matrix<N, N>),
    /// The `pivot`-th leading principal minor was not positive, so no
    /// real square root exists at that step.
    NotPositiveDefinite {
        /// Index of the pivot at which positive-definiteness failed.
        pivot: usize,
    },
}

/// Factorizes `a` (assumed symmetric; only its lower triangle is read)
/// into the reciprocal-diagonal `L` described by [`PotrfOutcome`].
#[must_use]
pub fn qpotrf<const N: usize>(
    a: &Matrix<N, N>,
    out_format: DynFormat,
    args: &PotrfArgs,
) -> PotrfOutcome<N> {
    let rsqrt = rsqrt_table(out_format);
    let mut l = Matrix::<N, N>::zeros(out_format);

    for j in 0..N {
        let sum_sq = row_dot(&l, j, j, j, &args.mul, &args.add, out_format);
        let diag_val = a.at(j, j).sub(sum_sq, &args.add).cast_to(out_format);
        if diag_val.to_f64() <= 0.0 {
            #[cfg(feature = "diagnostics")]
            tracing::warn!(pivot = j, "Qpotrf bailed out: leading principal minor not positive");
            return PotrfOutcome::NotPositiveDefinite { pivot: j };
        }
        let recip = rsqrt.at(diag_val);
        l.set(j, j, recip);

        for i in (j + 1)..N {
            let cross = row_dot(&l, i, j, j, &args.mul, &args.add, out_format);
            let numer = a.at(i, j).sub(cross, &args.add).cast_to(out_format);
            let lij = numer.mul(recip, &args.mul).cast_to(out_format);
            l.set(i, j, lij);
        }
    }
    PotrfOutcome::Factored(l)
}

/// `sum_{k<count} L[r1][k] * L[r2][k]`, reduced through [`qreduce`]; `0`
/// when `count == 0`.
fn row_dot<const N: usize>(
    l: &Matrix<N, N>,
    r1: usize,
    r2: usize,
    count: usize,
    mul_bundle: &PolicyBundle,
    add_bundle: &PolicyBundle,
    out_format: DynFormat,
) -> DynFixed {
    if count == 0 {
        return DynFixed::zero(out_format);
    }
    let terms: Vec<_> = (0..count).map(|k| l.at(r1, k).mul(l.at(r2, k), mul_bundle)).collect();
    qreduce(&terms, core::slice::from_ref(add_bundle))
}
