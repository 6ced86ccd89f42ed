//! `Qpotrs`: solves `A x = b` given the Cholesky factor produced by
//! [`crate::linalg::potrf::qpotrf`].
//!
//! Forward- and back-substitution both need to divide by a diagonal
//! pivot; since [`qpotrf`](crate::linalg::potrf::qpotrf) already stored
//! `1/L[i][i]` instead of `L[i][i]`, both substitutions multiply by that
//! stored reciprocal instead of dividing.

use crate::dynfixed::DynFixed;
use crate::format::DynFormat;
use crate::matrix::{Matrix, Vector};
use crate::policy::{PolicyBundle, PotrsArgs};
use crate::reduce::qreduce;

/// Solves `A x = b` given `l`, the reciprocal-diagonal Cholesky factor of
/// `A` from [`qpotrf`](crate::linalg::potrf::qpotrf).
#[must_use]
pub fn qpotrs<const N: usize>(
    l: &Matrix<N, N>,
    b: &Vector<N>,
    out_format: DynFormat,
    args: &PotrsArgs,
) -> Vector<N> {
    let mul_bundle = &args.mul;
    let add_bundle = &args.add;

    // Forward substitution: L y = b.
    let mut y = Vector::<N>::zeros(out_format);
    for i in 0..N {
        let cross = dot_partial(l, &y, i, 0, i, mul_bundle, add_bundle, out_format);
        let rhs = b.at(i, 0).sub(cross, add_bundle).cast_to(out_format);
        let yi = rhs.mul(l.at(i, i), mul_bundle).cast_to(out_format);
        y.set(i, 0, yi);
    }

    // Back substitution: L^T x = y, i.e. x[i] uses L[k][i] for k > i.
    let mut x = Vector::<N>::zeros(out_format);
    for step in 0..N {
        let i = N - 1 - step;
        let terms: Vec<_> = ((i + 1)..N).map(|k| l.at(k, i).mul(x.at(k, 0), mul_bundle)).collect();
        let cross = if terms.is_empty() {
            DynFixed::zero(out_format)
        } else {
            qreduce(&terms, core::slice::from_ref(add_bundle))
        };
        let rhs = y.at(i, 0).sub(cross, add_bundle).cast_to(out_format);
        let xi = rhs.mul(l.at(i, i), mul_bundle).cast_to(out_format);
        x.set(i, 0, xi);
    }
    x
}

/// `sum_{k in [start, end)} L[row][k] * v[k]`.
#[allow(clippy::too_many_arguments)]
fn dot_partial<const N: usize>(
    l: &Matrix<N, N>,
    v: &Vector<N>,
    row: usize,
    start: usize,
    end: usize,
    mul_bundle: &PolicyBundle,
    add_bundle: &PolicyBundle,
    out_format: DynFormat,
) -> DynFixed {
    if start >= end {
        return DynFixed::zero(out_format);
    }
    let terms: Vec<_> = (start..end).map(|k| l.at(row, k).mul(v.at(k, 0), mul_bundle)).collect();
    qreduce(&terms, core::slice::from_ref(add_bundle))
}
