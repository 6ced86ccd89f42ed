//! `Qgemv`: general matrix-vector multiply, `y := alpha*A*x + beta*y`.

use crate::dynfixed::DynFixed;
use crate::format::DynFormat;
use crate::matrix::{Matrix, Vector};
use crate::policy::GemvArgs;
use crate::reduce::qreduce;

/// Computes `alpha*A*x + beta*y` for `a: Matrix<M, N>`, `x: Vector<N>`,
/// `y: Vector<M>`.
#[must_use]
pub fn qgemv<const M: usize, const N: usize>(
    a: &Matrix<M, N>,
    x: &Vector<N>,
    y: &Vector<M>,
    alpha: DynFixed,
    beta: DynFixed,
    out_format: DynFormat,
    args: &GemvArgs,
) -> Vector<M> {
    Matrix::from_fn(out_format, |r, _c| {
        let terms: Vec<_> = (0..N).map(|k| a.at(r, k).mul(x.at(k, 0), &args.mul)).collect();
        let dot = qreduce(&terms, core::slice::from_ref(&args.add));
        let scaled = alpha.mul(dot, &args.mul);
        let prior = beta.mul(y.at(r, 0), &args.mul);
        scaled.add(prior, &args.add).cast_to(out_format)
    })
}
