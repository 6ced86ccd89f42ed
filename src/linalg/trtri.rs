//! `Qtrtri`: triangular matrix inverse.
//!
//! The lower-triangular case is solved column by column via forward
//! substitution (`L * x = e_j` for each standard basis vector `e_j`); the
//! upper-triangular case reuses it by transposing in and out, since
//! `inv(U) = inv(U^T)^T` and `U^T` is lower triangular.

use crate::dynfixed::DynFixed;
use crate::format::DynFormat;
use crate::matrix::Matrix;
use crate::policy::TrtriArgs;
use crate::reduce::qreduce;

/// Inverts lower-triangular `l` (only its lower triangle is read).
#[must_use]
pub fn qtrtri_lower<const N: usize>(
    l: &Matrix<N, N>,
    out_format: DynFormat,
    args: &TrtriArgs,
) -> Matrix<N, N> {
    let mul_bundle = &args.mul;
    let add_bundle = &args.add;
    let one = DynFixed::new(1i32 << out_format.frac_bits, out_format);
    let mut inv = Matrix::<N, N>::zeros(out_format);

    for j in 0..N {
        let diag = one.div(l.at(j, j), mul_bundle).cast_to(out_format);
        inv.set(j, j, diag);

        for i in (j + 1)..N {
            let terms: Vec<_> = (j..i).map(|k| l.at(i, k).mul(inv.at(k, j), mul_bundle)).collect();
            let sum = qreduce(&terms, core::slice::from_ref(add_bundle));
            let neg_sum = sum.neg(add_bundle).cast_to(out_format);
            let xi = neg_sum.div(l.at(i, i), mul_bundle).cast_to(out_format);
            inv.set(i, j, xi);
        }
    }
    inv
}

/// Inverts upper-triangular `u` (only its upper triangle is read).
#[must_use]
pub fn qtrtri_upper<const N: usize>(
    u: &Matrix<N, N>,
    out_format: DynFormat,
    args: &TrtriArgs,
) -> Matrix<N, N> {
    let ut = u.transpose();
    qtrtri_lower(&ut, out_format, args).transpose()
}
