//! The tree reducer, `Qreduce`.
//!
//! Models a balanced binary adder tree the way an ASIC accumulator pipeline
//! would be built: each layer of the tree may use its own
//! [`PolicyBundle`] (an early layer might keep full precision, a later one
//! might saturate down to a narrow accumulator register), and an
//! odd element at any layer is carried forward unchanged into the next
//! layer rather than paired with a synthetic zero.

use crate::dynfixed::DynFixed;
use crate::matrix::Matrix;
use crate::policy::{BinOp, PolicyBundle};

/// Reduces `values` to a single [`DynFixed`] by repeated pairwise `add`,
/// one tree layer at a time.
///
/// `layer_bundles[i]` is the bundle used for layer `i`; if there are fewer
/// bundles than layers, the last bundle is reused for every remaining
/// layer. Passing an empty `layer_bundles` uses the default (unmerged)
/// bundle throughout.
///
/// # Panics
/// Panics if `values` is empty — there is no representable zero to fall
/// back to without a format to build it in.
#[must_use]
pub fn qreduce(values: &[DynFixed], layer_bundles: &[PolicyBundle]) -> DynFixed {
    qreduce_with(values, layer_bundles, BinOp::Add)
}

/// As [`qreduce`], but using `op` instead of always reducing by `Add`
/// (e.g. `BinOp::Mul` for a product tree).
///
/// # Panics
/// Panics if `values` is empty.
#[must_use]
pub fn qreduce_with(values: &[DynFixed], layer_bundles: &[PolicyBundle], op: BinOp) -> DynFixed {
    assert!(!values.is_empty(), "qreduce requires at least one value");
    let mut layer = values.to_vec();
    let mut depth = 0usize;
    while layer.len() > 1 {
        let default_bundle = PolicyBundle::new();
        let bundle = layer_bundles
            .get(depth)
            .or_else(|| layer_bundles.last())
            .unwrap_or(&default_bundle);
        let mut next = Vec::with_capacity(layer.len().div_ceil(2));
        for pair in layer.chunks(2) {
            if let [a, b] = pair {
                next.push(apply(*a, *b, bundle, op));
            } else {
                next.push(pair[0]);
            }
        }
        layer = next;
        depth += 1;
    }
    layer[0]
}

fn apply(a: DynFixed, b: DynFixed, bundle: &PolicyBundle, op: BinOp) -> DynFixed {
    match op {
        BinOp::Add => a.add(b, bundle),
        BinOp::Sub => a.sub(b, bundle),
        BinOp::Mul => a.mul(b, bundle),
        BinOp::Div => a.div(b, bundle),
    }
}

/// Flattens `m` in row-major order and reduces it with [`qreduce`].
#[must_use]
pub fn qreduce_matrix<const R: usize, const C: usize>(
    m: &Matrix<R, C>,
    layer_bundles: &[PolicyBundle],
) -> DynFixed {
    let mut flat = Vec::with_capacity(R * C);
    for r in 0..R {
        for c in 0..C {
            flat.push(m.at(r, c));
        }
    }
    qreduce(&flat, layer_bundles)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::format::{DynFormat, OvfMode, RndMode};

    fn fmt() -> DynFormat {
        DynFormat::try_new(8, 8, true, RndMode::Tcpl, OvfMode::SatTcpl).unwrap()
    }

    fn val(x: f64) -> DynFixed {
        DynFixed::new(crate::cast::quantize_real(x, 8, RndMode::Tcpl) as i32, fmt())
    }

    #[test]
    fn reduces_a_power_of_two_length_list() {
        let values = [val(1.0), val(2.0), val(3.0), val(4.0)];
        let out = qreduce(&values, &[]);
        assert!((out.to_f64() - 10.0).abs() < 1e-2);
    }

    #[test]
    fn carries_odd_element_forward_unpaired() {
        let values = [val(1.0), val(2.0), val(3.0)];
        let out = qreduce(&values, &[]);
        assert!((out.to_f64() - 6.0).abs() < 1e-2);
    }

    #[test]
    fn flattens_a_matrix_row_major() {
        let m = Matrix::<2, 2>::from_reals(fmt(), [[1.0, 2.0], [3.0, 4.0]]);
        let out = qreduce_matrix(&m, &[]);
        assert!((out.to_f64() - 10.0).abs() < 1e-2);
    }

    #[test]
    fn per_layer_bundles_apply_in_order() {
        let values = [val(1.0), val(2.0), val(3.0), val(4.0)];
        let layer0 = PolicyBundle::new().full_prec();
        let out = qreduce(&values, &[layer0]);
        assert!((out.to_f64() - 10.0).abs() < 1e-2);
    }
}
