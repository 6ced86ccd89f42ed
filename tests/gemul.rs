//! `Qgemul` scenarios and its full-precision agreement property.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use qfixed::format::{DynFormat, OvfMode, RndMode};
use qfixed::linalg::qgemul;
use qfixed::matrix::Matrix;
use qfixed::policy::{GemulArgs, PolicyBundle};

fn fmt() -> DynFormat {
    DynFormat::try_new(12, 8, true, RndMode::Tcpl, OvfMode::SatTcpl).unwrap()
}

// 3x3 identity-like product against a scaled matrix.
#[test]
fn gemul_against_scaled_identity() {
    let a = Matrix::<3, 3>::from_reals(
        fmt(),
        [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]],
    );
    let b = Matrix::<3, 3>::from_reals(
        fmt(),
        [[0.5, 0.0, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0, 0.5]],
    );
    let args = GemulArgs {
        mul: PolicyBundle::new().full_prec(),
        add: PolicyBundle::new().full_prec(),
    };
    let out = qgemul(&a, &b, fmt(), &args);
    let expected = [[0.5, 1.0, 1.5], [2.0, 2.5, 3.0], [3.5, 4.0, 4.5]];
    for r in 0..3 {
        for c in 0..3 {
            assert!((out.at(r, c).to_f64() - expected[r][c]).abs() < 1.0 / 256.0);
        }
    }
}

#[test]
fn gemul_with_identity_is_a_no_op() {
    let a = Matrix::<2, 2>::from_reals(fmt(), [[1.5, -2.0], [3.0, 0.25]]);
    let id = Matrix::<2, 2>::from_reals(fmt(), [[1.0, 0.0], [0.0, 1.0]]);
    let out = qgemul(&a, &id, fmt(), &GemulArgs::default());
    for r in 0..2 {
        for c in 0..2 {
            assert!((out.at(r, c).to_f64() - a.at(r, c).to_f64()).abs() < 1.0 / 256.0);
        }
    }
}

proptest! {
    /// Gemul equals school-book gemm: under FullPrec bundles, a 2x2
    /// Qgemul matches the exact rational product within the scenario's
    /// quantization grid (small integer entries round trip exactly).
    #[test]
    fn gemul_matches_school_book_for_integer_entries(
        a00 in -8_i32..8, a01 in -8_i32..8,
        a10 in -8_i32..8, a11 in -8_i32..8,
        b00 in -8_i32..8, b01 in -8_i32..8,
        b10 in -8_i32..8, b11 in -8_i32..8,
    ) {
        let f = fmt();
        let a = Matrix::<2, 2>::from_reals(
            f,
            [[f64::from(a00), f64::from(a01)], [f64::from(a10), f64::from(a11)]],
        );
        let b = Matrix::<2, 2>::from_reals(
            f,
            [[f64::from(b00), f64::from(b01)], [f64::from(b10), f64::from(b11)]],
        );
        let bundle = PolicyBundle::new().full_prec();
        let args = GemulArgs { mul: bundle, add: bundle };
        let out = qgemul(&a, &b, f, &args);

        let expect = |r: usize, c: usize| -> f64 {
            (0..2).map(|k| a.at(r, k).to_f64() * b.at(k, c).to_f64()).sum()
        };
        for r in 0..2 {
            for c in 0..2 {
                prop_assert!((out.at(r, c).to_f64() - expect(r, c)).abs() < 1e-6);
            }
        }
    }
}
