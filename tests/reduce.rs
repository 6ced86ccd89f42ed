//! `Qreduce`'s full-precision associativity property.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use qfixed::dynfixed::DynFixed;
use qfixed::format::{DynFormat, OvfMode, RndMode};
use qfixed::policy::PolicyBundle;
use qfixed::reduce::qreduce;

fn fmt() -> DynFormat {
    DynFormat::try_new(8, 8, true, RndMode::Tcpl, OvfMode::SatTcpl).unwrap()
}

fn val(x: i32) -> DynFixed {
    DynFixed::new(x << 8, fmt())
}

#[test]
fn reduces_a_power_of_two_length_list() {
    let values = [val(1), val(2), val(3), val(4)];
    let out = qreduce(&values, &[PolicyBundle::new().full_prec()]);
    assert!((out.to_f64() - 10.0).abs() < 1e-6);
}

#[test]
fn carries_an_odd_element_forward_unchanged() {
    let values = [val(1), val(2), val(3)];
    let out = qreduce(&values, &[PolicyBundle::new().full_prec()]);
    assert!((out.to_f64() - 6.0).abs() < 1e-6);
}

proptest! {
    /// Associativity under FullPrec: with FullPrec at every layer, Qreduce
    /// over small integer inputs equals the plain wide-integer sum,
    /// regardless of how many elements (and hence how the tree shape
    /// pairs them) are given.
    #[test]
    fn full_prec_reduce_matches_exact_sum(xs in prop::collection::vec(-64_i32..64, 1..32)) {
        let values: Vec<_> = xs.iter().map(|&x| val(x)).collect();
        let out = qreduce(&values, &[PolicyBundle::new().full_prec()]);
        let expected: i64 = xs.iter().map(|&x| i64::from(x)).sum();
        prop_assert!((out.to_f64() - expected as f64).abs() < 1e-6);
    }
}
