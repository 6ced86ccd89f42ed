//! Universally quantified casting-algebra properties plus a handful of
//! concrete rounding-mode scenarios.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use qfixed::cast::{frac_convert, int_convert, quantize_real};
use qfixed::format::{DynFormat, OvfMode, RndMode};
use qfixed::scalar::FixedValue;

fn all_rnd_modes() -> [RndMode; 7] {
    [
        RndMode::PosInf,
        RndMode::NegInf,
        RndMode::Zero,
        RndMode::Inf,
        RndMode::Conv,
        RndMode::Tcpl,
        RndMode::Smgn,
    ]
}

// RND::NEG_INF, F=(1,1,signed)
#[test]
fn neg_inf_scenario() {
    assert_eq!(quantize_real(1.25, 1, RndMode::NegInf), 2); // 1.0
    assert_eq!(quantize_real(-1.25, 1, RndMode::NegInf), -3); // -1.5
}

// RND::POS_INF, same format
#[test]
fn pos_inf_scenario() {
    assert_eq!(quantize_real(1.25, 1, RndMode::PosInf), 3); // 1.5
    assert_eq!(quantize_real(-1.25, 1, RndMode::PosInf), -2); // -1.0
}

// RND::CONV, ties to even, then SAT_TCPL clamps
#[test]
fn conv_scenario() {
    assert_eq!(quantize_real(1.25, 1, RndMode::Conv), 2); // 1.0
    let raw = quantize_real(1.75, 1, RndMode::Conv);
    assert_eq!(raw, 4); // 2.0 pre-clamp, ties to even
    assert_eq!(int_convert(raw, 1, 1, true, OvfMode::SatTcpl), 3); // 1.5
}

proptest! {
    /// Round-trip identity: quantizing a real and reading it back under
    /// Q16.8 stays within one LSB of the original value.
    #[test]
    fn round_trip_identity_within_one_lsb(x in -200.0_f64..200.0) {
        type Q = FixedValue<16, 8, true>;
        let v = Q::from_real(x);
        let lsb = 1.0 / 256.0;
        prop_assert!((v.to_f64() - x).abs() <= lsb + 1e-9);
    }

    /// Cast idempotence: widening F2 -> F1 -> F2 (F1 wider in both axes)
    /// is the identity, for every rounding mode.
    #[test]
    fn cast_idempotence_through_a_wider_format(
        raw in -127_i64..128,
        mode_idx in 0usize..7,
    ) {
        let mode = all_rnd_modes()[mode_idx];
        let narrow = DynFormat::try_new(4, 4, true, mode, OvfMode::SatTcpl).unwrap();
        let wide = DynFormat::try_new(8, 8, true, mode, OvfMode::SatTcpl).unwrap();
        let widened = frac_convert(raw, u32::from(narrow.frac_bits), u32::from(wide.frac_bits), mode);
        let back = frac_convert(widened, u32::from(wide.frac_bits), u32::from(narrow.frac_bits), mode);
        prop_assert_eq!(back, raw);
    }

    /// Widening exactness: frac_convert never loses bits when toFrac >= fromFrac,
    /// regardless of rounding mode.
    #[test]
    fn widening_is_lossless_for_every_mode(
        raw in -1000_i64..1000,
        extra_frac in 0u32..8,
        mode_idx in 0usize..7,
    ) {
        let mode = all_rnd_modes()[mode_idx];
        let out = frac_convert(raw, 4, 4 + extra_frac, mode);
        prop_assert_eq!(out, raw << extra_frac);
    }

    /// Saturation stability: once a saturating overflow mode has clamped an
    /// out-of-range value, re-applying it to the clamped result is a no-op.
    #[test]
    fn saturation_is_a_fixed_point(raw in i64::MIN / 2..i64::MAX / 2) {
        for mode in [OvfMode::SatTcpl, OvfMode::SatZero, OvfMode::SatSmgn] {
            let once = int_convert(raw, 6, 2, true, mode);
            let twice = int_convert(once, 6, 2, true, mode);
            prop_assert_eq!(once, twice);
        }
    }
}
