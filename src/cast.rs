//! The casting algebra: two pure functions over a wide signed
//! integer that every fixed-point cast — widening, narrowing, or
//! real-number quantization — reduces to.

use crate::format::{OvfMode, RndMode};

/// Aligns `v`, currently at fractional width `from_frac`, to fractional
/// width `to_frac`, applying `mode`'s tie-break policy when narrowing.
///
/// Widening (`to_frac >= from_frac`) is always lossless and ignores `mode`.
#[must_use]
pub fn frac_convert(v: i64, from_frac: u32, to_frac: u32, mode: RndMode) -> i64 {
    if to_frac >= from_frac {
        return v << (to_frac - from_frac);
    }
    let d = from_frac - to_frac;
    match mode {
        RndMode::Tcpl => v >> d,
        RndMode::Smgn => {
            if v >= 0 {
                v >> d
            } else {
                -((-v) >> d)
            }
        }
        _ => {
            let mask = (1i64 << d) - 1;
            let floor = v & !mask;
            let ceil = floor + (1i64 << d);
            let dist_floor = v - floor;
            let dist_ceil = ceil - v;
            let chosen = match dist_floor.cmp(&dist_ceil) {
                core::cmp::Ordering::Less => floor,
                core::cmp::Ordering::Greater => ceil,
                core::cmp::Ordering::Equal => tie_break(mode, floor, ceil, d),
            };
            chosen >> d
        }
    }
}

/// Resolves a rounding tie between `floor` and `ceil` (which bracket the
/// exact value at the pre-shift scale, `d` bits apart) per `mode`'s table.
///
/// Only called for the five true rounding modes (`PosInf`, `NegInf`, `Zero`,
/// `Inf`, `Conv`); `Tcpl`/`Smgn` never reach a tie branch since they bypass
/// the floor/ceil bracket entirely.
fn tie_break(mode: RndMode, floor: i64, ceil: i64, d: u32) -> i64 {
    match mode {
        RndMode::PosInf => ceil,
        RndMode::NegInf => floor,
        RndMode::Zero => {
            if floor.unsigned_abs() <= ceil.unsigned_abs() {
                floor
            } else {
                ceil
            }
        }
        RndMode::Inf => {
            if floor.unsigned_abs() >= ceil.unsigned_abs() {
                floor
            } else {
                ceil
            }
        }
        RndMode::Conv => {
            let n = floor >> d;
            if n & 1 == 0 {
                floor
            } else {
                ceil
            }
        }
        RndMode::Tcpl | RndMode::Smgn => unreachable!("truncation modes never tie-break"),
    }
}

/// Quantizes a real number directly to a raw integer at fractional width
/// `frac_bits`, under `mode`'s tie-break policy.
///
/// This is the real-number entry point into the casting algebra: it
/// performs the same tie-break table as [`frac_convert`] but starting from
/// an `f64` rather than an already-quantized wide integer, since there is
/// no finite `from_frac` to align from.
#[must_use]
pub fn quantize_real(x: f64, frac_bits: u8, mode: RndMode) -> i64 {
    let scale = f64::from(2.0_f32).powi(i32::from(frac_bits));
    let scaled = x * scale;
    match mode {
        RndMode::Tcpl => scaled.floor() as i64,
        RndMode::Smgn => {
            if x >= 0.0 {
                scaled.trunc() as i64
            } else {
                -((-scaled).trunc() as i64)
            }
        }
        _ => {
            let floor_f = scaled.floor();
            let floor = floor_f as i64;
            let ceil = floor + 1;
            let frac_part = scaled - floor_f;
            match frac_part.partial_cmp(&0.5).unwrap_or(core::cmp::Ordering::Equal) {
                core::cmp::Ordering::Less => floor,
                core::cmp::Ordering::Greater => ceil,
                core::cmp::Ordering::Equal => tie_break(mode, floor, ceil, 0),
            }
        }
    }
}

/// Clamps or wraps `v` (already aligned to fractional width `frac_bits`)
/// into the representable range of `(int_bits, frac_bits, signed)`.
///
/// Behind the `diagnostics` feature, emits a `tracing::trace!` event when
/// `v` actually falls outside the representable range — never on the
/// common in-range path, so the instrumentation costs nothing on the hot
/// loop it's disabled for.
#[must_use]
pub fn int_convert(v: i64, int_bits: u8, frac_bits: u8, signed: bool, mode: OvfMode) -> i64 {
    let total = u32::from(int_bits) + u32::from(frac_bits);
    let max = (1i64 << total) - 1;
    let min = if signed { -(1i64 << total) } else { 0 };
    let out = match mode {
        OvfMode::SatTcpl => v.clamp(min, max),
        OvfMode::SatZero => {
            if (min..=max).contains(&v) {
                v
            } else {
                0
            }
        }
        OvfMode::SatSmgn => v.clamp(min + 1, max),
        OvfMode::WrpTcpl => {
            if signed {
                let bits = total + 1;
                let modulus = 1i64 << bits;
                let masked = v.rem_euclid(modulus);
                if masked >= (1i64 << (bits - 1)) {
                    masked - modulus
                } else {
                    masked
                }
            } else {
                let modulus = 1i64 << total;
                v.rem_euclid(modulus)
            }
        }
    };
    #[cfg(feature = "diagnostics")]
    if out != v {
        tracing::trace!(raw = v, clamped = out, int_bits, frac_bits, ?mode, "int_convert saturated or wrapped");
    }
    out
}
