//! The dynamic-format fixed-point value and the primitive arithmetic that
//! runs on it.
//!
//! This is the engine behind [`crate::expr`], [`crate::reduce`], and every
//! kernel in [`crate::linalg`]: those layers need to thread a
//! caller-chosen [`crate::policy::PolicyBundle`] through each operation and
//! read back whatever output format the merger rule derived, which is a
//! runtime concern the stable const-generic system cannot express without
//! `generic_const_exprs`. [`crate::scalar::FixedValue`]'s operator overloads
//! delegate here for the common same-format case so only one algorithmic
//! core needs to be correct (Design Note §9).

use core::cmp::Ordering;

use crate::cast::{frac_convert, int_convert};
use crate::format::DynFormat;
use crate::policy::{merge_binary, merge_unary, BinOp, PolicyBundle, UnOp};

/// A fixed-point value that carries its format alongside its raw data,
/// rather than encoding the format in its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynFixed {
    /// Raw two's-complement (or unsigned) integer payload.
    pub data: i32,
    /// The format `data` is interpreted under.
    pub format: DynFormat,
}

impl DynFixed {
    /// Wraps a raw value in the given format without validating range.
    #[must_use]
    pub const fn new(data: i32, format: DynFormat) -> Self {
        Self { data, format }
    }

    /// The representable zero of `format`.
    #[must_use]
    pub const fn zero(format: DynFormat) -> Self {
        Self { data: 0, format }
    }

    /// Real-number view: `data * 2^-frac_bits`.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        f64::from(self.data) / (1i64 << self.format.frac_bits) as f64
    }

    /// Re-casts `self` into `format`, running the casting algebra under
    /// `format`'s own rounding/overflow policy (same algebra as "construct from
    /// another fixed-point value").
    #[must_use]
    pub fn cast_to(self, format: DynFormat) -> Self {
        if self.format == format {
            return Self { data: self.data, format };
        }
        let aligned = frac_convert(
            i64::from(self.data),
            u32::from(self.format.frac_bits),
            u32::from(format.frac_bits),
            format.rnd,
        );
        let clamped = int_convert(
            aligned,
            format.int_bits,
            format.frac_bits,
            format.signed,
            format.ovf,
        );
        Self {
            #[allow(clippy::cast_possible_truncation)]
            data: clamped as i32,
            format,
        }
    }

    /// Multiplies `self` by `rhs`.
    #[must_use]
    pub fn mul(self, rhs: Self, bundle: &PolicyBundle) -> Self {
        let out_fmt = merge_binary(self.format, rhs.format, bundle, BinOp::Mul);
        let acc_frac = u32::from(self.format.frac_bits) + u32::from(rhs.format.frac_bits);
        let product = i64::from(self.data) * i64::from(rhs.data);
        finish(product, acc_frac, out_fmt)
    }

    /// Adds `rhs` to `self`.
    #[must_use]
    pub fn add(self, rhs: Self, bundle: &PolicyBundle) -> Self {
        self.add_or_sub(rhs, bundle, false)
    }

    /// Subtracts `rhs` from `self`.
    #[must_use]
    pub fn sub(self, rhs: Self, bundle: &PolicyBundle) -> Self {
        self.add_or_sub(rhs, bundle, true)
    }

    fn add_or_sub(self, rhs: Self, bundle: &PolicyBundle, negate_rhs: bool) -> Self {
        let out_fmt = merge_binary(
            self.format,
            rhs.format,
            bundle,
            if negate_rhs { BinOp::Sub } else { BinOp::Add },
        );
        let common = self.format.frac_bits.max(rhs.format.frac_bits);
        let a = i64::from(self.data) << (common - self.format.frac_bits);
        let b = i64::from(rhs.data) << (common - rhs.format.frac_bits);
        let sum = if negate_rhs { a - b } else { a + b };
        finish(sum, u32::from(common), out_fmt)
    }

    /// Divides `self` by `rhs`.
    ///
    /// Returns the representable zero of the merged output format if `rhs`
    /// is zero: a documented outcome, not an exceptional condition.
    /// Uses a 128-bit intermediate for the numerator left-shift so the
    /// computation never triggers undefined shift behavior even for
    /// near-maximal formats; the result is still narrowed to the 31-bit-capped
    /// output format exactly as the narrower `i64` path would.
    #[must_use]
    pub fn div(self, rhs: Self, bundle: &PolicyBundle) -> Self {
        let out_fmt = merge_binary(self.format, rhs.format, bundle, BinOp::Div);
        if rhs.data == 0 {
            return Self::zero(out_fmt);
        }
        let common = i64::from(self.format.frac_bits.max(rhs.format.frac_bits));
        let denom = i128::from(rhs.data) << (common - i64::from(rhs.format.frac_bits));
        let shift = common - i64::from(self.format.frac_bits) + i64::from(out_fmt.frac_bits);
        let numer = if shift >= 0 {
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let shift = shift as u32;
            i128::from(self.data) << shift
        } else {
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let shift = (-shift) as u32;
            i128::from(self.data) >> shift
        };
        let quotient = numer / denom;
        #[allow(clippy::cast_possible_truncation)]
        let clamped = int_convert(
            quotient as i64,
            out_fmt.int_bits,
            out_fmt.frac_bits,
            out_fmt.signed,
            out_fmt.ovf,
        );
        Self {
            #[allow(clippy::cast_possible_truncation)]
            data: clamped as i32,
            format: out_fmt,
        }
    }

    /// Negates `self`. The output is always signed with one extra integer
    /// bit.
    #[must_use]
    pub fn neg(self, bundle: &PolicyBundle) -> Self {
        let out_fmt = merge_unary(self.format, bundle, UnOp::Neg);
        finish(-i64::from(self.data), 0, out_fmt)
    }

    /// Absolute value. Identity for unsigned inputs; signed inputs gain one
    /// integer bit.
    #[must_use]
    pub fn abs(self, bundle: &PolicyBundle) -> Self {
        let out_fmt = merge_unary(self.format, bundle, UnOp::Abs);
        let magnitude = if self.format.signed {
            i64::from(self.data).abs()
        } else {
            i64::from(self.data)
        };
        finish(magnitude, 0, out_fmt)
    }

    /// Three-way compare after aligning both operands to their common
    /// fractional width.
    #[must_use]
    pub fn cmp3(self, rhs: Self) -> Ordering {
        let common = self.format.frac_bits.max(rhs.format.frac_bits);
        let a = i64::from(self.data) << (common - self.format.frac_bits);
        let b = i64::from(rhs.data) << (common - rhs.format.frac_bits);
        a.cmp(&b)
    }
}

/// Shared tail of every binary/unary op: narrow the wide accumulator
/// (currently at `acc_frac` fractional bits) down to `out_fmt` via
/// `frac_convert` then `int_convert`.
///
/// `acc_frac` is ignored (treated as already equal to `out_fmt.frac_bits`)
/// when it is `0` and the accumulator was already produced at the output's
/// scale (used by [`DynFixed::neg`]/[`DynFixed::abs`], whose accumulator is
/// always at the input's own fractional width).
fn finish(acc: i64, acc_frac: u32, out_fmt: DynFormat) -> DynFixed {
    let acc_frac = if acc_frac == 0 {
        u32::from(out_fmt.frac_bits)
    } else {
        acc_frac
    };
    let aligned = frac_convert(acc, acc_frac, u32::from(out_fmt.frac_bits), out_fmt.rnd);
    let clamped = int_convert(
        aligned,
        out_fmt.int_bits,
        out_fmt.frac_bits,
        out_fmt.signed,
        out_fmt.ovf,
    );
    DynFixed {
        #[allow(clippy::cast_possible_truncation)]
        data: clamped as i32,
        format: out_fmt,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::format::{OvfMode, RndMode};

    fn fmt(i: u8, f: u8, s: bool) -> DynFormat {
        DynFormat::try_new(i, f, s, RndMode::Tcpl, OvfMode::SatTcpl).unwrap()
    }

    fn val(x: f64, format: DynFormat) -> DynFixed {
        DynFixed::new(crate::cast::quantize_real(x, format.frac_bits, format.rnd) as i32, format)
    }

    #[test]
    fn full_prec_scalar_multiply_matches_known_scenario() {
        let f = fmt(12, 8, true);
        let a = val(3.0, f);
        let b = val(0.5, f);
        let out = a.mul(b, &PolicyBundle::new().full_prec());
        assert_eq!(out.format.int_bits, 24);
        assert_eq!(out.format.frac_bits, 16);
        assert!((out.to_f64() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn div_by_zero_returns_zero_in_output_format() {
        let f = fmt(8, 8, true);
        let a = val(3.0, f);
        let zero = DynFixed::zero(f);
        let out = a.div(zero, &PolicyBundle::new());
        assert_eq!(out.data, 0);
    }

    #[test]
    fn div_recovers_exact_quotient_for_powers_of_two() {
        let f = fmt(8, 8, true);
        let a = val(3.0, f);
        let b = val(0.5, f);
        let out = a.div(b, &PolicyBundle::new());
        assert!((out.to_f64() - 6.0).abs() < 1e-3);
    }

    #[test]
    fn neg_flips_sign_and_grows_int_bits() {
        let f = fmt(4, 4, false);
        let a = val(3.0, f);
        let out = a.neg(&PolicyBundle::new());
        assert!(out.format.signed);
        assert_eq!(out.format.int_bits, 5);
        assert!((out.to_f64() + 3.0).abs() < 1e-3);
    }

    #[test]
    fn cmp3_orders_across_differing_fractional_widths() {
        let a = val(1.5, fmt(4, 2, true));
        let b = val(1.25, fmt(4, 4, true));
        assert_eq!(a.cmp3(b), Ordering::Greater);
    }
}
