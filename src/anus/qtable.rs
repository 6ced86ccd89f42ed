//! `Qtable`: a ROM-emulating sentinel for a real function the datapath
//! would otherwise implement as a lookup table.
//!
//! A hardware ROM stores a pre-quantized table of a real function's
//! output; `Qtable` models that by evaluating the function in `f64` and
//! quantizing the single result, rather than trying to model the table's
//! memory layout. Quantization always uses `RndMode::Zero`: a synthesized
//! ROM's contents are themselves truncated-to-fit constants baked in at
//! synthesis time, not values subject to the caller's own rounding policy.

use crate::cast::{int_convert, quantize_real};
use crate::dynfixed::DynFixed;
use crate::format::{DynFormat, RndMode};

/// Quantizes the result of a real function `f`, modeling a synthesized ROM
/// lookup.
#[derive(Clone, Copy)]
pub struct Qtable<F: Fn(f64) -> f64> {
    format: DynFormat,
    f: F,
}

impl<F: Fn(f64) -> f64> Qtable<F> {
    /// Builds a table sentinel for `f`, quantizing its results into
    /// `format`.
    #[must_use]
    pub const fn new(format: DynFormat, f: F) -> Self {
        Self { format, f }
    }

    /// Looks up `f(x)`, quantized into this table's format.
    #[must_use]
    pub fn at(&self, x: DynFixed) -> DynFixed {
        let real = (self.f)(x.to_f64());
        let raw = quantize_real(real, self.format.frac_bits, RndMode::Zero);
        let clamped = int_convert(
            raw,
            self.format.int_bits,
            self.format.frac_bits,
            self.format.signed,
            self.format.ovf,
        );
        #[allow(clippy::cast_possible_truncation)]
        DynFixed::new(clamped as i32, self.format)
    }
}

/// A `Qtable` modeling `sqrt`, used by [`crate::linalg::potrf`]'s
/// reciprocal-square-root diagonal storage.
#[must_use]
pub fn sqrt_table(format: DynFormat) -> Qtable<fn(f64) -> f64> {
    Qtable::new(format, f64::sqrt)
}

/// A `Qtable` modeling `1/sqrt(x)`.
#[must_use]
pub fn rsqrt_table(format: DynFormat) -> Qtable<fn(f64) -> f64> {
    Qtable::new(format, |x: f64| 1.0 / x.sqrt())
}

/// A `Qtable` modeling `1/x`.
#[must_use]
pub fn reciprocal_table(format: DynFormat) -> Qtable<fn(f64) -> f64> {
    Qtable::new(format, |x: f64| 1.0 / x)
}

/// A `Qtable` modeling `exp`.
#[must_use]
pub fn exp_table(format: DynFormat) -> Qtable<fn(f64) -> f64> {
    Qtable::new(format, f64::exp)
}
