//! Quantization policy vocabulary and the fixed-point format record.
//!
//! This module is pure data: the seven fractional rounding modes, the four
//! integer overflow modes, the runtime format record (`DynFormat`), and the
//! const-generic marker types that let `FixedValue` carry its rounding and
//! overflow policy as part of its monomorphized type instead of a runtime
//! field.

use crate::error::ConfigError;

/// Fractional-truncation tie-break policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RndMode {
    /// Round toward positive infinity; ties go to the larger candidate.
    PosInf,
    /// Round toward negative infinity; ties go to the smaller candidate.
    NegInf,
    /// Round toward zero; ties resolved toward zero.
    Zero,
    /// Round away from zero; ties resolved away from zero.
    Inf,
    /// Convergent (banker's) rounding; ties resolved toward an even bit `d`.
    Conv,
    /// Truncation: arithmetic shift right (floor toward negative infinity).
    Tcpl,
    /// Truncation toward zero by sign-magnitude shift.
    Smgn,
}

/// Integer clamping policy applied once a value is aligned to its target
/// fractional width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OvfMode {
    /// Clamp to `[min, max]` of the two's-complement range.
    SatTcpl,
    /// Replace any out-of-range value with zero.
    SatZero,
    /// Clamp to `[min + 1, max]`, reserving the most-negative representable
    /// value so the range is symmetric.
    SatSmgn,
    /// Two's-complement wraparound (sign-extended for signed formats, masked
    /// for unsigned formats).
    WrpTcpl,
}

mod sealed {
    pub trait Sealed {}
}

/// A zero-sized marker for one of the seven rounding modes, usable as a
/// const-generic-style type parameter on [`crate::scalar::FixedValue`].
///
/// Implemented only by the types in this crate (`PosInf`, `NegInf`, `Zero`,
/// `Inf`, `Conv`, `Tcpl`, `Smgn`); the trait is sealed so downstream crates
/// cannot introduce an eighth mode that the casting algebra has not been
/// proven correct for.
pub trait RoundingMode: sealed::Sealed + Copy + Clone + Default + core::fmt::Debug + 'static {
    /// The runtime tag corresponding to this marker type.
    const TAG: RndMode;
}

/// A zero-sized marker for one of the four overflow modes, usable as a
/// const-generic-style type parameter on [`crate::scalar::FixedValue`].
pub trait OverflowMode: sealed::Sealed + Copy + Clone + Default + core::fmt::Debug + 'static {
    /// The runtime tag corresponding to this marker type.
    const TAG: OvfMode;
}

macro_rules! rounding_marker {
    ($name:ident, $tag:ident) => {
        #[doc = concat!("Marker type selecting [`RndMode::", stringify!($tag), "`].")]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;
        impl sealed::Sealed for $name {}
        impl RoundingMode for $name {
            const TAG: RndMode = RndMode::$tag;
        }
    };
}

macro_rules! overflow_marker {
    ($name:ident, $tag:ident) => {
        #[doc = concat!("Marker type selecting [`OvfMode::", stringify!($tag), "`].")]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;
        impl sealed::Sealed for $name {}
        impl OverflowMode for $name {
            const TAG: OvfMode = OvfMode::$tag;
        }
    };
}

rounding_marker!(PosInf, PosInf);
rounding_marker!(NegInf, NegInf);
rounding_marker!(Zero, Zero);
rounding_marker!(Inf, Inf);
rounding_marker!(Conv, Conv);
rounding_marker!(Tcpl, Tcpl);
rounding_marker!(Smgn, Smgn);

overflow_marker!(SatTcpl, SatTcpl);
overflow_marker!(SatZero, SatZero);
overflow_marker!(SatSmgn, SatSmgn);
overflow_marker!(WrpTcpl, WrpTcpl);

/// Hard cap on `int_bits + frac_bits`: keeps every intermediate
/// product representable in a 64-bit accumulator.
pub const MAX_TOTAL_BITS: u32 = 31;

/// Runtime fixed-point format record — the format every static [`crate::scalar::FixedValue`] resolves to underneath.
///
/// Static callers never construct this directly; it is what
/// [`crate::scalar::FixedValue`]'s const-generic parameters reduce to
/// internally so both code paths share one casting/merging core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DynFormat {
    /// Number of bits left of the binary point.
    pub int_bits: u8,
    /// Number of bits right of the binary point.
    pub frac_bits: u8,
    /// Whether the format is signed.
    pub signed: bool,
    /// Default rounding mode applied on fractional truncation.
    pub rnd: RndMode,
    /// Default overflow mode applied on integer clamping.
    pub ovf: OvfMode,
}

impl DynFormat {
    /// Builds a format, checking the `int_bits + frac_bits <= 31` invariant.
    ///
    /// # Errors
    /// Returns [`ConfigError::WidthOverflow`] if the combined width exceeds
    /// [`MAX_TOTAL_BITS`].
    pub const fn try_new(
        int_bits: u8,
        frac_bits: u8,
        signed: bool,
        rnd: RndMode,
        ovf: OvfMode,
    ) -> Result<Self, ConfigError> {
        if int_bits as u32 + frac_bits as u32 > MAX_TOTAL_BITS {
            return Err(ConfigError::WidthOverflow {
                int_bits,
                frac_bits,
            });
        }
        Ok(Self {
            int_bits,
            frac_bits,
            signed,
            rnd,
            ovf,
        })
    }

    /// Total width in bits, excluding any sign bit.
    #[must_use]
    pub const fn total_bits(self) -> u8 {
        self.int_bits + self.frac_bits
    }

    /// Inclusive maximum representable raw value for this format.
    #[must_use]
    pub const fn max_raw(self) -> i64 {
        (1i64 << self.total_bits()) - 1
    }

    /// Minimum representable raw value for this format (`0` if unsigned).
    #[must_use]
    pub const fn min_raw(self) -> i64 {
        if self.signed {
            -(1i64 << self.total_bits())
        } else {
            0
        }
    }
}

/// Symmetrically reduces `(int_bits, frac_bits)` so their sum fits
/// [`MAX_TOTAL_BITS`].
///
/// Returns the pair unchanged if it already satisfies the invariant.
#[must_use]
pub const fn cap_width(int_bits: i32, frac_bits: i32) -> (i32, i32) {
    let sum = int_bits + frac_bits;
    if sum <= MAX_TOTAL_BITS as i32 {
        return (int_bits, frac_bits);
    }
    let excess = sum - MAX_TOTAL_BITS as i32 + 1;
    let d = (excess + 1) / 2;
    (int_bits - d, frac_bits - d)
}
