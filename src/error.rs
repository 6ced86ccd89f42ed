//! Error taxonomy.
//!
//! One `thiserror`-derived enum per failure class, no stringly-typed
//! errors, no panics on a caller-reachable path.

use thiserror::Error;

/// Compile-/construction-time configuration errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `int_bits + frac_bits` exceeded [`crate::format::MAX_TOTAL_BITS`].
    #[error("format width overflow: int_bits={int_bits} frac_bits={frac_bits} exceeds 31 total")]
    WidthOverflow {
        /// Requested integer width.
        int_bits: u8,
        /// Requested fractional width.
        frac_bits: u8,
    },
    /// A kernel's operand shapes are incompatible for the requested product.
    #[error(
        "shape mismatch: {op} expected {expected:?}, got lhs={lhs:?} rhs={rhs:?}"
    )]
    ShapeMismatch {
        /// Name of the kernel that rejected the shapes.
        op: &'static str,
        /// Shape the kernel required.
        expected: (usize, usize),
        /// Left operand's actual shape.
        lhs: (usize, usize),
        /// Right operand's actual shape.
        rhs: (usize, usize),
    },
    /// `Qdiv`'s numerator left-shift would not fit the 63-bit signed-shift
    /// budget for the requested formats.
    #[error(
        "division width overflow: numerator shift of {shift} bits exceeds the 63-bit budget"
    )]
    DivWidth {
        /// The computed left-shift amount that would have overflowed.
        shift: u32,
    },
}

/// Arithmetic errors raised by an operation invocation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArithError {
    /// Complex/complex or real/complex division, which this library declares
    /// but does not implement.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// Errors specific to casting a value through the dynamic-format path.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DynCastError {
    /// A `DynFormat`'s rounding or overflow tag was not one this crate
    /// knows how to apply.
    ///
    /// Unreachable from safe code: [`crate::format::RndMode`] and
    /// [`crate::format::OvfMode`] are closed enums matched exhaustively
    /// throughout the casting algebra, so the type system eliminates this
    /// failure mode before it can occur. The variant is kept for parity
    /// with this crate's error taxonomy and for forward compatibility if a
    /// mode is ever added without updating every match site.
    #[error("invalid or unrecognized mode tag")]
    InvalidMode,
    /// The target format is invalid (see [`ConfigError::WidthOverflow`]).
    #[error(transparent)]
    Config(#[from] ConfigError),
}
