//! Fixed-shape dense tensors.
//!
//! A general k-dimensional tensor would cover every shape, but every kernel
//! named here (`Qgemul`, `Qgramul`, `Qgemv`, `Qpotrf`, `Qpotrs`, `Qsytrf`,
//! `Qtrtri`) is matrix- or vector-shaped, so this crate realizes it as a
//! compile-time-sized `Matrix<R, C>` rather than a fully generic tensor:
//! `R`/`C` are const generics, so two operands' compatible dimensions (e.g.
//! the shared inner dimension of a product) are enforced by the type
//! checker at the call site with no runtime shape check at all. Runtime
//! shape checks remain only where a shape really isn't known until a
//! value is constructed (a slice of unknown length).

use crate::dynfixed::DynFixed;
use crate::error::ConfigError;
use crate::format::DynFormat;

/// A dense `R x C` matrix of fixed-point values sharing one [`DynFormat`].
///
/// Row-major, `#[repr(C)]` so the in-memory layout matches what an ASIC
/// memory or register file would present.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matrix<const R: usize, const C: usize> {
    format: DynFormat,
    data: [[i32; C]; R],
}

/// A column vector: `R x 1`.
pub type Vector<const N: usize> = Matrix<N, 1>;

impl<const R: usize, const C: usize> Matrix<R, C> {
    /// A matrix of representable zeros in `format`.
    #[must_use]
    pub const fn zeros(format: DynFormat) -> Self {
        Self {
            format,
            data: [[0; C]; R],
        }
    }

    /// Builds a matrix from a row-major closure, per-element.
    #[must_use]
    pub fn from_fn(format: DynFormat, mut f: impl FnMut(usize, usize) -> DynFixed) -> Self {
        let mut data = [[0; C]; R];
        for (r, row) in data.iter_mut().enumerate() {
            for (c, slot) in row.iter_mut().enumerate() {
                let v = f(r, c);
                debug_assert_eq!(v.format, format, "from_fn element format must match matrix format");
                *slot = v.data;
            }
        }
        Self { format, data }
    }

    /// Builds a matrix from real-number literals, quantizing each into
    /// `format` under its own rounding mode.
    #[must_use]
    pub fn from_reals(format: DynFormat, rows: [[f64; C]; R]) -> Self {
        Self::from_fn(format, |r, c| {
            let raw = crate::cast::quantize_real(rows[r][c], format.frac_bits, format.rnd);
            let clamped = crate::cast::int_convert(
                raw,
                format.int_bits,
                format.frac_bits,
                format.signed,
                format.ovf,
            );
            #[allow(clippy::cast_possible_truncation)]
            DynFixed::new(clamped as i32, format)
        })
    }

    /// Builds a matrix from a flat row-major slice, checking its length.
    ///
    /// # Errors
    /// Returns [`ConfigError::ShapeMismatch`] if `slice.len() != R * C`.
    pub fn from_slice(format: DynFormat, slice: &[i32]) -> Result<Self, ConfigError> {
        if slice.len() != R * C {
            return Err(ConfigError::ShapeMismatch {
                op: "Matrix::from_slice",
                expected: (R, C),
                lhs: (slice.len(), 1),
                rhs: (R, C),
            });
        }
        let mut data = [[0; C]; R];
        for (idx, v) in slice.iter().enumerate() {
            data[idx / C][idx % C] = *v;
        }
        Ok(Self { format, data })
    }

    /// This matrix's shared format.
    #[must_use]
    pub const fn format(&self) -> DynFormat {
        self.format
    }

    /// The `(rows, cols)` shape. Always `(R, C)`; provided for call sites
    /// that only hold a `&Matrix` through a trait object or slice.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (R, C)
    }

    /// Reads element `(r, c)` as a [`DynFixed`].
    #[must_use]
    pub fn at(&self, r: usize, c: usize) -> DynFixed {
        DynFixed::new(self.data[r][c], self.format)
    }

    /// Writes element `(r, c)`.
    pub fn set(&mut self, r: usize, c: usize, v: DynFixed) {
        debug_assert_eq!(v.format, self.format, "set element format must match matrix format");
        self.data[r][c] = v.data;
    }

    /// Raw row-major data, for kernels that want direct integer access.
    #[must_use]
    pub const fn raw(&self) -> &[[i32; C]; R] {
        &self.data
    }

    /// Transposes into a `C x R` matrix of the same format.
    #[must_use]
    pub fn transpose(&self) -> Matrix<C, R> {
        Matrix::from_fn(self.format, |r, c| self.at(c, r))
    }

    /// Real-number view of every element, row-major.
    #[must_use]
    pub fn to_reals(&self) -> [[f64; C]; R] {
        let mut out = [[0.0; C]; R];
        for r in 0..R {
            for c in 0..C {
                out[r][c] = self.at(r, c).to_f64();
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::format::{OvfMode, RndMode};

    fn fmt() -> DynFormat {
        DynFormat::try_new(8, 8, true, RndMode::Tcpl, OvfMode::SatTcpl).unwrap()
    }

    #[test]
    fn from_reals_round_trips() {
        let m = Matrix::<2, 2>::from_reals(fmt(), [[1.0, 2.0], [3.0, 4.0]]);
        assert!((m.at(1, 0).to_f64() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn transpose_swaps_indices() {
        let m = Matrix::<2, 3>::from_reals(fmt(), [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert!((t.at(2, 1).to_f64() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn from_slice_rejects_wrong_length() {
        let err = Matrix::<2, 2>::from_slice(fmt(), &[1, 2, 3]);
        assert!(err.is_err());
    }
}
