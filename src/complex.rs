//! Complex-number composition over any scalar that supports the primitive
//! arithmetic ops.
//!
//! `Complex<T>`'s additive operators (`+`, `-`, unary `-`) are generic over
//! any `T` with the matching `core::ops` trait, so [`crate::scalar::FixedValue`]
//! (whose operators pick a fixed default bundle) composes directly. Multiply
//! is different: the library's policy vocabulary treats school-book and
//! Karatsuba as two decompositions of the same named operation, each with
//! its own per-intermediate-term policy, so `Complex::mul` dispatches on a
//! [`ComplexMulArgs`] bundle instead of delegating to `Mul`. That needs a
//! scalar whose own multiply/add/sub take a bundle too — [`BundledScalar`] —
//! which [`crate::dynfixed::DynFixed`] implements directly.

use core::ops::{Add, Neg, Sub};

use crate::error::ArithError;
use crate::policy::PolicyBundle;

/// A complex number `re + im*i` over scalar type `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complex<T> {
    /// Real part.
    pub re: T,
    /// Imaginary part.
    pub im: T,
}

impl<T> Complex<T> {
    /// Builds a complex value from its parts.
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl<T: Copy + Add<Output = T>> Add for Complex<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl<T: Copy + Sub<Output = T>> Sub for Complex<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl<T: Copy + Neg<Output = T>> Neg for Complex<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

/// A scalar whose primitive arithmetic takes an explicit [`PolicyBundle`]
/// rather than deriving its output format implicitly the way a `core::ops`
/// overload does. [`crate::dynfixed::DynFixed`] is this crate's only such
/// scalar; `Complex::mul`'s decompositions are built against this trait so
/// each intermediate product or sum can be policed independently.
pub trait BundledScalar: Copy {
    /// Multiplies `self` by `rhs` under `bundle`.
    fn mul(self, rhs: Self, bundle: &PolicyBundle) -> Self;
    /// Adds `rhs` to `self` under `bundle`.
    fn add(self, rhs: Self, bundle: &PolicyBundle) -> Self;
    /// Subtracts `rhs` from `self` under `bundle`.
    fn sub(self, rhs: Self, bundle: &PolicyBundle) -> Self;
}

impl BundledScalar for crate::dynfixed::DynFixed {
    fn mul(self, rhs: Self, bundle: &PolicyBundle) -> Self {
        crate::dynfixed::DynFixed::mul(self, rhs, bundle)
    }
    fn add(self, rhs: Self, bundle: &PolicyBundle) -> Self {
        crate::dynfixed::DynFixed::add(self, rhs, bundle)
    }
    fn sub(self, rhs: Self, bundle: &PolicyBundle) -> Self {
        crate::dynfixed::DynFixed::sub(self, rhs, bundle)
    }
}

/// Which decomposition a [`ComplexMulArgs`] selects for [`Complex::mul`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComplexMulMode {
    /// Four real multiplies, two adds: `(ac-bd) + (ad+bc)i`.
    #[default]
    Schoolbook,
    /// Three real multiplies, five adds: trades a multiply for extra adders,
    /// favorable when multiplier area dominates adder area.
    Karatsuba,
}

/// Named policy bundle selecting and configuring a [`Complex::mul`]
/// decomposition: one sub-bundle per intermediate product or sum, so a
/// caller tuning the datapath can give, say, the Karatsuba pre-sums more
/// headroom than the final combine without touching the other terms. Only
/// the sub-bundles for the selected `mode` are read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexMulArgs {
    /// Which decomposition to run.
    pub mode: ComplexMulMode,
    /// Schoolbook: `a*c`.
    pub ac: PolicyBundle,
    /// Schoolbook: `b*d`.
    pub bd: PolicyBundle,
    /// Schoolbook: `a*d`.
    pub ad: PolicyBundle,
    /// Schoolbook: `b*c`.
    pub bc: PolicyBundle,
    /// Karatsuba: `a+b`.
    pub apb: PolicyBundle,
    /// Karatsuba: `d-c`.
    pub dmc: PolicyBundle,
    /// Karatsuba: `c+d`.
    pub cpd: PolicyBundle,
    /// Karatsuba: `k1 = c*(a+b)`.
    pub k1: PolicyBundle,
    /// Karatsuba: `k2 = a*(d-c)`.
    pub k2: PolicyBundle,
    /// Karatsuba: `k3 = b*(c+d)`.
    pub k3: PolicyBundle,
    /// Both modes: the final real-part combine (`ac-bd` or `k1-k3`).
    pub re: PolicyBundle,
    /// Both modes: the final imaginary-part combine (`ad+bc` or `k1+k2`).
    pub im: PolicyBundle,
}

impl<T: BundledScalar> Complex<T> {
    /// Complex multiply, decomposed per `args.mode`.
    #[must_use]
    pub fn mul(self, rhs: Self, args: &ComplexMulArgs) -> Self {
        match args.mode {
            ComplexMulMode::Schoolbook => self.mul_schoolbook(rhs, args),
            ComplexMulMode::Karatsuba => self.mul_karatsuba(rhs, args),
        }
    }

    /// School-book complex multiply: four real multiplies, two adds.
    ///
    /// `(a+bi)(c+di) = (ac-bd) + (ad+bc)i`.
    fn mul_schoolbook(self, rhs: Self, args: &ComplexMulArgs) -> Self {
        let ac = self.re.mul(rhs.re, &args.ac);
        let bd = self.im.mul(rhs.im, &args.bd);
        let ad = self.re.mul(rhs.im, &args.ad);
        let bc = self.im.mul(rhs.re, &args.bc);
        Self {
            re: ac.sub(bd, &args.re),
            im: ad.add(bc, &args.im),
        }
    }

    /// Karatsuba's three-multiply complex product, trading one of the four
    /// multiplies for two extra adds.
    ///
    /// `k1 = c*(a+b)`, `k2 = a*(d-c)`, `k3 = b*(c+d)`;
    /// `re = k1 - k3`, `im = k1 + k2`.
    fn mul_karatsuba(self, rhs: Self, args: &ComplexMulArgs) -> Self {
        let apb = self.re.add(self.im, &args.apb);
        let dmc = rhs.im.sub(rhs.re, &args.dmc);
        let cpd = rhs.re.add(rhs.im, &args.cpd);
        let k1 = rhs.re.mul(apb, &args.k1);
        let k2 = self.re.mul(dmc, &args.k2);
        let k3 = self.im.mul(cpd, &args.k3);
        Self {
            re: k1.sub(k3, &args.re),
            im: k1.add(k2, &args.im),
        }
    }

    /// Distributes a real scalar `r` over `self` under one bundle:
    /// `r*(a+bi) = ra + rbi`.
    #[must_use]
    pub fn scale(self, r: T, bundle: &PolicyBundle) -> Self {
        Self {
            re: r.mul(self.re, bundle),
            im: r.mul(self.im, bundle),
        }
    }

    /// Complex division. Declared on this type's surface but not
    /// implemented: fixed-point complex division has no single canonical
    /// hardware decomposition the way multiply/add do, so every call
    /// reports [`ArithError::Unsupported`] rather than guessing one.
    ///
    /// # Errors
    /// Always returns `Err(ArithError::Unsupported(..))`.
    pub fn div(self, _rhs: Self) -> Result<Self, ArithError> {
        Err(ArithError::Unsupported("complex division"))
    }
}
