//! qfixed: a bit-exact fixed-point arithmetic and linear-algebra kernel
//! library for modeling ASIC/FPGA datapaths ahead of RTL commitment.
//!
//! The crate is built around two parallel representations of the same
//! casting algebra (see [`cast`]): a const-generic "static" scalar,
//! [`scalar::FixedValue`], whose format lives entirely in its type, and a
//! runtime "dynamic" scalar, [`dynfixed::DynFixed`], whose format is a
//! value computed by the merger rule in [`policy`]. Tensors
//! ([`matrix::Matrix`]), lazy expressions ([`expr::Expr`]), the tree
//! reducer ([`reduce`]), and every kernel in [`linalg`] are all built on
//! the dynamic scalar, since their output formats are a function of a
//! caller-supplied [`policy::PolicyBundle`] that cannot be resolved at
//! compile time without unstable `generic_const_exprs`.

pub mod anus;
pub mod cast;
pub mod complex;
pub mod dynfixed;
pub mod error;
pub mod expr;
pub mod format;
pub mod linalg;
pub mod matrix;
pub mod policy;
pub mod prng;
pub mod reduce;
pub mod scalar;

pub use complex::{BundledScalar, Complex, ComplexMulArgs, ComplexMulMode};
pub use dynfixed::DynFixed;
pub use error::{ArithError, ConfigError, DynCastError};
pub use expr::Expr;
pub use format::{
    Conv, DynFormat, Inf, NegInf, OverflowMode, OvfMode, PosInf, RndMode, RoundingMode, SatSmgn,
    SatTcpl, SatZero, Smgn, Tcpl, WrpTcpl, Zero, MAX_TOTAL_BITS,
};
pub use matrix::{Matrix, Vector};
pub use policy::{
    BinOp, GemulArgs, GemvArgs, GramulArgs, PolicyBundle, PotrfArgs, PotrsArgs, SytrfArgs,
    TrtriArgs, UnOp,
};
pub use prng::Prng;
pub use scalar::FixedValue;
