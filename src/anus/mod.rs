//! Arithmetic Nonlinear Utility Suite: the polynomial,
//! piecewise-polynomial, and ROM-emulating building blocks the linear
//! algebra kernels use for the nonlinear steps (`sqrt`, reciprocal) BLAS
//! itself never needs.

pub mod approx;
pub mod poly;
pub mod qtable;

pub use approx::Approx;
pub use poly::Poly;
pub use qtable::{exp_table, reciprocal_table, rsqrt_table, sqrt_table, Qtable};
