//! Lazy element-wise expression views over matrices.
//!
//! `Expr` builds a tree of pending element-wise operations — `Qadd`,
//! `Qsub`, `Qmul`, `Qdiv`, `Qneg`, `Qabs` — without allocating an
//! intermediate [`Matrix`] at every step. Each node's shape is the pair of
//! const generics `R, C` it shares with every other node in the tree, so an
//! attempt to combine mismatched shapes is rejected by the type checker
//! when the tree is built, not at evaluation time. Evaluation (`at`) reads
//! one element through to its leaves and runs the full primitive-arithmetic
//! cast chain per element, via [`crate::dynfixed::DynFixed`]; [`Expr::eval`]
//! materializes every element into a concrete [`Matrix`].

use crate::dynfixed::DynFixed;
use crate::matrix::Matrix;
use crate::policy::{BinOp, PolicyBundle, UnOp};

/// A lazy element-wise expression over `R x C` matrices.
pub enum Expr<'a, const R: usize, const C: usize> {
    /// A reference to a concrete matrix.
    Leaf(&'a Matrix<R, C>),
    /// A binary element-wise operation between two sub-expressions.
    Bin(Box<Expr<'a, R, C>>, Box<Expr<'a, R, C>>, BinOp, PolicyBundle),
    /// A unary element-wise operation over a sub-expression.
    Un(Box<Expr<'a, R, C>>, UnOp, PolicyBundle),
}

impl<'a, const R: usize, const C: usize> Expr<'a, R, C> {
    /// Wraps a matrix as a leaf of the expression tree.
    #[must_use]
    pub fn leaf(m: &'a Matrix<R, C>) -> Self {
        Self::Leaf(m)
    }

    /// Builds `self + rhs` as a lazy node (`Qadd`).
    #[must_use]
    pub fn add(self, rhs: Self, bundle: PolicyBundle) -> Self {
        Self::Bin(Box::new(self), Box::new(rhs), BinOp::Add, bundle)
    }

    /// Builds `self - rhs` as a lazy node (`Qsub`).
    #[must_use]
    pub fn sub(self, rhs: Self, bundle: PolicyBundle) -> Self {
        Self::Bin(Box::new(self), Box::new(rhs), BinOp::Sub, bundle)
    }

    /// Builds `self * rhs` (element-wise, `Qmul`) as a lazy node.
    #[must_use]
    pub fn mul(self, rhs: Self, bundle: PolicyBundle) -> Self {
        Self::Bin(Box::new(self), Box::new(rhs), BinOp::Mul, bundle)
    }

    /// Builds `self / rhs` (element-wise, `Qdiv`) as a lazy node.
    #[must_use]
    pub fn div(self, rhs: Self, bundle: PolicyBundle) -> Self {
        Self::Bin(Box::new(self), Box::new(rhs), BinOp::Div, bundle)
    }

    /// Builds `-self` (`Qneg`) as a lazy node.
    #[must_use]
    pub fn neg(self, bundle: PolicyBundle) -> Self {
        Self::Un(Box::new(self), UnOp::Neg, bundle)
    }

    /// Builds `abs(self)` (`Qabs`) as a lazy node.
    #[must_use]
    pub fn abs(self, bundle: PolicyBundle) -> Self {
        Self::Un(Box::new(self), UnOp::Abs, bundle)
    }

    /// Evaluates element `(r, c)` by walking the tree down to its leaves.
    #[must_use]
    pub fn at(&self, r: usize, c: usize) -> DynFixed {
        match self {
            Self::Leaf(m) => m.at(r, c),
            Self::Bin(lhs, rhs, op, bundle) => {
                let a = lhs.at(r, c);
                let b = rhs.at(r, c);
                match op {
                    BinOp::Add => a.add(b, bundle),
                    BinOp::Sub => a.sub(b, bundle),
                    BinOp::Mul => a.mul(b, bundle),
                    BinOp::Div => a.div(b, bundle),
                }
            }
            Self::Un(inner, op, bundle) => {
                let v = inner.at(r, c);
                match op {
                    UnOp::Neg => v.neg(bundle),
                    UnOp::Abs => v.abs(bundle),
                }
            }
        }
    }

    /// Materializes the full tree into a concrete matrix in `out_format`,
    /// casting every evaluated element into it.
    #[must_use]
    pub fn eval(&self, out_format: crate::format::DynFormat) -> Matrix<R, C> {
        Matrix::from_fn(out_format, |r, c| self.at(r, c).cast_to(out_format))
    }
}
