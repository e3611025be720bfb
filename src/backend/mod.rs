//! # Matrix Backend
//!
//! Dense, row-major `f64` matrices and the small set of linear-algebra
//! operations the trainer and the standardization pipeline are built on.
//!
//! ## Design Philosophy
//!
//! - **Explicit shape contracts**: every operation that combines two matrices
//!   checks their shapes up front and returns a [`ShapeError`] instead of
//!   producing a partial result.
//! - **Owned values**: operations take their operands by reference and return a
//!   freshly allocated [`Matrix`]; nothing is mutated behind the caller's back.
//! - **Broadcasting only where named**: a single-row operand is broadcast only by
//!   [`add_broadcast_row`] and [`scale_or_vector_multiply`]. Every other shape
//!   combination is rejected.
//!
//! ## Example
//!
//! ```rust
//! use logit_etl::backend::{matmul, transpose, Matrix};
//!
//! let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let b = transpose(&a);
//! let c = matmul(&a, &b).unwrap();
//! assert_eq!(c.shape(), (2, 2));
//! assert_eq!(c.get(0, 0), 5.0);
//! ```

pub mod matrix;
pub mod ops;
pub mod random;

#[cfg(feature = "ndarray")]
mod ndarray_interop;

pub use matrix::Matrix;
pub use ops::{
    add_broadcast_row, matmul, row_mean, row_sum, scale_or_vector_multiply, sigmoid, subtract,
    transpose,
};
pub use random::{
    random_normal, random_normal_from_entropy, random_normal_seeded, standard_normal,
};

/// Raised when an operation is invoked with incompatible matrix dimensions.
///
/// Carries the operation name and both operand shapes so the caller can report
/// a precise reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("shape mismatch in `{op}`: left is {left:?}, right is {right:?}")]
pub struct ShapeError {
    /// Name of the failing operation.
    pub op: &'static str,
    /// Shape `(rows, cols)` of the left operand.
    pub left: (usize, usize),
    /// Shape `(rows, cols)` of the right operand.
    pub right: (usize, usize),
}

impl ShapeError {
    pub(crate) fn new(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Self {
        Self { op, left, right }
    }
}
