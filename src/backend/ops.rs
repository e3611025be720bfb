//! Shape-checked matrix operations.
//!
//! Every binary operation validates both operand shapes before touching any
//! data, so a [`ShapeError`] never leaves a half-written result behind.

use super::{Matrix, ShapeError};

/// Lower bound applied to [`sigmoid`] outputs; the upper bound is `1 - SIGMOID_FLOOR`.
///
/// Keeps probabilities strictly inside `(0, 1)` even where `exp` saturates.
pub const SIGMOID_FLOOR: f64 = 1e-15;

/// Adds the single row `b` to every row of `a`.
///
/// `a` is `(R, C)`, `b` must be `(1, C)`.
pub fn add_broadcast_row(a: &Matrix, b: &Matrix) -> Result<Matrix, ShapeError> {
    if b.rows() != 1 || b.cols() != a.cols() {
        return Err(ShapeError::new("add_broadcast_row", a.shape(), b.shape()));
    }
    let bias = b.row(0);
    let data = a
        .iter_rows()
        .flat_map(|row| row.iter().zip(bias).map(|(x, y)| x + y))
        .collect();
    Matrix::new(data, a.rows(), a.cols())
}

/// Elementwise `a - b`; both operands must have the same shape.
pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix, ShapeError> {
    if a.shape() != b.shape() {
        return Err(ShapeError::new("subtract", a.shape(), b.shape()));
    }
    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| x - y)
        .collect();
    Matrix::new(data, a.rows(), a.cols())
}

/// Vector/vector or coefficient/vector multiplication.
///
/// Two cases are supported, checked in this order:
///
/// 1. **Shared row count.** The operand with more columns is the wide one and
///    fixes the result shape. Each element is multiplied by the narrow operand's
///    value in the same row, at column `min(j, cols(narrow) - 1)`.
/// 2. **Coefficient row.** One operand has exactly one row. Every row of the
///    other operand is multiplied elementwise by it, with the coefficient column
///    clamped the same way when the operand is wider.
///
/// Every other combination, and any operand with zero columns, is a
/// [`ShapeError`].
///
/// ```rust
/// use logit_etl::backend::{scale_or_vector_multiply, Matrix};
///
/// // (N, 1) residuals broadcast across (N, 2) features.
/// let diff = Matrix::column(&[2.0, -1.0]);
/// let x = Matrix::from_rows(&[vec![1.0, 3.0], vec![4.0, 5.0]]).unwrap();
/// let out = scale_or_vector_multiply(&diff, &x).unwrap();
/// assert_eq!(out.as_slice(), &[2.0, 6.0, -4.0, -5.0]);
/// ```
pub fn scale_or_vector_multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, ShapeError> {
    let err = || ShapeError::new("scale_or_vector_multiply", a.shape(), b.shape());
    if a.cols() == 0 || b.cols() == 0 {
        return Err(err());
    }

    if a.rows() == b.rows() {
        let (wide, narrow) = if a.cols() >= b.cols() { (a, b) } else { (b, a) };
        let last = narrow.cols() - 1;
        let mut out = Matrix::zeros(wide.rows(), wide.cols());
        for i in 0..wide.rows() {
            for j in 0..wide.cols() {
                out.set(i, j, wide.get(i, j) * narrow.get(i, j.min(last)));
            }
        }
        return Ok(out);
    }

    if a.rows() == 1 || b.rows() == 1 {
        let (coef, other) = if a.rows() == 1 { (a, b) } else { (b, a) };
        let last = coef.cols() - 1;
        let coef_row = coef.row(0);
        let mut out = Matrix::zeros(other.rows(), other.cols());
        for i in 0..other.rows() {
            for j in 0..other.cols() {
                out.set(i, j, coef_row[j.min(last)] * other.get(i, j));
            }
        }
        return Ok(out);
    }

    Err(err())
}

/// Standard matrix product, `(rows(a), cols(b))`.
pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix, ShapeError> {
    if a.cols() != b.rows() {
        return Err(ShapeError::new("matmul", a.shape(), b.shape()));
    }
    let mut out = Matrix::zeros(a.rows(), b.cols());
    for i in 0..a.rows() {
        let lhs = a.row(i);
        for j in 0..b.cols() {
            let acc = lhs
                .iter()
                .enumerate()
                .map(|(k, &x)| x * b.get(k, j))
                .sum();
            out.set(i, j, acc);
        }
    }
    Ok(out)
}

/// Column-wise sum: one row with the sum of each column.
pub fn row_sum(x: &Matrix) -> Matrix {
    let mut sums = vec![0.0; x.cols()];
    for row in x.iter_rows() {
        for (acc, v) in sums.iter_mut().zip(row) {
            *acc += v;
        }
    }
    Matrix::row_vector(&sums)
}

/// Column-wise mean: one row with the arithmetic mean of each column.
///
/// # Errors
/// Returns [`ShapeError`] for a matrix with no rows.
pub fn row_mean(x: &Matrix) -> Result<Matrix, ShapeError> {
    if x.rows() == 0 {
        return Err(ShapeError::new("row_mean", x.shape(), (1, x.cols())));
    }
    Ok(row_sum(x).scale(1.0 / x.rows() as f64))
}

pub fn transpose(x: &Matrix) -> Matrix {
    let mut out = Matrix::zeros(x.cols(), x.rows());
    for i in 0..x.rows() {
        for j in 0..x.cols() {
            out.set(j, i, x.get(i, j));
        }
    }
    out
}

/// Elementwise logistic function `1 / (1 + e^-z)`.
///
/// Uses the `e^z / (1 + e^z)` form for negative inputs so large magnitudes do
/// not overflow, then clamps into `[SIGMOID_FLOOR, 1 - SIGMOID_FLOOR]`.
pub fn sigmoid(z: &Matrix) -> Matrix {
    z.map(|v| {
        let s = if v >= 0.0 {
            1.0 / (1.0 + (-v).exp())
        } else {
            let e = v.exp();
            e / (1.0 + e)
        };
        s.clamp(SIGMOID_FLOOR, 1.0 - SIGMOID_FLOOR)
    })
}
