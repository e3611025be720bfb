//! Conversions between [`Matrix`] and `ndarray::Array2<f64>`.

use super::{Matrix, ShapeError};
use ndarray::Array2;

impl From<&Array2<f64>> for Matrix {
    fn from(array: &Array2<f64>) -> Self {
        let (rows, cols) = array.dim();
        let mut out = Matrix::zeros(rows, cols);
        for ((i, j), &v) in array.indexed_iter() {
            out.set(i, j, v);
        }
        out
    }
}

impl TryFrom<&Matrix> for Array2<f64> {
    type Error = ShapeError;

    fn try_from(m: &Matrix) -> Result<Self, Self::Error> {
        Array2::from_shape_vec(m.shape(), m.as_slice().to_vec())
            .map_err(|_| ShapeError::new("to_ndarray", m.shape(), (m.as_slice().len(), 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_ndarray_conversion_preserves_layout() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let m = Matrix::from(&a);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.get(1, 0), 4.0);

        let back = Array2::<f64>::try_from(&m).unwrap();
        assert_eq!(back, a);
    }
}
