use super::ShapeError;
use serde::{Deserialize, Serialize};

/// Dense 2-D matrix of `f64` stored in row-major order.
///
/// The shape is fixed at construction. Values can be read and written in place,
/// but every combining operation in [`crate::backend::ops`] allocates a new
/// matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Builds a matrix from row-major data.
    ///
    /// # Errors
    /// Returns [`ShapeError`] if `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, ShapeError> {
        if data.len() != rows * cols {
            return Err(ShapeError::new("new", (rows, cols), (data.len(), 1)));
        }
        Ok(Self { data, rows, cols })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// A `(1, 1)` matrix holding `value`.
    pub fn scalar(value: f64) -> Self {
        Self::filled(1, 1, value)
    }

    /// A `(values.len(), 1)` column vector.
    pub fn column(values: &[f64]) -> Self {
        Self {
            data: values.to_vec(),
            rows: values.len(),
            cols: 1,
        }
    }

    /// A `(1, values.len())` row vector.
    pub fn row_vector(values: &[f64]) -> Self {
        Self {
            data: values.to_vec(),
            rows: 1,
            cols: values.len(),
        }
    }

    /// Builds a matrix from a slice of equally long rows.
    ///
    /// An empty slice yields a `(0, 0)` matrix.
    ///
    /// # Errors
    /// Returns [`ShapeError`] if the rows differ in length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ShapeError> {
        let n = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(ShapeError::new("from_rows", (n, cols), (1, bad.len())));
        }
        let data = rows.iter().flat_map(|r| r.iter()).copied().collect();
        Ok(Self {
            data,
            rows: n,
            cols,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(row, col)`.
    ///
    /// # Panics
    /// If the index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Overwrites the value at `(row, col)`.
    ///
    /// # Panics
    /// If the index is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.data[row * self.cols + col] = value;
    }

    /// Borrow one row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Copies the matrix into nested row vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    /// Applies `f` to every element, returning a new matrix of the same shape.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self {
            data: self.data.iter().map(|&x| f(x)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Multiplies every element by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        self.map(|x| x * factor)
    }
}

/// Unchecked wire form; deserialization goes through [`Matrix::new`].
#[derive(Deserialize)]
struct RawMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = ShapeError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Matrix::new(raw.data, raw.rows, raw.cols)
    }
}

impl TryFrom<&[Vec<f64>]> for Matrix {
    type Error = ShapeError;

    fn try_from(rows: &[Vec<f64>]) -> Result<Self, Self::Error> {
        Matrix::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        assert!(Matrix::new(vec![1.0, 2.0, 3.0], 2, 2).is_err());
        let m = Matrix::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        assert_eq!(m.get(1, 0), 3.0);
    }

    #[test]
    fn test_deserialize_checks_length() {
        let ok: Matrix = serde_json::from_str(r#"{"data":[1.0,2.0],"rows":2,"cols":1}"#).unwrap();
        assert_eq!(ok.shape(), (2, 1));

        let short = serde_json::from_str::<Matrix>(r#"{"data":[1.0],"rows":2,"cols":2}"#);
        assert!(short.is_err());
    }

    #[test]
    fn test_bincode_rejects_inconsistent_shape() {
        let mut bytes = bincode::serialize(&Matrix::zeros(2, 2)).unwrap();
        // rows is the first usize after the data vector (8-byte length + 4 values)
        let rows_at = 8 + 4 * 8;
        bytes[rows_at..rows_at + 8].copy_from_slice(&3u64.to_le_bytes());
        assert!(bincode::deserialize::<Matrix>(&bytes).is_err());
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err.op, "from_rows");
    }

    #[test]
    fn test_from_rows_empty() {
        let m = Matrix::from_rows(&[]).unwrap();
        assert_eq!(m.shape(), (0, 0));
        assert!(m.is_empty());
    }

    #[test]
    fn test_column_and_row_vector_shapes() {
        assert_eq!(Matrix::column(&[1.0, 2.0, 3.0]).shape(), (3, 1));
        assert_eq!(Matrix::row_vector(&[1.0, 2.0, 3.0]).shape(), (1, 3));
        assert_eq!(Matrix::scalar(4.0).shape(), (1, 1));
    }

    #[test]
    fn test_set_and_row_access() {
        let mut m = Matrix::zeros(2, 3);
        m.set(1, 2, 7.5);
        assert_eq!(m.row(1), &[0.0, 0.0, 7.5]);
        assert_eq!(m.iter_rows().count(), 2);
    }

    #[test]
    fn test_map_and_scale() {
        let m = Matrix::row_vector(&[1.0, -2.0]);
        assert_eq!(m.map(f64::abs).as_slice(), &[1.0, 2.0]);
        assert_eq!(m.scale(0.5).as_slice(), &[0.5, -1.0]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_get_out_of_bounds() {
        Matrix::zeros(1, 1).get(1, 0);
    }
}
