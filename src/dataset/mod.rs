//! In-memory training data produced by the standardization pipeline.
//!
//! A [`StandardizedDataset`] is a list of feature pairs with one numeric target
//! per pair. [`StandardizedDataset::to_matrices`] turns it into the `(X, y)`
//! matrices the trainer consumes:
//!
//! - `X` — shape `(n_samples, 2)`
//! - `y` — shape `(n_samples, 1)`
//!
//! # Example
//!
//! ```rust
//! use logit_etl::dataset::StandardizedDataset;
//!
//! let ds = StandardizedDataset::new(vec![[0.0, 1.0], [1.0, 0.0]], vec![0.0, 1.0]).unwrap();
//! let (x, y) = ds.to_matrices();
//! assert_eq!(x.shape(), (2, 2));
//! assert_eq!(y.shape(), (2, 1));
//! ```

use crate::backend::{Matrix, ShapeError};
use crate::preprocessing::N_FEATURES;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StandardizedDataset {
    features: Vec<[f64; N_FEATURES]>,
    targets: Vec<f64>,
}

impl StandardizedDataset {
    /// # Errors
    /// Returns [`ShapeError`] if `features` and `targets` differ in length.
    pub fn new(features: Vec<[f64; N_FEATURES]>, targets: Vec<f64>) -> Result<Self, ShapeError> {
        if features.len() != targets.len() {
            return Err(ShapeError::new(
                "dataset",
                (features.len(), N_FEATURES),
                (targets.len(), 1),
            ));
        }
        Ok(Self { features, targets })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[[f64; N_FEATURES]] {
        &self.features
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Builds the `(X, y)` pair for training and prediction.
    pub fn to_matrices(&self) -> (Matrix, Matrix) {
        let mut x = Matrix::zeros(self.len(), N_FEATURES);
        for (i, row) in self.features.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                x.set(i, j, v);
            }
        }
        (x, Matrix::column(&self.targets))
    }
}
