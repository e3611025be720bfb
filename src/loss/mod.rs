//! Loss functions for binary classification.

use crate::backend::{subtract, Matrix, ShapeError};

/// Added inside the logarithms so a prediction of exactly 0 or 1 stays finite.
pub const BCE_EPSILON: f64 = 1e-8;

/// A differentiable loss used during training.
///
/// `grad_wrt_prediction` is what the model's backward pass consumes.
pub trait Loss {
    /// Scalar loss value, averaged over the batch.
    fn loss(&self, prediction: &Matrix, target: &Matrix) -> Result<f64, ShapeError>;

    /// Gradient of the loss with respect to the prediction.
    fn grad_wrt_prediction(&self, prediction: &Matrix, target: &Matrix)
        -> Result<Matrix, ShapeError>;
}

/// Binary cross-entropy over sigmoid outputs, in base-10 logarithms:
///
/// ```text
/// L = -(1/n) * Σ [ y·log10(p + ε) + (1 - y)·log10(1 - p + ε) ]
/// ```
///
/// The gradient is taken through the sigmoid, i.e. with respect to the logit,
/// which collapses to `p - y`. The base-10 scale factor is left to the
/// learning rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCrossEntropy;

impl Loss for BinaryCrossEntropy {
    fn loss(&self, prediction: &Matrix, target: &Matrix) -> Result<f64, ShapeError> {
        if prediction.shape() != target.shape() {
            return Err(ShapeError::new("bce", prediction.shape(), target.shape()));
        }
        let n = prediction.as_slice().len();
        if n == 0 {
            return Err(ShapeError::new("bce", prediction.shape(), target.shape()));
        }
        let total: f64 = prediction
            .as_slice()
            .iter()
            .zip(target.as_slice())
            .map(|(&p, &y)| y * (p + BCE_EPSILON).log10() + (1.0 - y) * (1.0 - p + BCE_EPSILON).log10())
            .sum();
        Ok(-total / n as f64)
    }

    fn grad_wrt_prediction(
        &self,
        prediction: &Matrix,
        target: &Matrix,
    ) -> Result<Matrix, ShapeError> {
        subtract(prediction, target)
    }
}
