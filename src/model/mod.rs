//! Models and the trait the training step is written against.

pub mod logistic;

pub use logistic::{LogisticModel, LogisticParams};

use crate::backend::{Matrix, ShapeError};

/// A model whose parameters live outside of it.
///
/// Every method takes the parameters explicitly, so a training step is a pure
/// function from old parameters to new ones.
pub trait TrainableModel {
    type Params: Clone;

    /// Forward pass on a batch of row-major samples.
    fn forward(&self, params: &Self::Params, input: &Matrix) -> Result<Matrix, ShapeError>;

    /// Parameter gradients given the gradient of the loss w.r.t. the forward output.
    fn backward(
        &self,
        params: &Self::Params,
        input: &Matrix,
        grad_output: &Matrix,
    ) -> Result<Self::Params, ShapeError>;
}
