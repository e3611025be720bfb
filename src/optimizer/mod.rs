use crate::backend::{scale_or_vector_multiply, subtract, Matrix, ShapeError};
use crate::model::LogisticParams;

/// Trait for gradient-based optimizers.
///
/// Optimizers only update parameters; computing the gradients is the model's
/// job. Any model can be paired with any optimizer implemented for its
/// parameter type.
///
/// # Example
/// ```rust
/// use logit_etl::model::LogisticParams;
/// use logit_etl::optimizer::{Optimizer, Sgd};
///
/// let params = LogisticParams::from_values(&[1.0, 2.0], 0.5);
/// let grads = LogisticParams::from_values(&[10.0, -20.0], 1.0);
///
/// let updated = Sgd::new(0.1).step(&params, &grads).unwrap();
/// assert_eq!(updated.weights.as_slice(), &[0.0, 4.0]);
/// ```
pub trait Optimizer<P> {
    /// Returns `params - learning_rate * gradients` (or the optimizer's own
    /// rule). Inputs are not mutated.
    fn step(&self, params: &P, gradients: &P) -> Result<P, ShapeError>;
}

/// Stochastic gradient descent: `θ ← θ - η · ∇L(θ)`.
///
/// Stateless. Used here with full batches, so every step sees the whole
/// training set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    lr: f64,
}

impl Sgd {
    pub fn new(lr: f64) -> Self {
        Self { lr }
    }

    pub fn learning_rate(&self) -> f64 {
        self.lr
    }

    fn descend(&self, value: &Matrix, grad: &Matrix) -> Result<Matrix, ShapeError> {
        let scaled = scale_or_vector_multiply(&Matrix::scalar(self.lr), grad)?;
        subtract(value, &scaled)
    }
}

impl Optimizer<LogisticParams> for Sgd {
    fn step(
        &self,
        params: &LogisticParams,
        grads: &LogisticParams,
    ) -> Result<LogisticParams, ShapeError> {
        Ok(LogisticParams {
            weights: self.descend(&params.weights, &grads.weights)?,
            bias: self.descend(&params.bias, &grads.bias)?,
        })
    }
}
