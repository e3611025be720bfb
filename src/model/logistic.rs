//! Binary logistic regression: `p = sigmoid(X·W + b)`.
//!
//! [`LogisticParams`] is a plain value. [`LogisticModel::train_step`] takes the
//! current parameters and returns the updated ones together with the loss of
//! that step; nothing is stored between calls.

use crate::backend::{
    add_broadcast_row, matmul, row_mean, scale_or_vector_multiply, sigmoid, standard_normal,
    transpose, Matrix, ShapeError,
};
use crate::loss::{BinaryCrossEntropy, Loss};
use crate::model::TrainableModel;
use crate::optimizer::{Optimizer, Sgd};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Weights `(input_dim, 1)` and bias `(1, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    pub weights: Matrix,
    pub bias: Matrix,
}

impl LogisticParams {
    /// Standard normal weights and a zero bias.
    pub fn random<R: Rng + ?Sized>(input_dim: usize, rng: &mut R) -> Self {
        Self {
            weights: standard_normal(input_dim, 1, rng),
            bias: Matrix::scalar(0.0),
        }
    }

    pub fn zeros(input_dim: usize) -> Self {
        Self {
            weights: Matrix::zeros(input_dim, 1),
            bias: Matrix::scalar(0.0),
        }
    }

    /// Builds parameters from explicit values.
    pub fn from_values(weights: &[f64], bias: f64) -> Self {
        Self {
            weights: Matrix::column(weights),
            bias: Matrix::scalar(bias),
        }
    }

    pub fn input_dim(&self) -> usize {
        self.weights.rows()
    }

    pub fn bias_value(&self) -> f64 {
        self.bias.as_slice().first().copied().unwrap_or(0.0)
    }
}

/// Logistic regression trained by full-batch gradient descent.
#[derive(Debug, Clone)]
pub struct LogisticModel<L = BinaryCrossEntropy, O = Sgd> {
    loss_fn: L,
    optimizer: O,
}

impl LogisticModel {
    /// Binary cross-entropy and plain SGD at the given learning rate.
    pub fn new(learning_rate: f64) -> Self {
        Self::with_components(BinaryCrossEntropy, Sgd::new(learning_rate))
    }
}

impl<L, O> LogisticModel<L, O>
where
    L: Loss,
    O: Optimizer<LogisticParams>,
{
    pub fn with_components(loss_fn: L, optimizer: O) -> Self {
        Self { loss_fn, optimizer }
    }

    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Probabilities of the positive class, shape `(rows(x), 1)`.
    pub fn predict(&self, params: &LogisticParams, x: &Matrix) -> Result<Matrix, ShapeError> {
        self.forward(params, x)
    }

    /// One full-batch step.
    ///
    /// The returned loss is measured on this step's forward pass, i.e. before
    /// the update is applied.
    pub fn train_step(
        &self,
        params: &LogisticParams,
        x: &Matrix,
        y: &Matrix,
    ) -> Result<(LogisticParams, f64), ShapeError> {
        let p = self.forward(params, x)?;
        let loss = self.loss_fn.loss(&p, y)?;
        let grad_p = self.loss_fn.grad_wrt_prediction(&p, y)?;
        let grads = self.backward(params, x, &grad_p)?;
        let updated = self.optimizer.step(params, &grads)?;
        Ok((updated, loss))
    }
}

impl<L, O> TrainableModel for LogisticModel<L, O>
where
    L: Loss,
    O: Optimizer<LogisticParams>,
{
    type Params = LogisticParams;

    fn forward(&self, params: &LogisticParams, input: &Matrix) -> Result<Matrix, ShapeError> {
        let z = add_broadcast_row(&matmul(input, &params.weights)?, &params.bias)?;
        Ok(sigmoid(&z))
    }

    fn backward(
        &self,
        _params: &LogisticParams,
        input: &Matrix,
        grad_output: &Matrix,
    ) -> Result<LogisticParams, ShapeError> {
        // dW = mean over rows of diff_i * x_i, as a column
        let weighted = scale_or_vector_multiply(grad_output, input)?;
        let weights = transpose(&row_mean(&weighted)?);
        let bias = row_mean(grad_output)?;
        Ok(LogisticParams { weights, bias })
    }
}

/// Line `w1*x1 + w2*x2 + b = 0` solved for `x2`, as `(slope, intercept)`.
///
/// `None` unless the parameters have exactly two weights and `w2 != 0`.
pub fn decision_boundary(params: &LogisticParams) -> Option<(f64, f64)> {
    match params.weights.as_slice() {
        [w1, w2] if *w2 != 0.0 => Some((-w1 / w2, -params.bias_value() / w2)),
        _ => None,
    }
}
