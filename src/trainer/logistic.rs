//! Stateful facade over [`LogisticModel`]: owns the current parameters and the
//! loss history between calls to [`LogisticRegressionTrainer::fit`].

use super::{TrainError, TrainingReport};
use crate::backend::{Matrix, ShapeError};
use crate::model::logistic::decision_boundary;
use crate::model::{LogisticModel, LogisticParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Binary logistic regression trained with full-batch gradient descent.
///
/// Weights are drawn from `N(0, 1)` and the bias starts at zero. Calling
/// [`fit`](Self::fit) repeatedly continues from the current parameters and
/// keeps appending to the loss history.
///
/// # Example
/// ```rust
/// use logit_etl::backend::Matrix;
/// use logit_etl::trainer::LogisticRegressionTrainer;
///
/// let x = Matrix::from_rows(&[vec![-1.0, -1.0], vec![1.0, 1.0]]).unwrap();
/// let y = Matrix::column(&[0.0, 1.0]);
///
/// let mut trainer = LogisticRegressionTrainer::with_seed(2, 0.5, 42);
/// trainer.fit(&x, &y, 200).unwrap();
///
/// let p = trainer.predict(&x).unwrap();
/// assert!(p.get(0, 0) < 0.5 && p.get(1, 0) > 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct LogisticRegressionTrainer {
    model: LogisticModel,
    params: LogisticParams,
    loss_history: Vec<f64>,
    verbose: bool,
}

impl LogisticRegressionTrainer {
    /// Random initial weights from an entropy-seeded generator.
    pub fn new(input_dim: usize, learning_rate: f64) -> Self {
        Self::with_rng(input_dim, learning_rate, &mut StdRng::from_entropy())
    }

    /// Reproducible initial weights.
    pub fn with_seed(input_dim: usize, learning_rate: f64, seed: u64) -> Self {
        Self::with_rng(input_dim, learning_rate, &mut StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(input_dim: usize, learning_rate: f64, rng: &mut R) -> Self {
        Self::from_params(LogisticParams::random(input_dim, rng), learning_rate)
    }

    /// Resumes from known parameters, e.g. a previously saved [`TrainingReport`].
    pub fn from_params(params: LogisticParams, learning_rate: f64) -> Self {
        Self {
            model: LogisticModel::new(learning_rate),
            params,
            loss_history: Vec::new(),
            verbose: false,
        }
    }

    /// Log per-epoch loss at `info` instead of `debug`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn input_dim(&self) -> usize {
        self.params.input_dim()
    }

    pub fn learning_rate(&self) -> f64 {
        self.model.optimizer().learning_rate()
    }

    pub fn params(&self) -> &LogisticParams {
        &self.params
    }

    /// Runs exactly `epochs` full-batch steps on `x` `(n, input_dim)` and
    /// `y` `(n, 1)`.
    ///
    /// # Errors
    /// - [`TrainError::EmptyData`] if `x` has no rows
    /// - [`TrainError::Shape`] if `x` has the wrong number of columns or `y`
    ///   is not a single column with one entry per row of `x`
    ///
    /// Parameters are left untouched when an error is returned.
    pub fn fit(&mut self, x: &Matrix, y: &Matrix, epochs: usize) -> Result<(), TrainError> {
        if x.rows() == 0 {
            return Err(TrainError::EmptyData);
        }
        if x.cols() != self.input_dim() {
            return Err(ShapeError::new("fit", x.shape(), self.params.weights.shape()).into());
        }
        if y.shape() != (x.rows(), 1) {
            return Err(ShapeError::new("fit", y.shape(), (x.rows(), 1)).into());
        }

        let mut params = self.params.clone();
        let mut losses = Vec::with_capacity(epochs);
        for _ in 0..epochs {
            let (next, loss) = self.model.train_step(&params, x, y)?;
            params = next;
            losses.push(loss);
            let epoch = self.loss_history.len() + losses.len();
            if self.verbose {
                info!(epoch, loss, "epoch complete");
            } else {
                debug!(epoch, loss, "epoch complete");
            }
        }

        self.params = params;
        self.loss_history.extend(losses);
        Ok(())
    }

    /// Positive-class probabilities, shape `(rows(x), 1)`, each in `(0, 1)`.
    pub fn predict(&self, x: &Matrix) -> Result<Matrix, ShapeError> {
        self.model.predict(&self.params, x)
    }

    /// `1.0` where the probability is at least `threshold`, `0.0` elsewhere.
    pub fn predict_classes(&self, x: &Matrix, threshold: f64) -> Result<Matrix, ShapeError> {
        Ok(self
            .predict(x)?
            .map(|p| if p >= threshold { 1.0 } else { 0.0 }))
    }

    /// Fraction of rows whose predicted class matches `y`.
    pub fn accuracy(&self, x: &Matrix, y: &Matrix, threshold: f64) -> Result<f64, TrainError> {
        if x.rows() == 0 {
            return Err(TrainError::EmptyData);
        }
        let classes = self.predict_classes(x, threshold)?;
        if y.shape() != classes.shape() {
            return Err(ShapeError::new("accuracy", y.shape(), classes.shape()).into());
        }
        let correct = classes
            .as_slice()
            .iter()
            .zip(y.as_slice())
            .filter(|(c, t)| (*c - *t).abs() < 0.5)
            .count();
        Ok(correct as f64 / x.rows() as f64)
    }

    /// Loss of the most recent epoch, `0.0` before any training.
    pub fn loss(&self) -> f64 {
        self.loss_history.last().copied().unwrap_or(0.0)
    }

    pub fn loss_history(&self) -> &[f64] {
        &self.loss_history
    }

    /// `(slope, intercept)` of the 0.5-probability line in the `(x1, x2)` plane.
    ///
    /// `None` unless the model has two inputs and a non-zero second weight.
    pub fn decision_boundary(&self) -> Option<(f64, f64)> {
        decision_boundary(&self.params)
    }

    pub fn report(&self) -> TrainingReport {
        TrainingReport {
            input_dim: self.input_dim(),
            learning_rate: self.learning_rate(),
            epochs: self.loss_history.len(),
            weights: self.params.weights.as_slice().to_vec(),
            bias: self.params.bias_value(),
            final_loss: self.loss(),
            loss_history: self.loss_history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::{FittedTransformer, Standardizer, Transformer};
    use rand_distr::{Distribution, Normal};

    /// 50 points around (0, 0) labelled 0 and 50 around (5, 5) labelled 1.
    fn two_clusters(seed: u64) -> (Vec<[f64; 2]>, Vec<f64>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = Normal::new(0.0, 0.5).unwrap();
        let mut points = Vec::new();
        let mut labels = Vec::new();
        for (center, label) in [(0.0, 0.0), (5.0, 1.0)] {
            for _ in 0..50 {
                points.push([
                    center + noise.sample(&mut rng),
                    center + noise.sample(&mut rng),
                ]);
                labels.push(label);
            }
        }
        (points, labels)
    }

    fn standardized(points: &[[f64; 2]]) -> Matrix {
        let fitted = Standardizer::new().fit(points).unwrap();
        let rows: Vec<Vec<f64>> = points
            .iter()
            .map(|p| fitted.transform_point(p).to_vec())
            .collect();
        Matrix::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_new_trainer_state() {
        let t = LogisticRegressionTrainer::with_seed(3, 0.01, 1);
        assert_eq!(t.params().weights.shape(), (3, 1));
        assert_eq!(t.params().bias_value(), 0.0);
        assert_eq!(t.loss(), 0.0);
        assert!(t.loss_history().is_empty());
        assert_eq!(t.learning_rate(), 0.01);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = LogisticRegressionTrainer::with_seed(2, 0.01, 7);
        let b = LogisticRegressionTrainer::with_seed(2, 0.01, 7);
        assert_eq!(a.params(), b.params());
    }

    #[test]
    fn test_predict_is_strictly_inside_unit_interval() {
        let t = LogisticRegressionTrainer::from_params(
            LogisticParams::from_values(&[100.0, 100.0], 0.0),
            0.01,
        );
        let x = Matrix::from_rows(&[vec![10.0, 10.0], vec![-10.0, -10.0], vec![0.0, 0.0]]).unwrap();
        let p = t.predict(&x).unwrap();
        assert_eq!(p.shape(), (3, 1));
        for &v in p.as_slice() {
            assert!(v > 0.0 && v < 1.0, "{v}");
            assert!(!v.is_nan());
        }
    }

    #[test]
    fn test_two_clusters_converge() {
        let (points, labels) = two_clusters(42);
        let x = standardized(&points);
        let y = Matrix::column(&labels);

        let mut t = LogisticRegressionTrainer::with_seed(2, 0.01, 42);
        t.fit(&x, &y, 2000).unwrap();

        let history = t.loss_history();
        assert_eq!(history.len(), 2000);
        assert!(t.loss() < history[0]);
        assert!(t.accuracy(&x, &y, 0.5).unwrap() >= 0.9);
    }

    #[test]
    fn test_toy_dataset_loss_mostly_decreases() {
        let points = [[0.0, 0.0], [1.0, 1.0], [5.0, 5.0], [6.0, 6.0]];
        let x = standardized(&points);
        let y = Matrix::column(&[0.0, 0.0, 1.0, 1.0]);

        let mut t = LogisticRegressionTrainer::with_seed(2, 0.1, 42);
        t.fit(&x, &y, 20).unwrap();

        let h = t.loss_history();
        let decreasing = h.windows(2).filter(|w| w[1] < w[0]).count();
        assert!(decreasing as f64 >= 0.8 * (h.len() - 1) as f64);
    }

    #[test]
    fn test_fit_appends_history() {
        let x = Matrix::from_rows(&[vec![-1.0], vec![1.0]]).unwrap();
        let y = Matrix::column(&[0.0, 1.0]);
        let mut t = LogisticRegressionTrainer::with_seed(1, 0.1, 0);
        t.fit(&x, &y, 3).unwrap();
        t.fit(&x, &y, 2).unwrap();
        assert_eq!(t.loss_history().len(), 5);
        assert_eq!(t.loss(), t.loss_history()[4]);
    }

    #[test]
    fn test_fit_shape_errors_leave_state_untouched() {
        let mut t = LogisticRegressionTrainer::with_seed(2, 0.1, 0);
        let before = t.params().clone();

        let wrong_cols = Matrix::zeros(4, 3);
        let y = Matrix::column(&[0.0, 1.0, 0.0, 1.0]);
        assert!(matches!(t.fit(&wrong_cols, &y, 5), Err(TrainError::Shape(_))));

        let x = Matrix::zeros(4, 2);
        let short_y = Matrix::column(&[0.0, 1.0]);
        assert!(matches!(t.fit(&x, &short_y, 5), Err(TrainError::Shape(_))));

        let wide_y = Matrix::zeros(4, 2);
        assert!(matches!(t.fit(&x, &wide_y, 5), Err(TrainError::Shape(_))));

        assert_eq!(t.params(), &before);
        assert!(t.loss_history().is_empty());
    }

    #[test]
    fn test_fit_empty_data() {
        let mut t = LogisticRegressionTrainer::with_seed(2, 0.1, 0);
        let err = t.fit(&Matrix::zeros(0, 2), &Matrix::zeros(0, 1), 1).unwrap_err();
        assert!(matches!(err, TrainError::EmptyData));
    }

    #[test]
    fn test_predict_classes_and_accuracy() {
        let t = LogisticRegressionTrainer::from_params(
            LogisticParams::from_values(&[1.0, 1.0], 0.0),
            0.1,
        );
        let x = Matrix::from_rows(&[vec![-2.0, -2.0], vec![2.0, 2.0], vec![3.0, 1.0]]).unwrap();
        let classes = t.predict_classes(&x, 0.5).unwrap();
        assert_eq!(classes.as_slice(), &[0.0, 1.0, 1.0]);

        let y = Matrix::column(&[0.0, 1.0, 0.0]);
        let acc = t.accuracy(&x, &y, 0.5).unwrap();
        assert!((acc - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_decision_boundary_from_trainer() {
        let t = LogisticRegressionTrainer::from_params(
            LogisticParams::from_values(&[2.0, 4.0], 8.0),
            0.1,
        );
        assert_eq!(t.decision_boundary(), Some((-0.5, -2.0)));
        assert!(LogisticRegressionTrainer::with_seed(3, 0.1, 0)
            .decision_boundary()
            .is_none());
    }

    #[test]
    fn test_report_reflects_state() {
        let x = Matrix::from_rows(&[vec![-1.0, 0.5], vec![1.0, -0.5]]).unwrap();
        let y = Matrix::column(&[0.0, 1.0]);
        let mut t = LogisticRegressionTrainer::with_seed(2, 0.05, 5);
        t.fit(&x, &y, 4).unwrap();
        let report = t.report();
        assert_eq!(report.epochs, 4);
        assert_eq!(report.input_dim, 2);
        assert_eq!(report.weights, t.params().weights.as_slice());
        assert_eq!(report.final_loss, t.loss());
        assert_eq!(report.learning_rate, 0.05);
    }
}
