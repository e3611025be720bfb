//! Training loop orchestration.
//!
//! [`LogisticRegressionTrainer`] is the low-level handle: matrices in,
//! parameters and loss history out. [`Trainer`] is configured once through
//! [`TrainerBuilder`] and fits a [`StandardizedDataset`] end to end.

mod logistic;
mod report;

pub use logistic::LogisticRegressionTrainer;
pub use report::TrainingReport;

use crate::backend::ShapeError;
use crate::dataset::StandardizedDataset;
use crate::preprocessing::N_FEATURES;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("cannot train on an empty dataset")]
    EmptyData,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable training configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Trainer {
    pub(crate) learning_rate: f64,
    pub(crate) max_epochs: usize,
    pub(crate) seed: Option<u64>,
    pub(crate) verbose: bool,
}

pub struct TrainerBuilder {
    learning_rate: f64,
    max_epochs: usize,
    seed: Option<u64>,
    verbose: bool,
}

impl Default for TrainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainerBuilder {
    pub fn new() -> Self {
        Self {
            learning_rate: 0.01,
            max_epochs: 1000,
            seed: None,
            verbose: true,
        }
    }

    pub fn learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    pub fn max_epochs(mut self, epochs: usize) -> Self {
        self.max_epochs = epochs;
        self
    }

    /// Pins the weight initialization. Without a seed, OS entropy is used.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn build(self) -> Trainer {
        Trainer {
            learning_rate: self.learning_rate,
            max_epochs: self.max_epochs,
            seed: self.seed,
            verbose: self.verbose,
        }
    }
}

impl Trainer {
    pub fn builder() -> TrainerBuilder {
        TrainerBuilder::new()
    }

    /// Trains a fresh two-feature model on `dataset` for `max_epochs` epochs.
    ///
    /// # Errors
    /// [`TrainError::EmptyData`] if the dataset has no rows.
    pub fn fit(&self, dataset: &StandardizedDataset) -> Result<LogisticRegressionTrainer, TrainError> {
        if dataset.is_empty() {
            return Err(TrainError::EmptyData);
        }
        let (x, y) = dataset.to_matrices();

        let mut model = match self.seed {
            Some(seed) => LogisticRegressionTrainer::with_seed(N_FEATURES, self.learning_rate, seed),
            None => LogisticRegressionTrainer::new(N_FEATURES, self.learning_rate),
        }
        .verbose(self.verbose);

        model.fit(&x, &y, self.max_epochs)?;
        info!(
            rows = dataset.len(),
            epochs = self.max_epochs,
            final_loss = model.loss(),
            "training finished"
        );
        Ok(model)
    }
}
