//! # logit-etl
//!
//! Standardize a two-feature tabular dataset and fit a binary logistic
//! regression on it.
//!
//! ## Core Design Principles
//!
//! - **Two passes, one barrier**: statistics are computed over every valid row
//!   before any row is standardized. Standardization is only reachable through
//!   a fitted value, so the order is enforced by the types.
//! - **Explicit parameters**: a training step is a pure function from
//!   [`model::LogisticParams`] to new parameters plus the step's loss. The
//!   trainer facade only stores the result.
//! - **Shape contracts**: every matrix operation validates its operands and
//!   returns a [`backend::ShapeError`] instead of a partial result.
//!
//! ## Quick Start
//!
//! ```no_run
//! use logit_etl::preprocessing::{PipelineConfig, StandardizationPipeline};
//! use logit_etl::trainer::Trainer;
//!
//! let mut pipeline = StandardizationPipeline::new(PipelineConfig::default());
//! pipeline.extract_and_transform("titanic.csv", true)?;
//! let dataset = pipeline.load_dataset()?;
//!
//! let model = Trainer::builder()
//!     .learning_rate(0.01)
//!     .max_epochs(500)
//!     .seed(42)
//!     .build()
//!     .fit(&dataset)?;
//!
//! println!("final loss: {}", model.loss());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Structure
//!
//! - `backend` — dense matrices and the operations on them
//! - `preprocessing` — row selection, feature statistics, the CSV pipeline
//! - `dataset` — the loaded standardized data
//! - `model` — logistic regression forward and backward passes
//! - `loss` — binary cross-entropy
//! - `optimizer` — parameter updates (SGD)
//! - `trainer` — epoch loop, training facade, reports

pub mod backend;

/// Standardized data ready for training.
pub mod dataset;

/// Raw rows to a standardized artifact.
pub mod preprocessing;

/// Differentiable loss functions for model training.
pub mod loss;

/// Models with explicit parameter values.
pub mod model;

/// Optimization algorithms for parameter updates.
pub mod optimizer;

/// High-level training loop orchestration.
pub mod trainer;

pub use backend::{Matrix, ShapeError};
pub use dataset::StandardizedDataset;
pub use preprocessing::{PipelineConfig, PreprocessingError, StandardizationPipeline};
pub use trainer::{LogisticRegressionTrainer, TrainError, Trainer};
