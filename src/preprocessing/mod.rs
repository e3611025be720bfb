//! Raw delimited data to a standardized training artifact.
//!
//! # Core Traits
//!
//! - [`Transformer`]: unfitted transformer holding configuration
//! - [`FittedTransformer`]: fitted transformer ready to apply to points
//!
//! # Pieces
//!
//! - [`RawRecord`] splits a line into tokens and selects the two features
//! - [`Standardizer`] computes per-feature statistics over every kept row
//! - [`FittedStandardizer`] applies `z = (x - mean) / std`
//! - [`StandardizationPipeline`] drives both passes and owns the CSV artifact
//!
//! # Example
//!
//! ```
//! use logit_etl::preprocessing::{FittedTransformer, Standardizer, Transformer};
//!
//! let rows = [[0.0, 0.0], [1.0, 1.0], [5.0, 5.0], [6.0, 6.0]];
//! let fitted = Standardizer::new().fit(&rows)?;
//!
//! let z = fitted.transform_point(&[3.0, 3.0]);
//! assert!(z[0].abs() < 1e-12);
//! # Ok::<(), logit_etl::preprocessing::PreprocessingError>(())
//! ```

pub mod error;
pub mod pipeline;
pub mod record;
pub mod statistics;
pub mod traits;

pub use error::PreprocessingError;
pub use pipeline::{PipelineConfig, StandardizationPipeline, TransformSummary, TARGET_COLUMN};
pub use record::{RawRecord, SelectedRow, StandardizedRecord, N_FEATURES};
pub use statistics::{
    DegeneratePolicy, FeatureStatistic, FittedStandardizer, Standardizer, StandardizerParams,
};
pub use traits::{FittedTransformer, Transformer};
