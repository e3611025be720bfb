//! Per-feature statistics and the standardizing transform built on them.
//!
//! Standardization is split into two strictly ordered passes:
//!
//! 1. [`Standardizer::fit`] walks every valid row and produces the mean and
//!    population standard deviation of each feature.
//! 2. [`FittedStandardizer`] applies `z = (x - mean) / std` row by row.
//!
//! The only way to get a [`FittedStandardizer`] is through `fit`, so a row can
//! never be standardized against statistics that are still being accumulated.

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::record::{SelectedRow, StandardizedRecord, N_FEATURES};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use serde::{Deserialize, Serialize};

/// Relative threshold below which a standard deviation counts as zero.
///
/// Averaging identical values does not always reproduce them exactly, so a
/// constant column can come out with a std around `1e-17` instead of `0`.
const DEGENERATE_STD_TOLERANCE: f64 = 1e-12;

/// What to do with a feature whose standard deviation is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DegeneratePolicy {
    /// Refuse to fit and report [`PreprocessingError::DegenerateColumn`].
    #[default]
    Fail,
    /// Treat the std as 1, so the value becomes its deviation from the mean.
    SubstituteUnitStd,
    /// Emit the raw value unchanged for that column.
    Passthrough,
}

/// Mean and population standard deviation of one feature column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStatistic {
    pub name: String,
    pub mean: f64,
    pub std: f64,
}

impl FeatureStatistic {
    /// Two-stage computation: the mean first, then the mean of squared
    /// deviations from it.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::EmptyData`] for an empty column.
    pub fn from_column<I>(name: impl Into<String>, column: I) -> Result<Self, PreprocessingError>
    where
        I: IntoIterator<Item = f64> + Clone,
    {
        let name = name.into();
        let (sum, n) = column
            .clone()
            .into_iter()
            .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
        if n == 0 {
            return Err(PreprocessingError::EmptyData(format!(
                "no values for feature `{name}`"
            )));
        }
        let mean = sum / n as f64;
        let var = column
            .into_iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n as f64;

        Ok(Self {
            name,
            mean,
            std: var.sqrt(),
        })
    }

    pub fn is_degenerate(&self) -> bool {
        self.std <= DEGENERATE_STD_TOLERANCE * self.mean.abs().max(1.0)
    }
}

/// Serializable parameters for a [`FittedStandardizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardizerParams {
    pub statistics: Vec<FeatureStatistic>,
    pub policy: DegeneratePolicy,
}

/// Unfitted standardizer: feature names plus the zero-std policy.
#[derive(Debug, Clone)]
pub struct Standardizer {
    names: [String; N_FEATURES],
    policy: DegeneratePolicy,
}

impl Default for Standardizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Standardizer {
    pub fn new() -> Self {
        Self {
            names: synthesized_names(),
            policy: DegeneratePolicy::default(),
        }
    }

    pub fn with_feature_names(mut self, names: [String; N_FEATURES]) -> Self {
        self.names = names;
        self
    }

    pub fn with_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Transformer for Standardizer {
    type Input = [[f64; N_FEATURES]];
    type Fitted = FittedStandardizer;

    fn fit(&self, data: &Self::Input) -> Result<FittedStandardizer, PreprocessingError> {
        if data.is_empty() {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit Standardizer on empty data".to_string(),
            ));
        }

        let mut statistics = Vec::with_capacity(N_FEATURES);
        for (col, name) in self.names.iter().enumerate() {
            let stat = FeatureStatistic::from_column(name.clone(), data.iter().map(|r| r[col]))?;
            if stat.is_degenerate() && self.policy == DegeneratePolicy::Fail {
                return Err(PreprocessingError::DegenerateColumn {
                    feature: stat.name,
                });
            }
            statistics.push(stat);
        }

        FittedStandardizer::from_params(StandardizerParams {
            statistics,
            policy: self.policy,
        })
    }
}

/// Standardizer with final statistics, ready for the second pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedStandardizer {
    statistics: [FeatureStatistic; N_FEATURES],
    policy: DegeneratePolicy,
}

impl FittedStandardizer {
    pub fn statistics(&self) -> &[FeatureStatistic; N_FEATURES] {
        &self.statistics
    }

    pub fn feature_names(&self) -> [String; N_FEATURES] {
        [
            self.statistics[0].name.clone(),
            self.statistics[1].name.clone(),
        ]
    }

    pub fn policy(&self) -> DegeneratePolicy {
        self.policy
    }

    /// Standardizes one selected row; the target is carried over verbatim.
    pub fn standardize(&self, row: &SelectedRow) -> StandardizedRecord {
        StandardizedRecord {
            features: self.transform_point(&row.values),
            target: row.target.clone(),
        }
    }

    fn forward(&self, stat: &FeatureStatistic, x: f64) -> f64 {
        if !stat.is_degenerate() {
            return (x - stat.mean) / stat.std;
        }
        match self.policy {
            DegeneratePolicy::SubstituteUnitStd => x - stat.mean,
            // Fail is rejected during fit; a hand-built params value lands here too
            DegeneratePolicy::Passthrough | DegeneratePolicy::Fail => x,
        }
    }

    fn backward(&self, stat: &FeatureStatistic, z: f64) -> f64 {
        if !stat.is_degenerate() {
            return z * stat.std + stat.mean;
        }
        match self.policy {
            DegeneratePolicy::SubstituteUnitStd => z + stat.mean,
            DegeneratePolicy::Passthrough | DegeneratePolicy::Fail => z,
        }
    }
}

impl FittedTransformer for FittedStandardizer {
    type Point = [f64; N_FEATURES];
    type Params = StandardizerParams;

    fn transform_point(&self, point: &Self::Point) -> Self::Point {
        [
            self.forward(&self.statistics[0], point[0]),
            self.forward(&self.statistics[1], point[1]),
        ]
    }

    fn inverse_transform_point(&self, point: &Self::Point) -> Self::Point {
        [
            self.backward(&self.statistics[0], point[0]),
            self.backward(&self.statistics[1], point[1]),
        ]
    }

    fn extract_params(&self) -> StandardizerParams {
        StandardizerParams {
            statistics: self.statistics.to_vec(),
            policy: self.policy,
        }
    }

    fn from_params(params: StandardizerParams) -> Result<Self, PreprocessingError> {
        let got = params.statistics.len();
        let statistics: [FeatureStatistic; N_FEATURES] =
            params.statistics.try_into().map_err(|_| {
                PreprocessingError::Serialization(format!(
                    "expected {N_FEATURES} feature statistics, got {got}"
                ))
            })?;
        Ok(Self {
            statistics,
            policy: params.policy,
        })
    }

    fn n_features_in(&self) -> usize {
        N_FEATURES
    }
}

/// Names used when the source has no header.
pub fn synthesized_names() -> [String; N_FEATURES] {
    ["feature_1".to_string(), "feature_2".to_string()]
}
