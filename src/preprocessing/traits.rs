//! Core traits for preprocessing transformers.
//!
//! - [`Transformer`]: unfitted, holds configuration, learns from data.
//! - [`FittedTransformer`]: holds learned parameters, transforms points and can
//!   be saved to and restored from a bincode file.

use crate::preprocessing::error::PreprocessingError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// A transformer before fitting.
///
/// `fit` is the only way to obtain a [`FittedTransformer`], so nothing can be
/// transformed until every learned parameter is known.
pub trait Transformer: Clone {
    /// Data the transformer learns from.
    type Input: ?Sized;
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer;

    /// Learns parameters from the whole of `data`.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the data is empty or degenerate.
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError>;
}

/// A transformer with learned parameters.
pub trait FittedTransformer: Clone {
    /// A single sample.
    type Point;
    /// Serializable representation of learned parameters.
    type Params: Serialize + DeserializeOwned;

    fn transform_point(&self, point: &Self::Point) -> Self::Point;

    fn inverse_transform_point(&self, point: &Self::Point) -> Self::Point;

    /// Extract learned parameters as a serializable representation.
    fn extract_params(&self) -> Self::Params;

    /// Reconstruct a fitted transformer from parameters.
    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError>
    where
        Self: Sized;

    /// Returns the number of features seen during fit.
    fn n_features_in(&self) -> usize;

    /// Writes the learned parameters to `path` in bincode, replacing any file
    /// already there.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PreprocessingError> {
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, &self.extract_params())?;
        writer.flush()?;
        Ok(())
    }

    /// Restores a fitted transformer written by [`save_to_file`](Self::save_to_file).
    ///
    /// # Errors
    /// [`PreprocessingError::Serialization`] if the file is truncated or holds
    /// parameters of the wrong shape.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PreprocessingError>
    where
        Self: Sized,
    {
        let reader = BufReader::new(File::open(path)?);
        let params: Self::Params = bincode::deserialize_from(reader)?;
        Self::from_params(params)
    }
}
