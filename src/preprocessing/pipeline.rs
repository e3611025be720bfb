//! The extract → standardize → persist → load pipeline.
//!
//! [`StandardizationPipeline::extract_and_transform`] reads a raw delimited
//! file, keeps the rows that carry two numeric features, computes the feature
//! statistics over all of them and only then standardizes and writes the
//! result. [`StandardizationPipeline::load_dataset`] reads that artifact back
//! for training.
//!
//! # Example
//!
//! ```no_run
//! use logit_etl::preprocessing::{PipelineConfig, StandardizationPipeline};
//!
//! let config = PipelineConfig::default().with_output_path("out/standardized.csv");
//! let mut pipeline = StandardizationPipeline::new(config);
//!
//! let summary = pipeline.extract_and_transform("data.csv", true)?;
//! println!("kept {} of {} rows", summary.rows_kept, summary.rows_read);
//!
//! let dataset = pipeline.load_dataset()?;
//! assert_eq!(pipeline.header().len(), 3);
//! # Ok::<(), logit_etl::preprocessing::PreprocessingError>(())
//! ```

use crate::dataset::StandardizedDataset;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::record::{
    parse_numeric, RawRecord, SelectedRow, StandardizedRecord, N_FEATURES,
};
use crate::preprocessing::statistics::{
    synthesized_names, DegeneratePolicy, FeatureStatistic, FittedStandardizer, Standardizer,
};
use crate::preprocessing::traits::Transformer;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Column label given to the passed-through target in the artifact header.
pub const TARGET_COLUMN: &str = "Target";

/// Configuration for [`StandardizationPipeline`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Where the standardized CSV is written and later loaded from.
    pub output_path: PathBuf,
    /// Field delimiter of the raw source. The artifact is always comma separated.
    pub delimiter: u8,
    /// Handling of zero-variance feature columns.
    pub degenerate_policy: DegeneratePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("standardized_data.csv"),
            delimiter: b',',
            degenerate_policy: DegeneratePolicy::Fail,
        }
    }
}

impl PipelineConfig {
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }
}

/// Outcome of a successful [`StandardizationPipeline::extract_and_transform`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformSummary {
    /// Data rows seen, header excluded.
    pub rows_read: usize,
    /// Rows written to the artifact.
    pub rows_kept: usize,
    /// Rows without two numeric tokens, or unreadable as text.
    pub rows_dropped: usize,
    /// Header written to the artifact.
    pub header: Vec<String>,
    /// Statistics the rows were standardized with.
    pub statistics: Vec<FeatureStatistic>,
    pub output_path: PathBuf,
}

/// Two-pass column standardization with a file artifact in between.
#[derive(Debug, Clone)]
pub struct StandardizationPipeline {
    config: PipelineConfig,
    header: Vec<String>,
    fitted: Option<FittedStandardizer>,
}

impl Default for StandardizationPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl StandardizationPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            header: Vec::new(),
            fitted: None,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Column names of the last artifact written or loaded; empty before either.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Statistics from the last successful [`Self::extract_and_transform`].
    pub fn statistics(&self) -> Option<&FittedStandardizer> {
        self.fitted.as_ref()
    }

    /// Reads `source`, standardizes the two selected features and writes the
    /// artifact to [`PipelineConfig::output_path`], replacing any previous one.
    ///
    /// Rows without two numeric tokens are dropped and counted. When
    /// `has_header` is false a header is synthesized.
    ///
    /// # Errors
    /// - [`PreprocessingError::SourceNotFound`] if `source` cannot be opened
    /// - [`PreprocessingError::EmptyData`] if no row survives selection
    /// - [`PreprocessingError::DegenerateColumn`] under [`DegeneratePolicy::Fail`]
    /// - I/O and CSV errors while reading or writing
    pub fn extract_and_transform<P: AsRef<Path>>(
        &mut self,
        source: P,
        has_header: bool,
    ) -> Result<TransformSummary, PreprocessingError> {
        let source = source.as_ref();
        let file = File::open(source).map_err(|e| PreprocessingError::SourceNotFound {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .delimiter(self.config.delimiter)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut source_header: Option<RawRecord> = None;
        let mut header_pending = has_header;
        let mut rows: Vec<SelectedRow> = Vec::new();
        let mut rows_read = 0;

        for result in reader.records() {
            let is_header = std::mem::replace(&mut header_pending, false);
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    if is_header {
                        debug!(error = %e, "unreadable header, synthesizing names");
                    } else {
                        rows_read += 1;
                        debug!(error = %e, "dropping unreadable row");
                    }
                    continue;
                }
            };
            let raw = RawRecord::from(&record);
            if is_header {
                source_header = Some(raw);
                continue;
            }
            rows_read += 1;
            match raw.select_features() {
                Some(row) => rows.push(row),
                None => debug!(
                    line = record.position().map(|p| p.line()),
                    "dropping row without two numeric features and a numeric target"
                ),
            }
        }

        let first = rows.first().ok_or_else(|| {
            PreprocessingError::EmptyData(format!(
                "no row in {} has two numeric values",
                source.display()
            ))
        })?;
        let names = feature_names(source_header.as_ref(), first.columns);

        // pass 1: statistics over every kept row
        let values: Vec<[f64; N_FEATURES]> = rows.iter().map(|r| r.values).collect();
        let fitted = Standardizer::new()
            .with_feature_names(names.clone())
            .with_policy(self.config.degenerate_policy)
            .fit(&values)?;

        // pass 2: standardize against the final statistics
        let records: Vec<StandardizedRecord> =
            rows.iter().map(|r| fitted.standardize(r)).collect();

        let header: Vec<String> = names
            .into_iter()
            .chain(std::iter::once(TARGET_COLUMN.to_string()))
            .collect();
        write_artifact(&self.config.output_path, &header, &records)?;

        let summary = TransformSummary {
            rows_read,
            rows_kept: records.len(),
            rows_dropped: rows_read - records.len(),
            header: header.clone(),
            statistics: fitted.statistics().to_vec(),
            output_path: self.config.output_path.clone(),
        };
        info!(
            source = %source.display(),
            output = %self.config.output_path.display(),
            rows_read = summary.rows_read,
            rows_kept = summary.rows_kept,
            "standardized dataset written"
        );

        self.header = header;
        self.fitted = Some(fitted);
        Ok(summary)
    }

    /// Reads the standardized artifact back into memory.
    ///
    /// The first line becomes [`Self::header`]. Lines whose first three fields
    /// are not all numeric are skipped with a warning. Loading is read-only, so
    /// repeated calls on the same artifact return identical data.
    ///
    /// # Errors
    /// [`PreprocessingError::ArtifactNotFound`] if nothing has been written to
    /// the configured path.
    pub fn load_dataset(&mut self) -> Result<StandardizedDataset, PreprocessingError> {
        let path = &self.config.output_path;
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PreprocessingError::ArtifactNotFound(path.clone()),
            _ => PreprocessingError::Io(e),
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut header = Vec::new();
        let mut features = Vec::new();
        let mut targets = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            if idx == 0 {
                header = record.iter().map(str::to_string).collect();
                continue;
            }
            match parse_artifact_line(&record) {
                Some((point, target)) => {
                    features.push(point);
                    targets.push(target);
                }
                None => warn!(
                    line = idx + 1,
                    path = %path.display(),
                    "skipping malformed line in standardized dataset"
                ),
            }
        }

        self.header = header;
        let dataset = StandardizedDataset::new(features, targets)
            .map_err(|e| PreprocessingError::Serialization(e.to_string()))?;
        debug!(rows = dataset.len(), "standardized dataset loaded");
        Ok(dataset)
    }
}

/// Header names at the positions the features were taken from, falling back to
/// synthesized names when the source has no header or it is too short.
fn feature_names(header: Option<&RawRecord>, columns: [usize; N_FEATURES]) -> [String; N_FEATURES] {
    let tokens = match header {
        Some(h) => h.tokens(),
        None => return synthesized_names(),
    };
    match (tokens.get(columns[0]), tokens.get(columns[1])) {
        (Some(a), Some(b)) => [a.clone(), b.clone()],
        _ => synthesized_names(),
    }
}

fn parse_artifact_line(record: &csv::StringRecord) -> Option<([f64; N_FEATURES], f64)> {
    let f1 = parse_numeric(record.get(0)?)?;
    let f2 = parse_numeric(record.get(1)?)?;
    let target = parse_numeric(record.get(2)?)?;
    Some(([f1, f2], target))
}

fn write_artifact(
    path: &Path,
    header: &[String],
    records: &[StandardizedRecord],
) -> Result<(), PreprocessingError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    for rec in records {
        writer.write_record([
            rec.features[0].to_string(),
            rec.features[1].to_string(),
            rec.target.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(contents: &str) -> (TempDir, PathBuf, StandardizationPipeline) {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("raw.csv");
        fs::write(&source, contents).unwrap();
        let config = PipelineConfig::default().with_output_path(dir.path().join("std.csv"));
        (dir, source, StandardizationPipeline::new(config))
    }

    #[test]
    fn test_pipeline_config_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.delimiter, b',');
        assert_eq!(config.degenerate_policy, DegeneratePolicy::Fail);
        assert_eq!(config.output_path, PathBuf::from("standardized_data.csv"));
    }

    #[test]
    fn test_extract_and_transform_toy_dataset() {
        let (_dir, source, mut pipeline) = setup("f1,f2,label\n0,0,0\n1,1,0\n5,5,1\n6,6,1\n");
        let summary = pipeline.extract_and_transform(&source, true).unwrap();

        assert_eq!(summary.rows_read, 4);
        assert_eq!(summary.rows_kept, 4);
        assert_eq!(summary.rows_dropped, 0);
        assert_eq!(summary.header, vec!["f1", "f2", "Target"]);
        assert!((summary.statistics[0].mean - 3.0).abs() < 1e-12);

        let written = fs::read_to_string(&summary.output_path).unwrap();
        assert!(written.starts_with("f1,f2,Target\n"));
        assert_eq!(written.lines().count(), 5);
    }

    #[test]
    fn test_malformed_rows_are_dropped() {
        let (_dir, source, mut pipeline) =
            setup("a,b,label\n1,2,0\nx,3,y\nfoo,bar,1\n4,oops,8,1\n\n");
        let summary = pipeline.extract_and_transform(&source, true).unwrap();
        assert_eq!(summary.rows_read, 4);
        assert_eq!(summary.rows_kept, 2);
        assert_eq!(summary.rows_dropped, 2);

        let ds = pipeline.load_dataset().unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.targets(), &[0.0, 1.0]);
    }

    #[test]
    fn test_stray_quote_does_not_merge_rows() {
        let (_dir, source, mut pipeline) =
            setup("f1,f2,label\n1,2,0\n3,\"4,1\n5,6,1\n7,8,0\n");
        let summary = pipeline.extract_and_transform(&source, true).unwrap();
        assert_eq!(summary.rows_read, 4);
        assert_eq!(summary.rows_kept, 4);
        assert_eq!(summary.rows_dropped, 0);

        let ds = pipeline.load_dataset().unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.targets(), &[0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_text_targets_are_dropped_before_statistics() {
        let (_dir, source, mut pipeline) = setup("f1,f2,label\n0,0,0\n1,1,0\n5,5,yes\n6,6,1\n");
        let summary = pipeline.extract_and_transform(&source, true).unwrap();
        assert_eq!(summary.rows_kept, 3);
        assert_eq!(summary.rows_dropped, 1);

        let ds = pipeline.load_dataset().unwrap();
        assert_eq!(ds.len(), summary.rows_kept);
        for col in 0..2 {
            let mean = ds.features().iter().map(|r| r[col]).sum::<f64>() / ds.len() as f64;
            assert!(mean.abs() < 1e-9, "mean[{col}] = {mean}");
        }
    }

    #[test]
    fn test_all_text_targets_is_empty_data() {
        let (_dir, source, mut pipeline) = setup("f1,f2,label\n0,0,no\n1,1,no\n5,5,yes\n");
        let err = pipeline.extract_and_transform(&source, true).unwrap_err();
        assert!(matches!(err, PreprocessingError::EmptyData(_)));
    }

    #[test]
    fn test_unreadable_header_is_not_counted_as_row() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("raw.csv");
        let mut bytes = b"f1,f\xff2,label\n".to_vec();
        bytes.extend_from_slice(b"0,0,0\n2,4,1\n");
        fs::write(&source, bytes).unwrap();
        let mut pipeline = StandardizationPipeline::new(
            PipelineConfig::default().with_output_path(dir.path().join("std.csv")),
        );

        let summary = pipeline.extract_and_transform(&source, true).unwrap();
        assert_eq!(summary.rows_read, 2);
        assert_eq!(summary.rows_kept, 2);
        assert_eq!(summary.header, vec!["feature_1", "feature_2", "Target"]);
    }

    #[test]
    fn test_header_names_follow_selected_columns() {
        let (_dir, source, mut pipeline) =
            setup("name,age,city,fare,survived\nann,22,rome,7.25,0\nbob,38,oslo,71.3,1\n");
        let summary = pipeline.extract_and_transform(&source, true).unwrap();
        assert_eq!(summary.header, vec!["age", "fare", "Target"]);
    }

    #[test]
    fn test_missing_header_is_synthesized() {
        let (_dir, source, mut pipeline) = setup("0,0,0\n2,4,1\n");
        let summary = pipeline.extract_and_transform(&source, false).unwrap();
        assert_eq!(summary.rows_kept, 2);
        assert_eq!(pipeline.header(), &["feature_1", "feature_2", "Target"]);
    }

    #[test]
    fn test_source_not_found() {
        let mut pipeline = StandardizationPipeline::default();
        let err = pipeline
            .extract_and_transform("/definitely/not/here.csv", true)
            .unwrap_err();
        assert!(matches!(err, PreprocessingError::SourceNotFound { .. }));
        assert!(pipeline.statistics().is_none());
    }

    #[test]
    fn test_no_valid_rows_is_empty_data() {
        let (_dir, source, mut pipeline) = setup("a,b\nx,y\n");
        let err = pipeline.extract_and_transform(&source, true).unwrap_err();
        assert!(matches!(err, PreprocessingError::EmptyData(_)));
    }

    #[test]
    fn test_constant_column_fails_by_default() {
        let (_dir, source, mut pipeline) = setup("a,b,t\n1,1,0\n1,2,1\n1,3,0\n");
        let err = pipeline.extract_and_transform(&source, true).unwrap_err();
        assert!(matches!(err, PreprocessingError::DegenerateColumn { ref feature } if feature == "a"));
    }

    #[test]
    fn test_custom_delimiter() {
        let (dir, source, _) = setup("a;b;t\n1;2;0\n3;6;1\n");
        let config = PipelineConfig::default()
            .with_output_path(dir.path().join("semi.csv"))
            .with_delimiter(b';');
        let mut pipeline = StandardizationPipeline::new(config);
        let summary = pipeline.extract_and_transform(&source, true).unwrap();
        assert_eq!(summary.rows_kept, 2);
    }

    #[test]
    fn test_load_before_extract_is_artifact_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default().with_output_path(dir.path().join("none.csv"));
        let err = StandardizationPipeline::new(config)
            .load_dataset()
            .unwrap_err();
        assert!(matches!(err, PreprocessingError::ArtifactNotFound(_)));
    }

    #[test]
    fn test_load_dataset_is_idempotent() {
        let (_dir, source, mut pipeline) = setup("f1,f2,label\n0,0,0\n1,1,0\n5,5,1\n6,6,1\n");
        pipeline.extract_and_transform(&source, true).unwrap();
        let first = pipeline.load_dataset().unwrap();
        let second = pipeline.load_dataset().unwrap();
        assert_eq!(first, second);
        assert_eq!(pipeline.header(), &["f1", "f2", "Target"]);
    }

    #[test]
    fn test_rerun_overwrites_artifact() {
        let (dir, source, mut pipeline) = setup("f1,f2,label\n0,0,0\n1,1,0\n5,5,1\n6,6,1\n");
        pipeline.extract_and_transform(&source, true).unwrap();

        let smaller = dir.path().join("smaller.csv");
        fs::write(&smaller, "f1,f2,label\n0,1,0\n2,3,1\n").unwrap();
        pipeline.extract_and_transform(&smaller, true).unwrap();

        assert_eq!(pipeline.load_dataset().unwrap().len(), 2);
    }

    #[test]
    fn test_load_skips_malformed_artifact_lines() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("std.csv");
        fs::write(&artifact, "f1,f2,Target\n0.5,-0.5,1\nbad,line,0\n-1,1,0\n").unwrap();
        let mut pipeline =
            StandardizationPipeline::new(PipelineConfig::default().with_output_path(&artifact));
        let ds = pipeline.load_dataset().unwrap();
        assert_eq!(ds.features(), &[[0.5, -0.5], [-1.0, 1.0]]);
    }
}
