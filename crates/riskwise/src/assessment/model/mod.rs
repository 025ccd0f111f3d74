//! Evaluation of trained classifiers and the persisted artifact they travel in.
//!
//! Training happens offline; this module only reads what the trainer wrote. An artifact
//! is accepted only when its column list matches the shared [`FeatureSchema`] exactly, so
//! a reordered or renamed column fails at load time instead of producing a silent
//! misprediction.

mod linear;
mod scaler;
mod trees;

pub use linear::LogisticRegression;
pub use scaler::StandardScaler;
pub use trees::{RegressionTree, TreeEnsemble, TreeNode};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::schema::FeatureSchema;

pub(crate) fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

/// Supported classifier families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    LogisticRegression(LogisticRegression),
    GradientBoostedTrees(TreeEnsemble),
}

impl Classifier {
    /// Probability of the positive class for an already standardized row.
    pub fn probability(&self, values: &[f64]) -> f64 {
        match self {
            Classifier::LogisticRegression(model) => model.probability(values),
            Classifier::GradientBoostedTrees(model) => model.probability(values),
        }
    }

    fn validate(&self, width: usize) -> Result<(), ArtifactError> {
        match self {
            Classifier::LogisticRegression(model) => {
                if model.coefficients.len() != width {
                    return Err(ArtifactError::ModelWidth {
                        expected: width,
                        found: model.coefficients.len(),
                    });
                }
                if !model.intercept.is_finite()
                    || model.coefficients.iter().any(|weight| !weight.is_finite())
                {
                    return Err(ArtifactError::NonFiniteWeights);
                }
            }
            Classifier::GradientBoostedTrees(model) => {
                if !model.base_margin.is_finite() {
                    return Err(ArtifactError::NonFiniteWeights);
                }
                for (tree, nodes) in model.trees.iter().enumerate() {
                    nodes
                        .validate(width)
                        .map_err(|reason| ArtifactError::InvalidTree { tree, reason })?;
                }
            }
        }
        Ok(())
    }
}

/// Everything the offline trainer persists for one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema: String,
    pub schema_version: u32,
    pub feature_cols: Vec<String>,
    pub model: Classifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<StandardScaler>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl ModelArtifact {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ArtifactError> {
        serde_json::from_reader(reader).map_err(ArtifactError::Parse)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Check that this artifact was trained on exactly `schema`'s layout.
    pub fn validate_against(&self, schema: &FeatureSchema) -> Result<(), ArtifactError> {
        let id = schema.id();
        if self.schema != id.name {
            return Err(ArtifactError::SchemaName {
                expected: id.name,
                found: self.schema.clone(),
            });
        }
        if self.schema_version != id.version {
            return Err(ArtifactError::SchemaVersion {
                schema: id.name,
                expected: id.version,
                found: self.schema_version,
            });
        }

        let columns = schema.columns();
        if self.feature_cols.len() != columns.len() {
            return Err(ArtifactError::ColumnCount {
                expected: columns.len(),
                found: self.feature_cols.len(),
            });
        }
        if let Some((position, (expected, found))) = columns
            .iter()
            .zip(&self.feature_cols)
            .enumerate()
            .find(|(_, (expected, found))| **expected != found.as_str())
        {
            return Err(ArtifactError::ColumnOrder {
                position,
                expected: *expected,
                found: found.clone(),
            });
        }

        if let Some(scaler) = &self.scaler {
            if scaler.width() != columns.len() || scaler.scale.len() != columns.len() {
                return Err(ArtifactError::ScalerWidth {
                    expected: columns.len(),
                    mean: scaler.mean.len(),
                    scale: scaler.scale.len(),
                });
            }
            if let Some(column) = scaler.invalid_scale() {
                return Err(ArtifactError::InvalidScale {
                    column: columns[column],
                });
            }
        }

        if let Some(threshold) = self.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ArtifactError::InvalidThreshold(threshold));
            }
        }

        self.model.validate(columns.len())
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("unable to read model artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("artifact was trained for schema '{found}', expected '{expected}'")]
    SchemaName { expected: &'static str, found: String },
    #[error("artifact targets {schema}@v{found}, expected v{expected}")]
    SchemaVersion {
        schema: &'static str,
        expected: u32,
        found: u32,
    },
    #[error("artifact lists {found} feature columns, schema has {expected}")]
    ColumnCount { expected: usize, found: usize },
    #[error("feature column {position} is '{found}', schema expects '{expected}'")]
    ColumnOrder {
        position: usize,
        expected: &'static str,
        found: String,
    },
    #[error("model expects {found} inputs, schema has {expected}")]
    ModelWidth { expected: usize, found: usize },
    #[error("scaler has {mean} means and {scale} scales, schema has {expected} columns")]
    ScalerWidth {
        expected: usize,
        mean: usize,
        scale: usize,
    },
    #[error("scaler entry for column '{column}' is not a finite positive scale")]
    InvalidScale { column: &'static str },
    #[error("decision threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),
    #[error("model weights must be finite")]
    NonFiniteWeights,
    #[error("tree {tree} is malformed: {reason}")]
    InvalidTree { tree: usize, reason: String },
}
