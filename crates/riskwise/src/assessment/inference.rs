use serde::Serialize;

use super::encoder::FeatureVector;
use super::model::{ArtifactError, Classifier, ModelArtifact, StandardScaler};
use super::schema::{FeatureSchema, SchemaId};

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Per-domain reporting rules applied on top of the raw model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionPolicy {
    /// Used when the artifact carries no threshold of its own.
    pub default_threshold: Option<f64>,
    /// Decimal places kept in the reported probability; `None` keeps full precision.
    pub precision: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    Positive,
    Negative,
}

impl RiskLabel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<RiskLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl PredictionResult {
    pub fn percent(&self) -> f64 {
        self.probability * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("feature vector was encoded for {found}, model is bound to {expected}")]
    SchemaMismatch { expected: SchemaId, found: SchemaId },
    #[error("feature vector has {found} values, model expects {expected}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("model produced a non-finite probability")]
    NonFiniteProbability,
}

/// A trained classifier bound to its schema, threshold and rounding policy. Read-only once built.
#[derive(Debug, Clone)]
pub struct RiskInferenceAdapter {
    schema: FeatureSchema,
    model: Classifier,
    scaler: Option<StandardScaler>,
    threshold: Option<f64>,
    precision: Option<u32>,
}

impl RiskInferenceAdapter {
    /// Validate `artifact` against `schema` and bind them.
    pub fn bind(
        schema: FeatureSchema,
        artifact: ModelArtifact,
        policy: PredictionPolicy,
    ) -> Result<Self, ArtifactError> {
        artifact.validate_against(&schema)?;

        let threshold = artifact.threshold.or(policy.default_threshold);
        if let Some(value) = threshold {
            if !(0.0..=1.0).contains(&value) {
                return Err(ArtifactError::InvalidThreshold(value));
            }
        }

        Ok(Self {
            schema,
            model: artifact.model,
            scaler: artifact.scaler,
            threshold,
            precision: policy.precision,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    pub fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult, InferenceError> {
        let expected = self.schema.id();
        if vector.schema() != expected {
            return Err(InferenceError::SchemaMismatch {
                expected,
                found: vector.schema(),
            });
        }
        if vector.len() != self.schema.len() {
            return Err(InferenceError::ShapeMismatch {
                expected: self.schema.len(),
                found: vector.len(),
            });
        }

        let raw = match &self.scaler {
            Some(scaler) => self.model.probability(&scaler.transform(vector.values())),
            None => self.model.probability(vector.values()),
        };
        if !raw.is_finite() {
            return Err(InferenceError::NonFiniteProbability);
        }
        let raw = raw.clamp(0.0, 1.0);

        let label = self.threshold.map(|threshold| {
            if raw >= threshold {
                RiskLabel::Positive
            } else {
                RiskLabel::Negative
            }
        });
        let probability = match self.precision {
            Some(places) => round_to(raw, places),
            None => raw,
        };

        Ok(PredictionResult {
            probability,
            label,
            threshold: self.threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_matches_reported_precision() {
        assert_eq!(round_to(0.41249, 3), 0.412);
        assert_eq!(round_to(0.4126, 3), 0.413);
        assert_eq!(round_to(24.9082, 2), 24.91);
    }
}
