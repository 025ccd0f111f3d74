pub mod diabetes;
pub mod heart;
pub mod thyroid;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::inference::PredictionPolicy;
use super::schema::FeatureSchema;

pub(crate) const FEMALE_MALE: &[&str] = &["Female", "Male"];
pub(crate) const LOW_MEDIUM_HIGH: &[&str] = &["Low", "Medium", "High"];

/// One model-backed assessment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskDomain {
    HeartQuestionnaire,
    HeartClinical,
    Diabetes,
    Thyroid,
}

impl RiskDomain {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::HeartQuestionnaire,
            Self::HeartClinical,
            Self::Diabetes,
            Self::Thyroid,
        ]
    }

    pub const fn schema(self) -> FeatureSchema {
        match self {
            Self::HeartQuestionnaire => heart::QUESTIONNAIRE_SCHEMA,
            Self::HeartClinical => heart::CLINICAL_SCHEMA,
            Self::Diabetes => diabetes::SCHEMA,
            Self::Thyroid => thyroid::SCHEMA,
        }
    }

    pub const fn policy(self) -> PredictionPolicy {
        match self {
            Self::HeartQuestionnaire => PredictionPolicy {
                default_threshold: None,
                precision: Some(3),
            },
            Self::HeartClinical | Self::Diabetes => PredictionPolicy {
                default_threshold: Some(0.40),
                precision: Some(3),
            },
            // Bands are drawn on the unrounded percentage.
            Self::Thyroid => PredictionPolicy {
                default_threshold: None,
                precision: None,
            },
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::HeartQuestionnaire => "heart_questionnaire",
            Self::HeartClinical => "heart_clinical",
            Self::Diabetes => "diabetes",
            Self::Thyroid => "thyroid",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HeartQuestionnaire => "Heart disease (questionnaire)",
            Self::HeartClinical => "Heart disease (clinical)",
            Self::Diabetes => "Diabetes",
            Self::Thyroid => "Thyroid malignancy",
        }
    }

    pub fn artifact_file(self) -> String {
        format!("{}.json", self.slug())
    }
}

impl fmt::Display for RiskDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown risk domain '{0}'")]
pub struct UnknownDomain(pub String);

impl FromStr for RiskDomain {
    type Err = UnknownDomain;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|domain| domain.slug() == normalized)
            .ok_or_else(|| UnknownDomain(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }
}

/// Three-step self-reported intensity used by the lifestyle questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domains_parse_from_cli_spelling() {
        assert_eq!(
            "heart-questionnaire".parse::<RiskDomain>(),
            Ok(RiskDomain::HeartQuestionnaire)
        );
        assert_eq!("Thyroid".parse::<RiskDomain>(), Ok(RiskDomain::Thyroid));
        assert!("kidney".parse::<RiskDomain>().is_err());
    }

    #[test]
    fn schema_names_match_artifact_files() {
        for domain in RiskDomain::ordered() {
            assert_eq!(domain.schema().id().name, domain.slug());
            assert_eq!(domain.artifact_file(), format!("{}.json", domain.slug()));
        }
    }

    #[test]
    fn thresholds_follow_trained_operating_points() {
        assert_eq!(RiskDomain::Diabetes.policy().default_threshold, Some(0.40));
        assert_eq!(RiskDomain::HeartClinical.policy().default_threshold, Some(0.40));
        assert_eq!(RiskDomain::HeartQuestionnaire.policy().default_threshold, None);
        assert_eq!(RiskDomain::Thyroid.policy().precision, None);
    }
}
