//! Questionnaire answers in, calibrated risk out.
//!
//! Every flow runs the same pipeline: answers are encoded against a versioned
//! [`FeatureSchema`], the resulting vector is scored by the adapter bound to that schema,
//! and the probability is rounded and labelled per domain policy. The heart questionnaire
//! adds a lifestyle what-if pass; the thyroid flow adds qualitative banding.

pub mod answers;
pub mod banding;
pub mod batch;
pub mod derived;
pub mod domains;
pub mod encoder;
pub mod inference;
pub mod model;
pub mod registry;
pub mod schema;
pub mod service;
pub mod what_if;

#[cfg(test)]
mod tests;

pub use answers::{Answer, AnswerSet};
pub use banding::RiskBand;
pub use batch::{score_csv, BatchError, BatchSummary};
pub use derived::{BmiCategory, BmiReading, BodyMeasurements, FamilyHistory};
pub use domains::diabetes::DiabetesScreening;
pub use domains::heart::{
    ChestPain, HeartClinical, HeartQuestionnaire, RestingEcg, StSlope, Thalassemia,
};
pub use domains::thyroid::{Ethnicity, ThyroidQuestionnaire};
pub use domains::{Level, RiskDomain, Sex, UnknownDomain};
pub use encoder::{encode, EncodeError, FeatureVector};
pub use inference::{
    InferenceError, PredictionPolicy, PredictionResult, RiskInferenceAdapter, RiskLabel,
};
pub use model::{ArtifactError, Classifier, ModelArtifact, StandardScaler};
pub use registry::ModelRegistry;
pub use schema::{FeatureSchema, SchemaId};
pub use service::{
    AssessmentError, DiabetesAssessment, HeartQuestionnaireAssessment, RiskAssessmentService,
    ThyroidAssessment,
};
pub use what_if::{LifestyleChange, LifestyleOverrides, OverrideError, WhatIfOutcome};
