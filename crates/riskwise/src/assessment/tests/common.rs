use std::sync::Arc;

use crate::assessment::answers::AnswerSet;
use crate::assessment::derived::{BodyMeasurements, FamilyHistory};
use crate::assessment::domains::diabetes::DiabetesScreening;
use crate::assessment::domains::heart::{HeartQuestionnaire, QUESTIONNAIRE_SCHEMA};
use crate::assessment::domains::thyroid::{Ethnicity, ThyroidQuestionnaire};
use crate::assessment::domains::{Level, RiskDomain, Sex};
use crate::assessment::model::{
    Classifier, LogisticRegression, ModelArtifact, RegressionTree, StandardScaler, TreeEnsemble,
    TreeNode,
};
use crate::assessment::registry::ModelRegistry;
use crate::assessment::schema::FeatureSchema;
use crate::assessment::service::RiskAssessmentService;

pub(super) const HEART_INTERCEPT: f64 = -1.0;
pub(super) const SMOKING_WEIGHT: f64 = 1.2;
pub(super) const STRESS_WEIGHT: f64 = 0.3;

pub(super) fn logistic(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

fn artifact(schema: &FeatureSchema, model: Classifier) -> ModelArtifact {
    ModelArtifact {
        schema: schema.id().name.to_string(),
        schema_version: schema.id().version,
        feature_cols: schema.columns().iter().map(|c| c.to_string()).collect(),
        model,
        scaler: None,
        threshold: None,
    }
}

fn weights(schema: &FeatureSchema, entries: &[(&str, f64)]) -> Vec<f64> {
    let mut coefficients = vec![0.0; schema.len()];
    for (column, weight) in entries {
        let position = schema.position(column).expect("column exists");
        coefficients[position] = *weight;
    }
    coefficients
}

fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> RegressionTree {
    RegressionTree {
        nodes: vec![
            TreeNode::Split {
                feature,
                threshold,
                left: 1,
                right: 2,
                default_left: true,
            },
            TreeNode::Leaf { value: left },
            TreeNode::Leaf { value: right },
        ],
    }
}

/// Only Smoking and Stress Level carry weight, so probabilities are easy to derive by hand.
pub(super) fn heart_questionnaire_artifact() -> ModelArtifact {
    let schema = QUESTIONNAIRE_SCHEMA;
    artifact(
        &schema,
        Classifier::LogisticRegression(LogisticRegression {
            coefficients: weights(
                &schema,
                &[("Smoking", SMOKING_WEIGHT), ("Stress Level", STRESS_WEIGHT)],
            ),
            intercept: HEART_INTERCEPT,
        }),
    )
}

/// Single stump on `ca`: no vessels -> margin -1, otherwise +1.
pub(super) fn heart_clinical_artifact() -> ModelArtifact {
    let schema = RiskDomain::HeartClinical.schema();
    let ca = schema.position("ca").expect("ca column");
    artifact(
        &schema,
        Classifier::GradientBoostedTrees(TreeEnsemble {
            base_margin: 0.0,
            trees: vec![stump(ca, 0.5, -1.0, 1.0)],
        }),
    )
}

/// Standardized glucose is the only signal: margin = -0.5 + (glucose - 120) / 30.
pub(super) fn diabetes_artifact() -> ModelArtifact {
    let schema = RiskDomain::Diabetes.schema();
    let mut mean = vec![0.0; schema.len()];
    let mut scale = vec![1.0; schema.len()];
    mean[1] = 120.0;
    scale[1] = 30.0;

    let mut artifact = artifact(
        &schema,
        Classifier::LogisticRegression(LogisticRegression {
            coefficients: weights(&schema, &[("Glucose", 1.0)]),
            intercept: -0.5,
        }),
    );
    artifact.scaler = Some(StandardScaler { mean, scale });
    artifact
}

/// Nodules of 2 cm or more push the margin from -1.5 to +0.5.
pub(super) fn thyroid_artifact() -> ModelArtifact {
    let schema = RiskDomain::Thyroid.schema();
    let nodule = schema.position("Nodule_Size").expect("nodule column");
    artifact(
        &schema,
        Classifier::GradientBoostedTrees(TreeEnsemble {
            base_margin: 0.0,
            trees: vec![stump(nodule, 2.0, -1.5, 0.5)],
        }),
    )
}

pub(super) fn registry() -> ModelRegistry {
    ModelRegistry::new()
        .with_artifact(RiskDomain::HeartQuestionnaire, heart_questionnaire_artifact())
        .and_then(|r| r.with_artifact(RiskDomain::HeartClinical, heart_clinical_artifact()))
        .and_then(|r| r.with_artifact(RiskDomain::Diabetes, diabetes_artifact()))
        .and_then(|r| r.with_artifact(RiskDomain::Thyroid, thyroid_artifact()))
        .expect("fixture artifacts are valid")
}

pub(super) fn service() -> RiskAssessmentService {
    RiskAssessmentService::new(Arc::new(registry()))
}

pub(super) fn smoker() -> HeartQuestionnaire {
    HeartQuestionnaire {
        age: 54,
        gender: Sex::Male,
        blood_pressure: 138.0,
        bmi: 27.4,
        smoking: true,
        exercise: Level::Low,
        sleep_hours: 6.0,
        stress: Level::Medium,
        sugar: Level::High,
        diabetes: false,
        family_heart_disease: true,
        high_blood_pressure: true,
    }
}

pub(super) fn smoker_answers() -> AnswerSet {
    smoker().answers()
}

pub(super) fn diabetes_screening(glucose: f64) -> DiabetesScreening {
    DiabetesScreening {
        sex: Sex::Female,
        pregnancies: 2,
        glucose,
        blood_pressure: 72.0,
        skin_thickness: 29.0,
        insulin: 94.0,
        age: 41,
        body: BodyMeasurements {
            height_feet: 5.0,
            height_inches: 6.0,
            weight_kg: 70.0,
        },
        family: FamilyHistory {
            parent: true,
            sibling: false,
            grandparent: true,
            early_onset: false,
        },
    }
}

pub(super) fn thyroid_questionnaire(
    nodule_size: f64,
    ethnicity: Ethnicity,
) -> ThyroidQuestionnaire {
    ThyroidQuestionnaire {
        age: 38,
        gender: Sex::Female,
        ethnicity,
        family_history: false,
        radiation_exposure: false,
        iodine_deficiency: true,
        smoking: false,
        diabetes: false,
        nodule_size,
        body: BodyMeasurements {
            height_feet: 5.0,
            height_inches: 4.0,
            weight_kg: 80.0,
        },
    }
}
