use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::answers::AnswerSet;
use super::banding::RiskBand;
use super::derived::{BmiReading, BodyMeasurements, FamilyHistory};
use super::domains::RiskDomain;
use super::encoder::{encode, EncodeError};
use super::inference::{InferenceError, PredictionResult};
use super::registry::ModelRegistry;
use super::what_if::{
    partition_changes, LifestyleChange, LifestyleOverrides, OverrideError, WhatIfOutcome,
};

/// Entry point for every assessment flow. Holds no state beyond the loaded models.
#[derive(Debug, Clone)]
pub struct RiskAssessmentService {
    registry: Arc<ModelRegistry>,
}

impl RiskAssessmentService {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Encode `answers` for `domain` and score them.
    pub fn predict(
        &self,
        domain: RiskDomain,
        answers: &AnswerSet,
    ) -> Result<PredictionResult, AssessmentError> {
        let adapter = self
            .registry
            .adapter(domain)
            .ok_or(AssessmentError::ModelUnavailable(domain))?;

        let vector = encode(answers, adapter.schema())?;
        debug!(%domain, schema = %vector.schema(), features = ?vector.values(), "answers encoded");

        let prediction = adapter.predict(&vector)?;
        info!(
            %domain,
            probability = prediction.probability,
            label = prediction.label.map(|label| label.label()),
            "risk assessed"
        );
        Ok(prediction)
    }

    pub fn assess_heart_questionnaire(
        &self,
        answers: &AnswerSet,
    ) -> Result<HeartQuestionnaireAssessment, AssessmentError> {
        let prediction = self.predict(RiskDomain::HeartQuestionnaire, answers)?;
        Ok(HeartQuestionnaireAssessment {
            prediction,
            available_changes: LifestyleChange::available_for(answers),
        })
    }

    /// Score `baseline` again with `overrides` applied. Empty overrides are a no-op.
    pub fn recompute(
        &self,
        baseline: &AnswerSet,
        overrides: &LifestyleOverrides,
    ) -> Result<Option<PredictionResult>, AssessmentError> {
        if overrides.is_empty() {
            return Ok(None);
        }
        let updated = overrides.apply_to(baseline);
        self.predict(RiskDomain::HeartQuestionnaire, &updated).map(Some)
    }

    /// Like [`Self::recompute`] for an untyped override map, e.g. `{"Smoking": 0}`.
    pub fn recompute_answers(
        &self,
        baseline: &AnswerSet,
        overrides: AnswerSet,
    ) -> Result<Option<PredictionResult>, AssessmentError> {
        let overrides = LifestyleOverrides::try_from(overrides)?;
        self.recompute(baseline, &overrides)
    }

    /// Baseline and discounted what-if risk for the requested lifestyle changes.
    ///
    /// Changes the baseline does not offer are ignored; `None` when nothing applies.
    pub fn what_if(
        &self,
        baseline: &AnswerSet,
        changes: &[LifestyleChange],
    ) -> Result<Option<WhatIfOutcome>, AssessmentError> {
        let (applied, ignored) = partition_changes(baseline, changes);
        if !ignored.is_empty() {
            debug!(?ignored, "lifestyle changes not available for baseline");
        }
        if applied.is_empty() {
            return Ok(None);
        }

        let baseline_prediction = self.predict(RiskDomain::HeartQuestionnaire, baseline)?;
        let overrides = LifestyleOverrides::from_changes(applied.iter().copied());
        let Some(updated) = self.recompute(baseline, &overrides)? else {
            return Ok(None);
        };

        let outcome = WhatIfOutcome::new(
            applied,
            baseline_prediction.probability,
            updated.probability,
        );
        info!(
            baseline = outcome.baseline_probability,
            updated = outcome.updated_probability,
            displayed = outcome.displayed_probability,
            "what-if recomputed"
        );
        Ok(Some(outcome))
    }

    pub fn assess_heart_clinical(
        &self,
        answers: &AnswerSet,
    ) -> Result<PredictionResult, AssessmentError> {
        self.predict(RiskDomain::HeartClinical, answers)
    }

    pub fn assess_diabetes(
        &self,
        answers: &AnswerSet,
    ) -> Result<DiabetesAssessment, AssessmentError> {
        let prediction = self.predict(RiskDomain::Diabetes, answers)?;
        Ok(DiabetesAssessment {
            prediction,
            bmi: BodyMeasurements::from_answers(answers)?.reading(),
            genetic_risk_score: FamilyHistory::from_answers(answers)?.genetic_risk_score(),
        })
    }

    pub fn assess_thyroid(
        &self,
        answers: &AnswerSet,
    ) -> Result<ThyroidAssessment, AssessmentError> {
        let prediction = self.predict(RiskDomain::Thyroid, answers)?;
        let percent = prediction.percent();
        let band = RiskBand::from_probability(prediction.probability);
        Ok(ThyroidAssessment {
            prediction,
            percent,
            band,
            guidance: band.guidance(),
            bmi: BodyMeasurements::from_answers(answers)?.reading(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartQuestionnaireAssessment {
    pub prediction: PredictionResult,
    /// Lifestyle toggles worth offering for these answers.
    pub available_changes: Vec<LifestyleChange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiabetesAssessment {
    pub prediction: PredictionResult,
    pub bmi: BmiReading,
    pub genetic_risk_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThyroidAssessment {
    pub prediction: PredictionResult,
    pub percent: f64,
    pub band: RiskBand,
    pub guidance: &'static str,
    pub bmi: BmiReading,
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error(transparent)]
    Override(#[from] OverrideError),
    #[error("no model is loaded for {0}")]
    ModelUnavailable(RiskDomain),
}
