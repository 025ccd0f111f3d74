use chrono::Local;
use riskwise::assessment::{
    DiabetesAssessment, HeartQuestionnaireAssessment, PredictionResult, RiskDomain,
    ThyroidAssessment, WhatIfOutcome,
};
use riskwise::error::AppError;
use serde::Serialize;

const DISCLAIMER: &str =
    "Educational estimate only. This is not a diagnosis; consult a clinician about your results.";

pub(crate) fn header(title: &str) {
    println!("{title}");
    println!("Generated {}", Local::now().format("%Y-%m-%d %H:%M"));
    println!("{DISCLAIMER}");
}

pub(crate) fn json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn schema(domain: RiskDomain) -> Result<(), AppError> {
    println!("{}", domain.schema().to_json_pretty()?);
    Ok(())
}

fn percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

pub(crate) fn prediction(domain: RiskDomain, prediction: &PredictionResult) {
    println!("\n{}", domain.label());
    println!("- Estimated risk: {}", percent(prediction.probability));
    if let (Some(label), Some(threshold)) = (prediction.label, prediction.threshold) {
        println!(
            "- Screening result: {} (threshold {})",
            label.label(),
            percent(threshold)
        );
    }
}

pub(crate) fn heart_questionnaire(assessment: &HeartQuestionnaireAssessment) {
    prediction(RiskDomain::HeartQuestionnaire, &assessment.prediction);
    if assessment.available_changes.is_empty() {
        println!("- No lifestyle changes to explore for these answers");
        return;
    }
    println!("- Lifestyle changes you could explore:");
    for change in &assessment.available_changes {
        println!("    --change {} ({})", change.slug(), change.label());
    }
}

pub(crate) fn what_if(outcome: Option<&WhatIfOutcome>) {
    let Some(outcome) = outcome else {
        println!("- None of the requested lifestyle changes apply to these answers");
        return;
    };

    let applied: Vec<&str> = outcome.changes.iter().map(|change| change.label()).collect();
    println!("\nWhat if: {}", applied.join(", "));
    println!("- Current risk: {}", percent(outcome.baseline_probability));
    println!("- Risk with changes: {}", percent(outcome.displayed_probability));
    println!("- Reduction: {}", percent(outcome.risk_reduction));
}

pub(crate) fn diabetes(assessment: &DiabetesAssessment) {
    prediction(RiskDomain::Diabetes, &assessment.prediction);
    println!(
        "- BMI: {:.2} ({})",
        assessment.bmi.value,
        assessment.bmi.category.label()
    );
    println!("- Family history score: {:.2}", assessment.genetic_risk_score);
}

pub(crate) fn thyroid(assessment: &ThyroidAssessment) {
    println!("\n{}", RiskDomain::Thyroid.label());
    println!(
        "- Estimated risk: {:.1}% ({})",
        assessment.percent,
        assessment.band.label()
    );
    println!(
        "- BMI: {:.2} ({})",
        assessment.bmi.value,
        assessment.bmi.category.label()
    );
    println!("- {}", assessment.guidance);
}
