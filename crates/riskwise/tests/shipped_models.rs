use std::path::PathBuf;
use std::sync::Arc;

use riskwise::assessment::{
    encode, BodyMeasurements, DiabetesScreening, Ethnicity, FamilyHistory, HeartQuestionnaire,
    Level, ModelRegistry, RiskAssessmentService, RiskBand, RiskDomain, Sex, ThyroidQuestionnaire,
};

fn models_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models")
}

fn service() -> RiskAssessmentService {
    let registry = ModelRegistry::load_dir(models_dir()).expect("shipped artifacts are valid");
    RiskAssessmentService::new(Arc::new(registry))
}

#[test]
fn every_domain_has_a_shipped_artifact() {
    let service = service();
    let loaded: Vec<RiskDomain> = service.registry().domains().collect();

    assert_eq!(loaded, RiskDomain::ordered().to_vec());
    assert_eq!(
        service
            .registry()
            .adapter(RiskDomain::Diabetes)
            .and_then(|adapter| adapter.threshold()),
        Some(0.4)
    );
}

#[test]
fn heart_questionnaire_scores_and_offers_what_if() {
    let service = service();
    let answers = HeartQuestionnaire {
        age: 63,
        gender: Sex::Male,
        blood_pressure: 160.0,
        bmi: 31.0,
        smoking: true,
        exercise: Level::Low,
        sleep_hours: 4.5,
        stress: Level::High,
        sugar: Level::High,
        diabetes: true,
        family_heart_disease: true,
        high_blood_pressure: true,
    }
    .answers();

    let assessment = service
        .assess_heart_questionnaire(&answers)
        .expect("assesses");
    assert!((0.0..=1.0).contains(&assessment.prediction.probability));
    assert_eq!(assessment.available_changes.len(), 5);

    let outcome = service
        .what_if(&answers, &assessment.available_changes)
        .expect("recomputes")
        .expect("changes apply");
    assert!(outcome.updated_probability < outcome.baseline_probability);
    assert!(outcome.displayed_probability <= outcome.updated_probability);
    assert_eq!(outcome.lifestyle_bonus, 0.18);
}

#[test]
fn diabetes_and_thyroid_flows_run_end_to_end() {
    let service = service();
    let body = BodyMeasurements {
        height_feet: 5.0,
        height_inches: 6.0,
        weight_kg: 70.0,
    };

    let diabetes = service
        .assess_diabetes(
            &DiabetesScreening {
                sex: Sex::Male,
                pregnancies: 4,
                glucose: 182.0,
                blood_pressure: 84.0,
                skin_thickness: 32.0,
                insulin: 160.0,
                age: 57,
                body,
                family: FamilyHistory {
                    parent: true,
                    sibling: true,
                    grandparent: true,
                    early_onset: true,
                },
            }
            .answers(),
        )
        .expect("assesses");
    assert!(diabetes.prediction.label.is_some());
    assert_eq!(diabetes.genetic_risk_score, 1.3);
    assert_eq!(diabetes.bmi.value, 24.91);

    let thyroid = service
        .assess_thyroid(
            &ThyroidQuestionnaire {
                age: 66,
                gender: Sex::Female,
                ethnicity: Ethnicity::Hispanic,
                family_history: true,
                radiation_exposure: true,
                iodine_deficiency: true,
                smoking: true,
                diabetes: false,
                nodule_size: 3.4,
                body,
            }
            .answers(),
        )
        .expect("assesses");
    assert_eq!(thyroid.band, RiskBand::from_percent(thyroid.percent));
    assert_eq!(thyroid.band, RiskBand::High);
    assert_eq!(thyroid.prediction.label, None);
}

#[test]
fn schema_export_lists_columns_in_order() {
    for domain in RiskDomain::ordered() {
        let schema = domain.schema();
        let json: serde_json::Value =
            serde_json::from_str(&schema.to_json_pretty().expect("serializes")).expect("json");

        assert_eq!(json["name"], domain.slug());
        assert_eq!(json["version"], 1);
        let columns: Vec<&str> = json["fields"]
            .as_array()
            .expect("fields array")
            .iter()
            .map(|field| field["column"].as_str().expect("column name"))
            .collect();
        assert_eq!(columns, schema.columns());
    }

    let thyroid = RiskDomain::Thyroid.schema().to_json_pretty().expect("serializes");
    assert!(thyroid.contains("\"rule\": \"one_hot\""));
    assert!(thyroid.contains("\"feature\": \"obesity_flag\""));
}

#[test]
fn shipped_schema_rejects_foreign_answers() {
    let answers = HeartQuestionnaire {
        age: 40,
        gender: Sex::Female,
        blood_pressure: 120.0,
        bmi: 22.0,
        smoking: false,
        exercise: Level::High,
        sleep_hours: 8.0,
        stress: Level::Low,
        sugar: Level::Low,
        diabetes: false,
        family_heart_disease: false,
        high_blood_pressure: false,
    }
    .answers();

    assert!(encode(&answers, &RiskDomain::Thyroid.schema()).is_err());
    assert!(encode(&answers, &RiskDomain::HeartQuestionnaire.schema()).is_ok());
}
