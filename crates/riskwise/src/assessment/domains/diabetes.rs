use serde::{Deserialize, Serialize};

use super::Sex;
use crate::assessment::answers::AnswerSet;
use crate::assessment::derived::{BodyMeasurements, FamilyHistory};
use crate::assessment::schema::{DerivedFeature, EncodingRule, FeatureField, FeatureSchema};

pub const PREGNANCIES: &str = "Pregnancies";
pub const GLUCOSE: &str = "Glucose";
pub const BLOOD_PRESSURE: &str = "BloodPressure";
pub const SKIN_THICKNESS: &str = "SkinThickness";
pub const INSULIN: &str = "Insulin";
pub const AGE: &str = "Age";

const FIELDS: &[FeatureField] = &[
    FeatureField::new(PREGNANCIES, EncodingRule::numeric(PREGNANCIES)),
    FeatureField::new(GLUCOSE, EncodingRule::numeric(GLUCOSE)),
    FeatureField::new(BLOOD_PRESSURE, EncodingRule::numeric(BLOOD_PRESSURE)),
    FeatureField::new(SKIN_THICKNESS, EncodingRule::numeric(SKIN_THICKNESS)),
    FeatureField::new(INSULIN, EncodingRule::numeric(INSULIN)),
    FeatureField::new("BMI", EncodingRule::derived(DerivedFeature::Bmi)),
    FeatureField::new(
        "DiabetesPedigreeFunction",
        EncodingRule::derived(DerivedFeature::GeneticRiskScore),
    ),
    FeatureField::new(AGE, EncodingRule::numeric(AGE)),
];

/// Pima layout. BMI and the pedigree proxy are derived from measurements and family history.
pub const SCHEMA: FeatureSchema = FeatureSchema::new("diabetes", 1, FIELDS);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabetesScreening {
    pub sex: Sex,
    /// Ignored for male respondents.
    #[serde(default)]
    pub pregnancies: u8,
    /// Plasma glucose, mg/dL.
    pub glucose: f64,
    /// Diastolic blood pressure, mmHg.
    pub blood_pressure: f64,
    /// Triceps skin fold, mm.
    pub skin_thickness: f64,
    /// Two-hour serum insulin, mu U/ml.
    pub insulin: f64,
    pub age: u8,
    pub body: BodyMeasurements,
    #[serde(default)]
    pub family: FamilyHistory,
}

impl DiabetesScreening {
    pub fn answers(&self) -> AnswerSet {
        let pregnancies = match self.sex {
            Sex::Female => self.pregnancies,
            Sex::Male => 0,
        };
        let mut answers = AnswerSet::new()
            .with(PREGNANCIES, pregnancies)
            .with(GLUCOSE, self.glucose)
            .with(BLOOD_PRESSURE, self.blood_pressure)
            .with(SKIN_THICKNESS, self.skin_thickness)
            .with(INSULIN, self.insulin)
            .with(AGE, self.age);
        self.body.write_answers(&mut answers);
        self.family.write_answers(&mut answers);
        answers
    }
}
