//! Heart disease: the lifestyle questionnaire and the UCI clinical model.

use serde::{Deserialize, Serialize};

use super::{Level, Sex, FEMALE_MALE, LOW_MEDIUM_HIGH};
use crate::assessment::answers::AnswerSet;
use crate::assessment::derived::yes_no;
use crate::assessment::schema::{EncodingRule, FeatureField, FeatureSchema};

pub const AGE: &str = "Age";
pub const GENDER: &str = "Gender";
pub const BLOOD_PRESSURE: &str = "Blood Pressure";
pub const BMI: &str = "BMI";
pub const SMOKING: &str = "Smoking";
pub const EXERCISE_HABITS: &str = "Exercise Habits";
pub const SLEEP_HOURS: &str = "Sleep Hours";
pub const STRESS_LEVEL: &str = "Stress Level";
pub const SUGAR_CONSUMPTION: &str = "Sugar Consumption";
pub const DIABETES: &str = "Diabetes";
pub const FAMILY_HEART_DISEASE: &str = "Family Heart Disease";
pub const HIGH_BLOOD_PRESSURE: &str = "High Blood Pressure";

const QUESTIONNAIRE_FIELDS: &[FeatureField] = &[
    FeatureField::new(AGE, EncodingRule::numeric(AGE)),
    FeatureField::new(GENDER, EncodingRule::ordinal(GENDER, FEMALE_MALE)),
    FeatureField::new(BLOOD_PRESSURE, EncodingRule::numeric(BLOOD_PRESSURE)),
    FeatureField::new(BMI, EncodingRule::numeric(BMI)),
    FeatureField::new(SMOKING, EncodingRule::boolean(SMOKING)),
    FeatureField::new(EXERCISE_HABITS, EncodingRule::ordinal(EXERCISE_HABITS, LOW_MEDIUM_HIGH)),
    FeatureField::new(SLEEP_HOURS, EncodingRule::numeric(SLEEP_HOURS)),
    FeatureField::new(STRESS_LEVEL, EncodingRule::ordinal(STRESS_LEVEL, LOW_MEDIUM_HIGH)),
    FeatureField::new(
        SUGAR_CONSUMPTION,
        EncodingRule::ordinal(SUGAR_CONSUMPTION, LOW_MEDIUM_HIGH),
    ),
    FeatureField::new(DIABETES, EncodingRule::boolean(DIABETES)),
    FeatureField::new(FAMILY_HEART_DISEASE, EncodingRule::boolean(FAMILY_HEART_DISEASE)),
    FeatureField::new(HIGH_BLOOD_PRESSURE, EncodingRule::boolean(HIGH_BLOOD_PRESSURE)),
];

pub const QUESTIONNAIRE_SCHEMA: FeatureSchema =
    FeatureSchema::new("heart_questionnaire", 1, QUESTIONNAIRE_FIELDS);

/// Self-reported lifestyle questionnaire. Educational only; less accurate than the clinical model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartQuestionnaire {
    pub age: u8,
    pub gender: Sex,
    /// mmHg.
    pub blood_pressure: f64,
    pub bmi: f64,
    pub smoking: bool,
    pub exercise: Level,
    pub sleep_hours: f64,
    pub stress: Level,
    pub sugar: Level,
    pub diabetes: bool,
    pub family_heart_disease: bool,
    /// Diagnosed high blood pressure.
    pub high_blood_pressure: bool,
}

impl HeartQuestionnaire {
    pub fn answers(&self) -> AnswerSet {
        AnswerSet::new()
            .with(AGE, self.age)
            .with(GENDER, self.gender.label())
            .with(BLOOD_PRESSURE, self.blood_pressure)
            .with(BMI, self.bmi)
            .with(SMOKING, yes_no(self.smoking))
            .with(EXERCISE_HABITS, self.exercise.label())
            .with(SLEEP_HOURS, self.sleep_hours)
            .with(STRESS_LEVEL, self.stress.label())
            .with(SUGAR_CONSUMPTION, self.sugar.label())
            .with(DIABETES, yes_no(self.diabetes))
            .with(FAMILY_HEART_DISEASE, yes_no(self.family_heart_disease))
            .with(HIGH_BLOOD_PRESSURE, yes_no(self.high_blood_pressure))
    }
}

const CHEST_PAIN_TYPES: &[&str] = &[
    "Typical angina",
    "Atypical angina",
    "Non-anginal pain",
    "No symptoms",
];
const RESTING_ECG_RESULTS: &[&str] = &[
    "Normal",
    "ST-T abnormality",
    "Left ventricular hypertrophy",
];
const ST_SLOPES: &[&str] = &["Downsloping", "Flat", "Upsloping"];
const THALASSEMIA_RESULTS: &[&str] = &["Normal", "Fixed defect", "Reversible defect"];

const CLINICAL_FIELDS: &[FeatureField] = &[
    FeatureField::new("age", EncodingRule::numeric("age")),
    FeatureField::new("sex", EncodingRule::ordinal("sex", FEMALE_MALE)),
    FeatureField::new("cp", EncodingRule::ordinal("cp", CHEST_PAIN_TYPES)),
    FeatureField::new("trestbps", EncodingRule::numeric("trestbps")),
    FeatureField::new("chol", EncodingRule::numeric("chol")),
    FeatureField::new("fbs", EncodingRule::boolean("fbs")),
    FeatureField::new("restecg", EncodingRule::ordinal("restecg", RESTING_ECG_RESULTS)),
    FeatureField::new("thalach", EncodingRule::numeric("thalach")),
    FeatureField::new("exang", EncodingRule::boolean("exang")),
    FeatureField::new("oldpeak", EncodingRule::numeric("oldpeak")),
    FeatureField::new("slope", EncodingRule::ordinal("slope", ST_SLOPES)),
    FeatureField::new("ca", EncodingRule::numeric("ca")),
    FeatureField::new(
        "thal",
        EncodingRule::Ordinal {
            answer: "thal",
            levels: THALASSEMIA_RESULTS,
            base: 1,
        },
    ),
];

/// Cleveland (UCI) clinical layout.
pub const CLINICAL_SCHEMA: FeatureSchema = FeatureSchema::new("heart_clinical", 1, CLINICAL_FIELDS);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChestPain {
    TypicalAngina,
    AtypicalAngina,
    NonAnginalPain,
    NoSymptoms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestingEcg {
    Normal,
    StTAbnormality,
    LeftVentricularHypertrophy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StSlope {
    Downsloping,
    Flat,
    Upsloping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Thalassemia {
    Normal,
    FixedDefect,
    ReversibleDefect,
}

/// Diagnostic values for the clinical model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartClinical {
    pub age: u8,
    pub sex: Sex,
    pub chest_pain: ChestPain,
    /// Resting blood pressure, mmHg.
    pub resting_bp: f64,
    /// Serum cholesterol, mg/dL.
    pub cholesterol: f64,
    /// Fasting blood sugar above 120 mg/dL.
    pub high_fasting_sugar: bool,
    pub resting_ecg: RestingEcg,
    pub max_heart_rate: f64,
    pub exercise_angina: bool,
    /// ST depression induced by exercise.
    pub oldpeak: f64,
    pub st_slope: StSlope,
    /// Major vessels coloured by fluoroscopy, 0-3.
    pub major_vessels: u8,
    pub thalassemia: Thalassemia,
}

impl HeartClinical {
    pub fn answers(&self) -> AnswerSet {
        let chest_pain = match self.chest_pain {
            ChestPain::TypicalAngina => CHEST_PAIN_TYPES[0],
            ChestPain::AtypicalAngina => CHEST_PAIN_TYPES[1],
            ChestPain::NonAnginalPain => CHEST_PAIN_TYPES[2],
            ChestPain::NoSymptoms => CHEST_PAIN_TYPES[3],
        };
        let resting_ecg = match self.resting_ecg {
            RestingEcg::Normal => RESTING_ECG_RESULTS[0],
            RestingEcg::StTAbnormality => RESTING_ECG_RESULTS[1],
            RestingEcg::LeftVentricularHypertrophy => RESTING_ECG_RESULTS[2],
        };
        let slope = match self.st_slope {
            StSlope::Downsloping => ST_SLOPES[0],
            StSlope::Flat => ST_SLOPES[1],
            StSlope::Upsloping => ST_SLOPES[2],
        };
        let thal = match self.thalassemia {
            Thalassemia::Normal => THALASSEMIA_RESULTS[0],
            Thalassemia::FixedDefect => THALASSEMIA_RESULTS[1],
            Thalassemia::ReversibleDefect => THALASSEMIA_RESULTS[2],
        };

        AnswerSet::new()
            .with("age", self.age)
            .with("sex", self.sex.label())
            .with("cp", chest_pain)
            .with("trestbps", self.resting_bp)
            .with("chol", self.cholesterol)
            .with("fbs", yes_no(self.high_fasting_sugar))
            .with("restecg", resting_ecg)
            .with("thalach", self.max_heart_rate)
            .with("exang", yes_no(self.exercise_angina))
            .with("oldpeak", self.oldpeak)
            .with("slope", slope)
            .with("ca", self.major_vessels)
            .with("thal", thal)
    }
}
