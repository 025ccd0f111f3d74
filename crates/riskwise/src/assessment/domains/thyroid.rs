use serde::{Deserialize, Serialize};

use super::{Sex, FEMALE_MALE};
use crate::assessment::answers::AnswerSet;
use crate::assessment::derived::{yes_no, BodyMeasurements};
use crate::assessment::schema::{DerivedFeature, EncodingRule, FeatureField, FeatureSchema};

pub const AGE: &str = "Age";
pub const GENDER: &str = "Gender";
pub const FAMILY_HISTORY: &str = "Family_History";
pub const RADIATION_EXPOSURE: &str = "Radiation_Exposure";
pub const IODINE_DEFICIENCY: &str = "Iodine_Deficiency";
pub const SMOKING: &str = "Smoking";
pub const DIABETES: &str = "Diabetes";
pub const NODULE_SIZE: &str = "Nodule_Size";
pub const ETHNICITY: &str = "Ethnicity";

/// African is the dropped baseline and encodes as all-zero indicators.
const ETHNICITIES: &[&str] = &["African", "Asian", "Caucasian", "Hispanic", "Middle Eastern"];

const fn ethnicity_indicator(column: &'static str, category: &'static str) -> FeatureField {
    FeatureField::new(
        column,
        EncodingRule::OneHot {
            answer: ETHNICITY,
            category,
            categories: ETHNICITIES,
        },
    )
}

const FIELDS: &[FeatureField] = &[
    FeatureField::new(AGE, EncodingRule::numeric(AGE)),
    FeatureField::new(GENDER, EncodingRule::ordinal(GENDER, FEMALE_MALE)),
    FeatureField::new(FAMILY_HISTORY, EncodingRule::boolean(FAMILY_HISTORY)),
    FeatureField::new(RADIATION_EXPOSURE, EncodingRule::boolean(RADIATION_EXPOSURE)),
    FeatureField::new(IODINE_DEFICIENCY, EncodingRule::boolean(IODINE_DEFICIENCY)),
    FeatureField::new(SMOKING, EncodingRule::boolean(SMOKING)),
    FeatureField::new("Obesity", EncodingRule::derived(DerivedFeature::ObesityFlag)),
    FeatureField::new(DIABETES, EncodingRule::boolean(DIABETES)),
    FeatureField::new(NODULE_SIZE, EncodingRule::numeric(NODULE_SIZE)),
    ethnicity_indicator("Ethnicity_Asian", "Asian"),
    ethnicity_indicator("Ethnicity_Caucasian", "Caucasian"),
    ethnicity_indicator("Ethnicity_Hispanic", "Hispanic"),
    ethnicity_indicator("Ethnicity_Middle Eastern", "Middle Eastern"),
];

pub const SCHEMA: FeatureSchema = FeatureSchema::new("thyroid", 1, FIELDS);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ethnicity {
    African,
    Asian,
    Caucasian,
    Hispanic,
    MiddleEastern,
}

impl Ethnicity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::African => "African",
            Self::Asian => "Asian",
            Self::Caucasian => "Caucasian",
            Self::Hispanic => "Hispanic",
            Self::MiddleEastern => "Middle Eastern",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThyroidQuestionnaire {
    pub age: u8,
    pub gender: Sex,
    pub ethnicity: Ethnicity,
    pub family_history: bool,
    pub radiation_exposure: bool,
    pub iodine_deficiency: bool,
    pub smoking: bool,
    pub diabetes: bool,
    /// Largest nodule, cm. Zero when none has been found.
    pub nodule_size: f64,
    pub body: BodyMeasurements,
}

impl ThyroidQuestionnaire {
    pub fn answers(&self) -> AnswerSet {
        let mut answers = AnswerSet::new()
            .with(AGE, self.age)
            .with(GENDER, self.gender.label())
            .with(ETHNICITY, self.ethnicity.label())
            .with(FAMILY_HISTORY, yes_no(self.family_history))
            .with(RADIATION_EXPOSURE, yes_no(self.radiation_exposure))
            .with(IODINE_DEFICIENCY, yes_no(self.iodine_deficiency))
            .with(SMOKING, yes_no(self.smoking))
            .with(DIABETES, yes_no(self.diabetes))
            .with(NODULE_SIZE, self.nodule_size);
        self.body.write_answers(&mut answers);
        answers
    }
}
