//! Quantities derived from several answers: body-mass index and the family-history genetic score.

use serde::{Deserialize, Serialize};

use super::answers::AnswerSet;
use super::encoder::{read_boolean, read_number, EncodeError};
use super::inference::round_to;

pub const HEIGHT_FEET: &str = "Height (feet)";
pub const HEIGHT_INCHES: &str = "Height (inches)";
pub const WEIGHT_KG: &str = "Weight (kg)";

pub const PARENT_DIABETES: &str = "Parent Diabetes";
pub const SIBLING_DIABETES: &str = "Sibling Diabetes";
pub const GRANDPARENT_DIABETES: &str = "Grandparent Diabetes";
pub const EARLY_ONSET_DIABETES: &str = "Early Onset Diabetes";

const METERS_PER_FOOT: f64 = 0.3048;
const METERS_PER_INCH: f64 = 0.0254;

const UNDERWEIGHT_CEILING: f64 = 18.5;
const NORMAL_CEILING: f64 = 25.0;
const OBESE_FLOOR: f64 = 30.0;

const GENETIC_BASE_SCORE: f64 = 0.1;
const PARENT_WEIGHT: f64 = 0.4;
const SIBLING_WEIGHT: f64 = 0.3;
const GRANDPARENT_WEIGHT: f64 = 0.2;
const EARLY_ONSET_WEIGHT: f64 = 0.3;
pub const GENETIC_SCORE_CAP: f64 = 2.5;

/// Height in feet plus inches and weight in kilograms, as the questionnaires collect them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurements {
    pub height_feet: f64,
    pub height_inches: f64,
    pub weight_kg: f64,
}

impl BodyMeasurements {
    pub fn from_answers(answers: &AnswerSet) -> Result<Self, EncodeError> {
        let measurements = Self {
            height_feet: read_number(answers, HEIGHT_FEET)?,
            height_inches: read_number(answers, HEIGHT_INCHES)?,
            weight_kg: read_number(answers, WEIGHT_KG)?,
        };

        for (field, value) in [
            (HEIGHT_FEET, measurements.height_feet),
            (HEIGHT_INCHES, measurements.height_inches),
        ] {
            if value < 0.0 {
                return Err(EncodeError::InvalidAnswer {
                    field: field.to_string(),
                    expected: "a non-negative height",
                    found: value.to_string(),
                });
            }
        }
        if measurements.height_m() <= 0.0 {
            return Err(EncodeError::InvalidAnswer {
                field: HEIGHT_FEET.to_string(),
                expected: "a positive height",
                found: "0 ft 0 in".to_string(),
            });
        }
        if measurements.weight_kg <= 0.0 {
            return Err(EncodeError::InvalidAnswer {
                field: WEIGHT_KG.to_string(),
                expected: "a positive weight",
                found: measurements.weight_kg.to_string(),
            });
        }

        Ok(measurements)
    }

    pub fn height_m(&self) -> f64 {
        self.height_feet * METERS_PER_FOOT + self.height_inches * METERS_PER_INCH
    }

    pub fn bmi(&self) -> f64 {
        self.weight_kg / self.height_m().powi(2)
    }

    pub fn reading(&self) -> BmiReading {
        BmiReading::from_bmi(self.bmi())
    }

    pub fn write_answers(&self, answers: &mut AnswerSet) {
        answers.insert(HEIGHT_FEET, self.height_feet);
        answers.insert(HEIGHT_INCHES, self.height_inches);
        answers.insert(WEIGHT_KG, self.weight_kg);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_CEILING {
            Self::Underweight
        } else if bmi < NORMAL_CEILING {
            Self::Normal
        } else if bmi < OBESE_FLOOR {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

/// BMI for display, rounded to two decimals, with its band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiReading {
    pub value: f64,
    pub category: BmiCategory,
}

impl BmiReading {
    /// Bands the rounded value, the same one [`is_obese`] checks.
    pub fn from_bmi(bmi: f64) -> Self {
        let value = round_to(bmi, 2);
        Self {
            value,
            category: BmiCategory::from_bmi(value),
        }
    }
}

/// Obesity flag as fed to the thyroid model: band check on the two-decimal BMI.
pub fn is_obese(bmi: f64) -> bool {
    round_to(bmi, 2) >= OBESE_FLOOR
}

/// Family-history answers behind the genetic risk score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyHistory {
    pub parent: bool,
    pub sibling: bool,
    pub grandparent: bool,
    /// Any relative diagnosed before age 50.
    pub early_onset: bool,
}

impl FamilyHistory {
    pub fn from_answers(answers: &AnswerSet) -> Result<Self, EncodeError> {
        Ok(Self {
            parent: read_boolean(answers, PARENT_DIABETES)?,
            sibling: read_boolean(answers, SIBLING_DIABETES)?,
            grandparent: read_boolean(answers, GRANDPARENT_DIABETES)?,
            early_onset: read_boolean(answers, EARLY_ONSET_DIABETES)?,
        })
    }

    pub fn genetic_risk_score(&self) -> f64 {
        let mut raw = GENETIC_BASE_SCORE;
        if self.parent {
            raw += PARENT_WEIGHT;
        }
        if self.sibling {
            raw += SIBLING_WEIGHT;
        }
        if self.grandparent {
            raw += GRANDPARENT_WEIGHT;
        }
        if self.early_onset {
            raw += EARLY_ONSET_WEIGHT;
        }
        bounded_genetic_score(raw)
    }

    pub fn write_answers(&self, answers: &mut AnswerSet) {
        answers.insert(PARENT_DIABETES, yes_no(self.parent));
        answers.insert(SIBLING_DIABETES, yes_no(self.sibling));
        answers.insert(GRANDPARENT_DIABETES, yes_no(self.grandparent));
        answers.insert(EARLY_ONSET_DIABETES, yes_no(self.early_onset));
    }
}

/// Round to two decimals, then cap at [`GENETIC_SCORE_CAP`].
pub fn bounded_genetic_score(raw: f64) -> f64 {
    round_to(raw, 2).min(GENETIC_SCORE_CAP)
}

pub(crate) fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}
