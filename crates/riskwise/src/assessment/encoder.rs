use serde::Serialize;

use super::answers::{Answer, AnswerSet};
use super::derived::{is_obese, BodyMeasurements, FamilyHistory};
use super::schema::{DerivedFeature, EncodingRule, FeatureSchema, SchemaId};

/// Ordered numeric encoding of an answer set, tagged with the schema it was built for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    schema: SchemaId,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn schema(&self) -> SchemaId {
        self.schema
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a vector directly, e.g. from a trainer-side row. No encoding rules are checked.
    pub fn from_raw(schema: SchemaId, values: Vec<f64>) -> Self {
        Self { schema, values }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    #[error("missing required answer '{field}'")]
    MissingAnswer { field: String },
    #[error("answer '{field}' must be {expected}, found {found}")]
    InvalidAnswer {
        field: String,
        expected: &'static str,
        found: String,
    },
    #[error("answer '{field}' has unknown value '{value}' (expected one of {allowed:?})")]
    UnknownCategory {
        field: String,
        value: String,
        allowed: Vec<&'static str>,
    },
}

/// Encode `answers` into the column order of `schema`.
pub fn encode(answers: &AnswerSet, schema: &FeatureSchema) -> Result<FeatureVector, EncodeError> {
    let mut values = Vec::with_capacity(schema.len());
    let mut bmi = None;

    for field in schema.fields() {
        let value = match field.rule {
            EncodingRule::Boolean { answer } => f64::from(u8::from(read_boolean(answers, answer)?)),
            EncodingRule::Ordinal {
                answer,
                levels,
                base,
            } => read_ordinal(answers, answer, levels, base)?,
            EncodingRule::Numeric { answer } => read_number(answers, answer)?,
            EncodingRule::OneHot {
                answer,
                category,
                categories,
            } => {
                let chosen = read_category(answers, answer, categories)?;
                if chosen == category {
                    1.0
                } else {
                    0.0
                }
            }
            EncodingRule::Derived { feature } => match feature {
                DerivedFeature::Bmi => cached_bmi(answers, &mut bmi)?,
                DerivedFeature::ObesityFlag => {
                    f64::from(u8::from(is_obese(cached_bmi(answers, &mut bmi)?)))
                }
                DerivedFeature::GeneticRiskScore => {
                    FamilyHistory::from_answers(answers)?.genetic_risk_score()
                }
            },
        };
        values.push(value);
    }

    Ok(FeatureVector {
        schema: schema.id(),
        values,
    })
}

fn cached_bmi(answers: &AnswerSet, slot: &mut Option<f64>) -> Result<f64, EncodeError> {
    if let Some(bmi) = *slot {
        return Ok(bmi);
    }
    let bmi = BodyMeasurements::from_answers(answers)?.bmi();
    *slot = Some(bmi);
    Ok(bmi)
}

pub(crate) fn required<'a>(answers: &'a AnswerSet, field: &str) -> Result<&'a Answer, EncodeError> {
    answers.get(field).ok_or_else(|| EncodeError::MissingAnswer {
        field: field.to_string(),
    })
}

pub(crate) fn read_boolean(answers: &AnswerSet, field: &str) -> Result<bool, EncodeError> {
    let answer = required(answers, field)?;
    match answer {
        Answer::Flag(value) => return Ok(*value),
        Answer::Text(text) if text.trim().eq_ignore_ascii_case("yes") => return Ok(true),
        Answer::Text(text) if text.trim().eq_ignore_ascii_case("no") => return Ok(false),
        Answer::Text(text) => {
            return Err(EncodeError::UnknownCategory {
                field: field.to_string(),
                value: text.clone(),
                allowed: vec!["Yes", "No"],
            })
        }
        Answer::Integer(_) | Answer::Float(_) => {}
    }
    match integral_code(answer) {
        Some(1) => Ok(true),
        Some(0) => Ok(false),
        _ => Err(EncodeError::InvalidAnswer {
            field: field.to_string(),
            expected: "Yes/No",
            found: answer.to_string(),
        }),
    }
}

pub(crate) fn read_number(answers: &AnswerSet, field: &str) -> Result<f64, EncodeError> {
    let answer = required(answers, field)?;
    match answer.as_number() {
        Some(value) if value.is_finite() => Ok(value),
        _ => Err(EncodeError::InvalidAnswer {
            field: field.to_string(),
            expected: "a finite number",
            found: answer.to_string(),
        }),
    }
}

pub(crate) fn read_ordinal(
    answers: &AnswerSet,
    field: &str,
    levels: &'static [&'static str],
    base: u8,
) -> Result<f64, EncodeError> {
    let base = i64::from(base);
    let answer = required(answers, field)?;
    if let Answer::Text(text) = answer {
        return levels
            .iter()
            .position(|level| level.eq_ignore_ascii_case(text.trim()))
            .map(|index| (base + index as i64) as f64)
            .ok_or_else(|| EncodeError::UnknownCategory {
                field: field.to_string(),
                value: text.clone(),
                allowed: levels.to_vec(),
            });
    }
    match integral_code(answer) {
        Some(code) if (base..base + levels.len() as i64).contains(&code) => Ok(code as f64),
        _ => Err(EncodeError::InvalidAnswer {
            field: field.to_string(),
            expected: "a listed level or its code",
            found: answer.to_string(),
        }),
    }
}

/// Integer codes, including whole floats such as `1.0` from exported CSVs.
fn integral_code(answer: &Answer) -> Option<i64> {
    match answer {
        Answer::Integer(code) => Some(*code),
        Answer::Float(value) if value.is_finite() && value.fract() == 0.0 => Some(*value as i64),
        _ => None,
    }
}

fn read_category(
    answers: &AnswerSet,
    field: &str,
    categories: &'static [&'static str],
) -> Result<&'static str, EncodeError> {
    let answer = required(answers, field)?;
    let Some(text) = answer.as_text() else {
        return Err(EncodeError::InvalidAnswer {
            field: field.to_string(),
            expected: "a category name",
            found: answer.to_string(),
        });
    };

    categories
        .iter()
        .copied()
        .find(|category| category.eq_ignore_ascii_case(text.trim()))
        .ok_or_else(|| EncodeError::UnknownCategory {
            field: field.to_string(),
            value: text.to_string(),
            allowed: categories.to_vec(),
        })
}
