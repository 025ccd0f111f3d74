use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::derived::{
    EARLY_ONSET_DIABETES, GRANDPARENT_DIABETES, HEIGHT_FEET, HEIGHT_INCHES, PARENT_DIABETES,
    SIBLING_DIABETES, WEIGHT_KG,
};

/// Versioned identity of a feature layout. Artifacts and vectors carry it so drift is detectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SchemaId {
    pub name: &'static str,
    pub version: u32,
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@v{}", self.name, self.version)
    }
}

/// Quantities computed from several answers rather than read from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedFeature {
    /// weight_kg / height_m², from feet, inches and kilograms.
    Bmi,
    /// 1 when the BMI rounded to two decimals reaches the obese band.
    ObesityFlag,
    /// Family-history proxy for the diabetes pedigree function.
    GeneticRiskScore,
}

impl DerivedFeature {
    pub const fn source_answers(self) -> &'static [&'static str] {
        match self {
            Self::Bmi | Self::ObesityFlag => &[HEIGHT_FEET, HEIGHT_INCHES, WEIGHT_KG],
            Self::GeneticRiskScore => &[
                PARENT_DIABETES,
                SIBLING_DIABETES,
                GRANDPARENT_DIABETES,
                EARLY_ONSET_DIABETES,
            ],
        }
    }
}

/// How a single column is produced from the answer set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum EncodingRule {
    /// Yes/No -> 1/0.
    Boolean { answer: &'static str },
    /// Level i -> base + i.
    Ordinal {
        answer: &'static str,
        levels: &'static [&'static str],
        base: u8,
    },
    Numeric { answer: &'static str },
    /// Indicator for one non-baseline category. `categories` lists every accepted value.
    OneHot {
        answer: &'static str,
        category: &'static str,
        categories: &'static [&'static str],
    },
    Derived { feature: DerivedFeature },
}

impl EncodingRule {
    pub const fn boolean(answer: &'static str) -> Self {
        Self::Boolean { answer }
    }

    pub const fn ordinal(answer: &'static str, levels: &'static [&'static str]) -> Self {
        Self::Ordinal {
            answer,
            levels,
            base: 0,
        }
    }

    pub const fn numeric(answer: &'static str) -> Self {
        Self::Numeric { answer }
    }

    pub const fn derived(feature: DerivedFeature) -> Self {
        Self::Derived { feature }
    }

    /// Answer keys this rule reads.
    pub fn answers(&self) -> &[&'static str] {
        match self {
            Self::Boolean { answer }
            | Self::Ordinal { answer, .. }
            | Self::Numeric { answer }
            | Self::OneHot { answer, .. } => std::slice::from_ref(answer),
            Self::Derived { feature } => feature.source_answers(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureField {
    pub column: &'static str,
    #[serde(flatten)]
    pub rule: EncodingRule,
}

impl FeatureField {
    pub const fn new(column: &'static str, rule: EncodingRule) -> Self {
        Self { column, rule }
    }
}

/// Ordered column layout a classifier was fit on.
///
/// Shared by the trainer (via export) and the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureSchema {
    #[serde(flatten)]
    id: SchemaId,
    fields: &'static [FeatureField],
}

impl FeatureSchema {
    pub const fn new(name: &'static str, version: u32, fields: &'static [FeatureField]) -> Self {
        Self {
            id: SchemaId { name, version },
            fields,
        }
    }

    pub fn id(&self) -> SchemaId {
        self.id
    }

    pub fn fields(&self) -> &'static [FeatureField] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.column).collect()
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.column == column)
    }

    /// Every answer key the encoder needs for this schema.
    pub fn required_answers(&self) -> BTreeSet<&'static str> {
        self.fields
            .iter()
            .flat_map(|field| field.rule.answers().iter().copied())
            .collect()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
