//! Lifestyle "what-if" recomputation for the heart questionnaire.
//!
//! A what-if run copies the baseline answers, swaps in improved lifestyle answers, and scores
//! the result again. The displayed figure additionally subtracts a fixed per-change bonus. That
//! bonus is a presentation heuristic with no statistical grounding; it is kept so the
//! numbers users see stay the same, and should be removed once the UI stops relying on it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::answers::{Answer, AnswerSet};
use super::domains::heart::{
    EXERCISE_HABITS, SLEEP_HOURS, SMOKING, STRESS_LEVEL, SUGAR_CONSUMPTION,
};
use super::domains::LOW_MEDIUM_HIGH;
use super::encoder::{read_boolean, read_number, read_ordinal};
use super::inference::round_to;

/// Answers a what-if run may replace.
pub const ALLOWED_OVERRIDE_FIELDS: &[&str] = &[
    SMOKING,
    EXERCISE_HABITS,
    STRESS_LEVEL,
    SLEEP_HOURS,
    SUGAR_CONSUMPTION,
];

const RECOMMENDED_SLEEP_HOURS: i64 = 8;
const SHORT_SLEEP_HOURS: f64 = 5.0;

/// One lifestyle improvement the heart questionnaire offers as a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleChange {
    QuitSmoking,
    IncreaseExercise,
    ReduceStress,
    ImproveSleep,
    ReduceSugar,
}

impl LifestyleChange {
    pub const fn all() -> [Self; 5] {
        [
            Self::QuitSmoking,
            Self::IncreaseExercise,
            Self::ReduceStress,
            Self::ImproveSleep,
            Self::ReduceSugar,
        ]
    }

    /// Questionnaire answer this change overrides.
    pub const fn field(self) -> &'static str {
        match self {
            Self::QuitSmoking => SMOKING,
            Self::IncreaseExercise => EXERCISE_HABITS,
            Self::ReduceStress => STRESS_LEVEL,
            Self::ImproveSleep => SLEEP_HOURS,
            Self::ReduceSugar => SUGAR_CONSUMPTION,
        }
    }

    pub fn target_answer(self) -> Answer {
        match self {
            Self::QuitSmoking => Answer::from("No"),
            Self::IncreaseExercise => Answer::from("High"),
            Self::ReduceStress | Self::ReduceSugar => Answer::from("Low"),
            Self::ImproveSleep => Answer::from(RECOMMENDED_SLEEP_HOURS),
        }
    }

    /// Probability points subtracted from the recomputed risk.
    pub const fn bonus(self) -> f64 {
        match self {
            Self::QuitSmoking => 0.06,
            Self::IncreaseExercise => 0.04,
            Self::ReduceStress | Self::ReduceSugar => 0.03,
            Self::ImproveSleep => 0.02,
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::QuitSmoking => "quit-smoking",
            Self::IncreaseExercise => "increase-exercise",
            Self::ReduceStress => "reduce-stress",
            Self::ImproveSleep => "improve-sleep",
            Self::ReduceSugar => "reduce-sugar",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::QuitSmoking => "Quit smoking",
            Self::IncreaseExercise => "Increase exercise",
            Self::ReduceStress => "Reduce stress",
            Self::ImproveSleep => "Improve sleep",
            Self::ReduceSugar => "Reduce sugar",
        }
    }

    /// Whether the baseline leaves room for this improvement. Unreadable answers offer nothing.
    pub fn is_available(self, baseline: &AnswerSet) -> bool {
        let level = |field: &str| read_ordinal(baseline, field, LOW_MEDIUM_HIGH, 0);
        match self {
            Self::QuitSmoking => read_boolean(baseline, SMOKING).unwrap_or(false),
            Self::IncreaseExercise => level(EXERCISE_HABITS).is_ok_and(|code| code < 2.0),
            Self::ReduceStress => level(STRESS_LEVEL).is_ok_and(|code| code > 0.0),
            Self::ImproveSleep => {
                read_number(baseline, SLEEP_HOURS).is_ok_and(|hours| hours < SHORT_SLEEP_HOURS)
            }
            Self::ReduceSugar => level(SUGAR_CONSUMPTION).is_ok_and(|code| code > 0.0),
        }
    }

    /// Every change the baseline leaves room for, in toggle order.
    pub fn available_for(baseline: &AnswerSet) -> Vec<Self> {
        Self::all()
            .into_iter()
            .filter(|change| change.is_available(baseline))
            .collect()
    }
}

impl fmt::Display for LifestyleChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lifestyle change '{0}'")]
pub struct UnknownChange(pub String);

impl FromStr for LifestyleChange {
    type Err = UnknownChange;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::all()
            .into_iter()
            .find(|change| change.slug() == normalized)
            .ok_or_else(|| UnknownChange(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverrideError {
    #[error("'{field}' cannot be overridden; allowed fields are {allowed:?}")]
    DisallowedField {
        field: String,
        allowed: &'static [&'static str],
    },
}

/// Replacement answers for a what-if run, restricted to [`ALLOWED_OVERRIDE_FIELDS`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LifestyleOverrides(BTreeMap<&'static str, Answer>);

impl LifestyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_changes(changes: impl IntoIterator<Item = LifestyleChange>) -> Self {
        Self(
            changes
                .into_iter()
                .map(|change| (change.field(), change.target_answer()))
                .collect(),
        )
    }

    pub fn set(&mut self, field: &str, answer: impl Into<Answer>) -> Result<(), OverrideError> {
        let field = ALLOWED_OVERRIDE_FIELDS
            .iter()
            .copied()
            .find(|allowed| *allowed == field)
            .ok_or_else(|| OverrideError::DisallowedField {
                field: field.to_string(),
                allowed: ALLOWED_OVERRIDE_FIELDS,
            })?;
        self.0.insert(field, answer.into());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Answer)> {
        self.0.iter().map(|(field, answer)| (*field, answer))
    }

    /// Copy of `baseline` with overrides applied. Keys the baseline never answered stay absent.
    pub fn apply_to(&self, baseline: &AnswerSet) -> AnswerSet {
        let mut updated = baseline.clone();
        for (field, answer) in &self.0 {
            if updated.contains(field) {
                updated.insert(*field, answer.clone());
            }
        }
        updated
    }
}

impl TryFrom<AnswerSet> for LifestyleOverrides {
    type Error = OverrideError;

    fn try_from(answers: AnswerSet) -> Result<Self, Self::Error> {
        let mut overrides = Self::new();
        for (field, answer) in answers.iter() {
            overrides.set(field, answer.clone())?;
        }
        Ok(overrides)
    }
}

/// Deduplicate `requested` and drop changes the baseline does not offer.
/// Returns the applied changes in toggle order and the ignored ones.
pub fn partition_changes(
    baseline: &AnswerSet,
    requested: &[LifestyleChange],
) -> (Vec<LifestyleChange>, Vec<LifestyleChange>) {
    requested
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .partition(|change| change.is_available(baseline))
}

pub fn lifestyle_bonus(changes: &[LifestyleChange]) -> f64 {
    round_to(changes.iter().map(|change| change.bonus()).sum(), 2)
}

/// Recomputed probability minus the bonus, floored at zero.
pub fn discounted(updated: f64, bonus: f64) -> f64 {
    round_to((updated - bonus).max(0.0), 3)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhatIfOutcome {
    pub changes: Vec<LifestyleChange>,
    pub baseline_probability: f64,
    /// Model output for the overridden answers, before the bonus.
    pub updated_probability: f64,
    pub lifestyle_bonus: f64,
    pub displayed_probability: f64,
    pub risk_reduction: f64,
}

impl WhatIfOutcome {
    pub fn new(changes: Vec<LifestyleChange>, baseline: f64, updated: f64) -> Self {
        let bonus = lifestyle_bonus(&changes);
        let displayed = discounted(updated, bonus);
        Self {
            changes,
            baseline_probability: baseline,
            updated_probability: updated,
            lifestyle_bonus: bonus,
            displayed_probability: displayed,
            risk_reduction: round_to(baseline - displayed, 3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> AnswerSet {
        AnswerSet::new()
            .with(SMOKING, "Yes")
            .with(EXERCISE_HABITS, "High")
            .with(STRESS_LEVEL, "Medium")
            .with(SLEEP_HOURS, 7)
            .with(SUGAR_CONSUMPTION, "Low")
    }

    #[test]
    fn availability_follows_baseline_answers() {
        assert_eq!(
            LifestyleChange::available_for(&baseline()),
            vec![LifestyleChange::QuitSmoking, LifestyleChange::ReduceStress]
        );

        let short_sleep = baseline().with(SLEEP_HOURS, 4);
        assert!(LifestyleChange::ImproveSleep.is_available(&short_sleep));
        assert!(!LifestyleChange::ImproveSleep.is_available(&baseline().with(SLEEP_HOURS, 5)));
    }

    #[test]
    fn overrides_reject_fields_outside_the_lifestyle_set() {
        let mut overrides = LifestyleOverrides::new();
        let err = overrides.set("Age", 30).expect_err("age is not a lifestyle field");
        assert!(matches!(err, OverrideError::DisallowedField { field, .. } if field == "Age"));

        let map = AnswerSet::new().with(SMOKING, 0).with("BMI", 22.0);
        assert!(LifestyleOverrides::try_from(map).is_err());
    }

    #[test]
    fn overrides_only_replace_answered_fields() {
        let partial = AnswerSet::new().with(SMOKING, "Yes");
        let overrides = LifestyleOverrides::from_changes([
            LifestyleChange::QuitSmoking,
            LifestyleChange::ImproveSleep,
        ]);

        let updated = overrides.apply_to(&partial);
        assert_eq!(updated.get(SMOKING), Some(&Answer::from("No")));
        assert!(!updated.contains(SLEEP_HOURS));
        assert_eq!(partial.get(SMOKING), Some(&Answer::from("Yes")));
    }

    #[test]
    fn duplicate_and_unavailable_changes_are_separated() {
        let (applied, ignored) = partition_changes(
            &baseline(),
            &[
                LifestyleChange::QuitSmoking,
                LifestyleChange::QuitSmoking,
                LifestyleChange::IncreaseExercise,
            ],
        );

        assert_eq!(applied, vec![LifestyleChange::QuitSmoking]);
        assert_eq!(ignored, vec![LifestyleChange::IncreaseExercise]);
    }

    #[test]
    fn displayed_risk_is_floored_at_zero() {
        assert_eq!(discounted(0.05, 0.06), 0.0);
        assert_eq!(discounted(0.5, 0.06), 0.44);

        let outcome = WhatIfOutcome::new(
            vec![LifestyleChange::QuitSmoking, LifestyleChange::ReduceStress],
            0.42,
            0.35,
        );
        assert_eq!(outcome.lifestyle_bonus, 0.09);
        assert_eq!(outcome.displayed_probability, 0.26);
        assert_eq!(outcome.risk_reduction, 0.16);
    }

    #[test]
    fn changes_parse_from_flag_spelling() {
        assert_eq!("quit-smoking".parse::<LifestyleChange>(), Ok(LifestyleChange::QuitSmoking));
        assert_eq!("REDUCE_SUGAR".parse::<LifestyleChange>(), Ok(LifestyleChange::ReduceSugar));
        assert!("eat-kale".parse::<LifestyleChange>().is_err());
    }
}
