use serde::Serialize;

const MODERATE_FLOOR: f64 = 35.0;
const HIGH_FLOOR: f64 = 58.0;

/// Qualitative band drawn on a 0-100 risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn from_percent(percent: f64) -> Self {
        if percent < MODERATE_FLOOR {
            Self::Low
        } else if percent < HIGH_FLOOR {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub fn from_probability(probability: f64) -> Self {
        Self::from_percent(probability * 100.0)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low risk",
            Self::Moderate => "Moderate risk",
            Self::High => "High risk",
        }
    }

    pub const fn guidance(self) -> &'static str {
        match self {
            Self::High => {
                "High risk detected. We recommend proceeding to clinical assessment with basic \
                 thyroid lab tests (TSH, T3, T4). Clinical assessment significantly improves \
                 prediction accuracy."
            }
            Self::Moderate => {
                "Moderate risk detected. Regular monitoring and lifestyle management are \
                 advised. We recommend clinical test to be sure."
            }
            Self::Low => "Low risk detected. Maintain healthy lifestyle and routine check-ups.",
        }
    }
}
