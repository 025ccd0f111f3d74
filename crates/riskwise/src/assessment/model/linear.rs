use serde::{Deserialize, Serialize};

use super::sigmoid;

/// Binary logistic regression: `sigmoid(intercept + w · x)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    pub fn margin(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(values)
            .fold(self.intercept, |acc, (weight, value)| acc + weight * value)
    }

    pub fn probability(&self, values: &[f64]) -> f64 {
        sigmoid(self.margin(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_margin_is_even_odds() {
        let model = LogisticRegression {
            coefficients: vec![1.0, -1.0],
            intercept: 0.0,
        };

        assert_eq!(model.probability(&[2.0, 2.0]), 0.5);
    }

    #[test]
    fn margin_sums_weighted_inputs() {
        let model = LogisticRegression {
            coefficients: vec![0.5, 2.0],
            intercept: -1.0,
        };

        assert_eq!(model.margin(&[4.0, 0.25]), 1.5);
        assert!(model.probability(&[4.0, 0.25]) > 0.8);
    }
}
