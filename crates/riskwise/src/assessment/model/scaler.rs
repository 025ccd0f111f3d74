use serde::{Deserialize, Serialize};

/// Fitted per-column standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn width(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect()
    }

    /// Index of the first scale that would make the transform ill-defined.
    pub(crate) fn invalid_scale(&self) -> Option<usize> {
        self.scale
            .iter()
            .position(|scale| !scale.is_finite() || *scale <= 0.0)
            .or_else(|| self.mean.iter().position(|mean| !mean.is_finite()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_centers_and_scales_each_column() {
        let scaler = StandardScaler {
            mean: vec![50.0, 1.0],
            scale: vec![10.0, 0.5],
        };

        assert_eq!(scaler.transform(&[60.0, 0.0]), vec![1.0, -2.0]);
        assert_eq!(scaler.invalid_scale(), None);
    }

    #[test]
    fn zero_scale_is_flagged() {
        let scaler = StandardScaler {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 0.0],
        };

        assert_eq!(scaler.invalid_scale(), Some(1));
    }
}
