//! Standard Scaler - per-feature centering and scaling
//!
//! Parameters are fitted offline and exported as JSON:
//!
//! ```json
//! { "mean": [40 floats] | null, "scale": [40 floats] | null }
//! ```
//!
//! `transform` computes `(x - mean) / scale`. A missing `mean` skips centering,
//! a missing `scale` skips scaling.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::error::{ArtifactError, InferenceError};
use super::Scaler;
use crate::constants::FEATURE_COUNT;

/// Scaler parameters as exported by the training pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScalerParams {
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

/// Fitted standard scaler
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Option<Array1<f64>>,
    scale: Option<Array1<f64>>,
}

impl StandardScaler {
    /// Build from exported parameters, validating their length.
    pub fn from_params(params: ScalerParams) -> Result<Self, ArtifactError> {
        let mean = params.mean.map(|m| check_vector("mean", m)).transpose()?;
        let scale = params.scale.map(|s| check_vector("scale", s)).transpose()?;

        Ok(Self {
            mean: mean.map(Array1::from_vec),
            // Zero-variance features are left unscaled
            scale: scale.map(|s| s.into_iter().map(|v| if v == 0.0 { 1.0 } else { v }).collect()),
        })
    }

    /// Parse a JSON parameter document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let params: ScalerParams = serde_json::from_slice(bytes)?;
        Self::from_params(params)
    }
}

fn check_vector(name: &str, values: Vec<f64>) -> Result<Vec<f64>, ArtifactError> {
    if values.len() != FEATURE_COUNT {
        return Err(ArtifactError::InvalidScaler(format!(
            "{} has {} entries, expected {}",
            name,
            values.len(),
            FEATURE_COUNT
        )));
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(ArtifactError::InvalidScaler(format!(
            "{}[{}] is not a finite number",
            name, i
        )));
    }
    Ok(values)
}

impl Scaler for StandardScaler {
    fn transform(&self, input: Array2<f64>) -> Result<Array2<f64>, InferenceError> {
        if input.ncols() != FEATURE_COUNT {
            return Err(InferenceError(format!(
                "X has {} features, but StandardScaler is expecting {} features as input",
                input.ncols(),
                FEATURE_COUNT
            )));
        }

        let mut scaled = input;
        if let Some(mean) = &self.mean {
            scaled -= mean;
        }
        if let Some(scale) = &self.scale {
            scaled /= scale;
        }
        Ok(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;
    use tokio_test::assert_err;

    fn params(mean: f64, scale: f64) -> ScalerParams {
        ScalerParams {
            mean: Some(vec![mean; FEATURE_COUNT]),
            scale: Some(vec![scale; FEATURE_COUNT]),
        }
    }

    #[test]
    fn test_transform_centers_and_scales() {
        let scaler = StandardScaler::from_params(params(1.0, 2.0)).unwrap();
        let input = Array2::from_elem((1, FEATURE_COUNT), 5.0);

        let out = scaler.transform(input).unwrap();

        assert_eq!(out.dim(), (1, FEATURE_COUNT));
        assert!(out.iter().all(|&v| (v - 2.0).abs() < 1e-12));
    }

    #[test]
    fn test_per_feature_parameters() {
        let mean: Vec<f64> = (0..FEATURE_COUNT).map(|i| i as f64).collect();
        let scaler = StandardScaler::from_params(ScalerParams {
            mean: Some(mean),
            scale: Some(vec![0.5; FEATURE_COUNT]),
        })
        .unwrap();

        let input = Array::from_shape_fn((1, FEATURE_COUNT), |(_, j)| j as f64 + 1.0);
        let out = scaler.transform(input).unwrap();

        // (j + 1 - j) / 0.5
        assert!(out.iter().all(|&v| (v - 2.0).abs() < 1e-12));
    }

    #[test]
    fn test_zero_scale_is_treated_as_one() {
        let mut p = params(0.0, 4.0);
        if let Some(scale) = p.scale.as_mut() {
            scale[3] = 0.0;
        }
        let scaler = StandardScaler::from_params(p).unwrap();

        let out = scaler.transform(Array2::from_elem((1, FEATURE_COUNT), 8.0)).unwrap();

        assert_eq!(out[[0, 3]], 8.0);
        assert_eq!(out[[0, 4]], 2.0);
    }

    #[test]
    fn test_missing_mean_and_scale_is_identity() {
        let scaler = StandardScaler::from_json(br#"{"mean": null}"#).unwrap();
        let input = Array::from_shape_fn((1, FEATURE_COUNT), |(_, j)| j as f64 * 3.0);

        let out = scaler.transform(input.clone()).unwrap();

        assert_eq!(out, input);
    }

    #[test]
    fn test_wrong_parameter_length_rejected() {
        let bad = ScalerParams {
            mean: Some(vec![0.0; 39]),
            scale: None,
        };
        let err = assert_err!(StandardScaler::from_params(bad));
        assert!(err.to_string().contains("mean has 39 entries"));
    }

    #[test]
    fn test_transform_rejects_wrong_width() {
        let scaler = StandardScaler::from_params(params(0.0, 1.0)).unwrap();
        let err = assert_err!(scaler.transform(Array2::zeros((1, 39))));
        assert!(err.0.contains("X has 39 features"));
    }

    #[test]
    fn test_load_garbage() {
        let err = assert_err!(StandardScaler::from_json(b"\x80\x04\x95 pickle"));
        assert!(matches!(err, ArtifactError::Parse(_)));
    }
}
