//! Test doubles for the artifact traits

use std::sync::Arc;

use ndarray::{Array2, Array3};
use parking_lot::Mutex;

use super::error::InferenceError;
use super::scaler::{ScalerParams, StandardScaler};
use super::{Classifier, Scaler};
use crate::constants::FEATURE_COUNT;

/// Always returns the same score
pub struct FixedClassifier(pub f32);

impl Classifier for FixedClassifier {
    fn infer(&self, _input: Array3<f32>) -> Result<f32, InferenceError> {
        Ok(self.0)
    }
}

/// Sigmoid of the input mean; remembers the last tensor it saw
#[derive(Default)]
pub struct SigmoidClassifier {
    pub last_input: Mutex<Option<Array3<f32>>>,
}

impl Classifier for SigmoidClassifier {
    fn infer(&self, input: Array3<f32>) -> Result<f32, InferenceError> {
        let mean = input.mean().unwrap_or(0.0);
        *self.last_input.lock() = Some(input);
        Ok(1.0 / (1.0 + (-mean).exp()))
    }
}

pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn infer(&self, _input: Array3<f32>) -> Result<f32, InferenceError> {
        Err(InferenceError("Inference failed: device lost".to_string()))
    }
}

pub struct FailingScaler;

impl Scaler for FailingScaler {
    fn transform(&self, _input: Array2<f64>) -> Result<Array2<f64>, InferenceError> {
        Err(InferenceError("scaler exploded".to_string()))
    }
}

/// Scaler with mean 1.0 and scale 2.0 on every feature
pub fn unit_scaler() -> Arc<dyn Scaler> {
    let params = ScalerParams {
        mean: Some(vec![1.0; FEATURE_COUNT]),
        scale: Some(vec![2.0; FEATURE_COUNT]),
    };
    match StandardScaler::from_params(params) {
        Ok(scaler) => Arc::new(scaler),
        Err(e) => panic!("test scaler parameters rejected: {}", e),
    }
}
