//! Prediction pipeline
//!
//! Validate, reshape to `(1, 40)`, scale, reshape to `(1, 40, 1)`, infer,
//! threshold. Stateless: the artifacts are shared read-only.

use std::sync::Arc;

use ndarray::Array2;
use serde_json::Value;

use super::error::{InferenceError, PredictError};
use super::{Classifier, Scaler};
use crate::constants::FEATURE_COUNT;
use crate::models::PredictResponse;

/// Request-to-prediction pipeline over injected artifacts
#[derive(Clone)]
pub struct Predictor {
    classifier: Option<Arc<dyn Classifier>>,
    scaler: Option<Arc<dyn Scaler>>,
}

impl Predictor {
    pub fn new(classifier: Option<Arc<dyn Classifier>>, scaler: Option<Arc<dyn Scaler>>) -> Self {
        Self { classifier, scaler }
    }

    pub fn is_ready(&self) -> bool {
        self.classifier.is_some() && self.scaler.is_some()
    }

    /// Run the pipeline on a parsed request body.
    pub fn predict(&self, body: &Value) -> Result<PredictResponse, PredictError> {
        let features = body.get("features").ok_or(PredictError::MissingFeatures)?;

        let Some(classifier) = self.classifier.as_deref() else {
            return Err(PredictError::NotLoaded);
        };
        if self.scaler.is_none() {
            return Err(PredictError::NotLoaded);
        }

        let input = feature_matrix(features)?;

        // Cannot fail after the loaded check; reading the slot stays total.
        let scaler = self.scaler.as_deref().ok_or(PredictError::ScalerUnavailable)?;
        let scaled = scaler.transform(input).map_err(PredictError::Scaling)?;

        // Conv1D input: (samples, timesteps, channels)
        let width = scaled.ncols();
        let tensor = scaled
            .mapv(|v| v as f32)
            .into_shape_with_order((1, width, 1))
            .map_err(|e| PredictError::ShapeMismatch(e.to_string()))?;

        let score = classifier.infer(tensor).map_err(PredictError::Inference)?;
        if !score.is_finite() {
            return Err(PredictError::Inference(InferenceError(format!(
                "Classifier produced a non-finite score: {}",
                score
            ))));
        }

        Ok(PredictResponse::from_score(score))
    }
}

/// Shape `features` as a single `(1, 40)` sample.
///
/// The value must be a rectangular (possibly nested) array holding 40
/// elements in total; it is flattened row-major.
fn feature_matrix(features: &Value) -> Result<Array2<f64>, PredictError> {
    let size: usize = array_shape(features)?.iter().product();
    if size != FEATURE_COUNT {
        return Err(PredictError::ShapeMismatch(format!(
            "cannot reshape array of size {} into shape (1,{})",
            size, FEATURE_COUNT
        )));
    }

    let mut leaves = Vec::with_capacity(FEATURE_COUNT);
    flatten(features, &mut leaves);

    let values = leaves
        .into_iter()
        .map(|leaf| {
            leaf.as_f64()
                .ok_or_else(|| PredictError::NonNumeric(format!("could not convert {} to float", leaf)))
        })
        .collect::<Result<Vec<f64>, _>>()?;

    Array2::from_shape_vec((1, FEATURE_COUNT), values)
        .map_err(|e| PredictError::ShapeMismatch(e.to_string()))
}

/// Dimensions of a nested array; a scalar has shape `()`.
///
/// Siblings must share one shape, so ragged rows and mixed scalar/array
/// levels are rejected.
fn array_shape(value: &Value) -> Result<Vec<usize>, PredictError> {
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    let mut inner: Option<Vec<usize>> = None;
    for (i, item) in items.iter().enumerate() {
        let shape = array_shape(item)?;
        if let Some(expected) = &inner {
            if *expected != shape {
                return Err(PredictError::ShapeMismatch(format!(
                    "inhomogeneous features array: element {} has shape {:?}, expected {:?}",
                    i, shape, expected
                )));
            }
        } else {
            inner = Some(shape);
        }
    }

    let mut shape = vec![items.len()];
    shape.extend(inner.unwrap_or_default());
    Ok(shape)
}

fn flatten<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| flatten(item, out)),
        leaf => out.push(leaf),
    }
}
