//! ONNX Classifier - ONNX Runtime Integration
//!
//! Runs the exported phishing CNN. The graph takes a `(1, 40, 1)` f32 tensor
//! and emits one sigmoid probability.

use ndarray::Array3;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::error::{ArtifactError, InferenceError};
use super::Classifier;

/// Loaded ONNX session.
///
/// `Session::run` needs exclusive access, so concurrent requests serialize on
/// the session lock.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxClassifier {
    /// Load ONNX model from bytes
    pub fn from_bytes(model_bytes: &[u8]) -> Result<Self, ArtifactError> {
        tracing::debug!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| ArtifactError::Onnx(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ArtifactError::Onnx(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| ArtifactError::Onnx(format!("Load from memory error: {}", e)))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| ArtifactError::Onnx("No output defined".to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            output_name,
        })
    }
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("output_name", &self.output_name)
            .finish_non_exhaustive()
    }
}

impl Classifier for OnnxClassifier {
    fn infer(&self, input: Array3<f32>) -> Result<f32, InferenceError> {
        let input_tensor = Value::from_array(input)
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| InferenceError(format!("No output named '{}'", self.output_name)))?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;

        data.first()
            .copied()
            .ok_or_else(|| InferenceError("Model produced an empty output".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    use crate::constants::FEATURE_COUNT;

    /// `Y = Sigmoid(ReduceMean(X))` over a `(1, 40, 1)` input, built by
    /// `tests/fixtures/gen_mean_sigmoid.py`.
    const MEAN_SIGMOID: &[u8] = include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/mean_sigmoid.onnx"
    ));

    #[test]
    fn test_garbage_model_rejected() {
        let err = assert_err!(OnnxClassifier::from_bytes(b"not onnx"));
        assert!(matches!(err, ArtifactError::Onnx(_)));
    }

    #[test]
    fn test_infer_extracts_single_output() {
        let classifier = assert_ok!(OnnxClassifier::from_bytes(MEAN_SIGMOID));
        assert_eq!(classifier.output_name, "Y");

        let zeros = Array3::<f32>::zeros((1, FEATURE_COUNT, 1));
        let score = assert_ok!(classifier.infer(zeros));
        assert!((score - 0.5).abs() < 1e-6);

        let twos = Array3::<f32>::from_elem((1, FEATURE_COUNT, 1), 2.0);
        let score = assert_ok!(classifier.infer(twos));
        assert!((score - 1.0 / (1.0 + (-2.0f32).exp())).abs() < 1e-6);
    }

    #[test]
    fn test_infer_rejects_wrong_shape() {
        let classifier = assert_ok!(OnnxClassifier::from_bytes(MEAN_SIGMOID));
        let flat = Array3::<f32>::zeros((1, FEATURE_COUNT - 1, 1));
        assert_err!(classifier.infer(flat));
    }
}
