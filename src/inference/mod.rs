//! Inference Module - Phishing classification pipeline
//!
//! The classifier and scaler are opaque artifacts behind the `Classifier` and
//! `Scaler` traits, so the request pipeline can run against ONNX Runtime in
//! production and against stubs in tests.

pub mod artifacts;
pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod scaler;

#[cfg(test)]
pub mod testing;

use ndarray::{Array2, Array3};

// Re-export common types
pub use artifacts::{ArtifactInfo, ArtifactReport, LoadedArtifacts};
pub use error::{InferenceError, PredictError};
pub use pipeline::Predictor;

// ============================================================================
// ARTIFACT TRAITS
// ============================================================================

/// Pre-trained model producing a phishing probability.
pub trait Classifier: Send + Sync {
    /// Score a `(1, FEATURE_COUNT, 1)` tensor, returning the single output value.
    fn infer(&self, input: Array3<f32>) -> Result<f32, InferenceError>;
}

/// Pre-fitted feature transform applied before inference.
pub trait Scaler: Send + Sync {
    /// Transform a `(samples, FEATURE_COUNT)` matrix.
    fn transform(&self, input: Array2<f64>) -> Result<Array2<f64>, InferenceError>;
}
