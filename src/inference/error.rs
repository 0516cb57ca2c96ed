//! Inference error types

use std::path::PathBuf;

use axum::http::StatusCode;
use thiserror::Error;

/// Failure raised by an artifact while transforming or scoring a tensor.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InferenceError(pub String);

/// Failure while loading an artifact at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read artifact {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scaler parameters")]
    Parse(#[from] serde_json::Error),

    #[error("invalid scaler parameters: {0}")]
    InvalidScaler(String),

    #[error("failed to load ONNX model: {0}")]
    Onnx(String),
}

/// Every way a single `/predict` call can fail.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Missing 'features' key in request")]
    MissingFeatures,

    #[error("Malformed JSON body: {0}")]
    MalformedBody(String),

    #[error("Model or scaler not loaded properly")]
    NotLoaded,

    #[error("Scaler is not available")]
    ScalerUnavailable,

    #[error("{0}")]
    ShapeMismatch(String),

    #[error("{0}")]
    NonNumeric(String),

    #[error("{0}")]
    Scaling(#[source] InferenceError),

    #[error("{0}")]
    Inference(#[source] InferenceError),
}

impl PredictError {
    /// HTTP status reported for this failure.
    ///
    /// Shape mismatches stay on 500; deployed clients branch on that status.
    pub fn status(&self) -> StatusCode {
        match self {
            PredictError::MissingFeatures | PredictError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller mistakes are not worth an error-level log line.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

/// Render an error with its full `source()` chain.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !out.ends_with(&cause_msg) {
            out.push_str(": ");
            out.push_str(&cause_msg);
        }
        source = cause.source();
    }
    out
}
