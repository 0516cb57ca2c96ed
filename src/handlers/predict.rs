//! Prediction handler

use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use uuid::Uuid;

use crate::inference::{error::error_chain, PredictError, Predictor};
use crate::models::PredictResponse;
use crate::{AppError, AppResult, AppState};

/// Classify a feature vector
///
/// The body is parsed here rather than through the `Json` extractor so the
/// missing-key check keeps its own status and message.
#[tracing::instrument(name = "predict", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<PredictResponse>> {
    let predictor = state.predictor.clone();
    let span = tracing::Span::current();

    let outcome = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        run(&predictor, &body)
    })
    .await
    .map_err(|e| {
        tracing::error!("Prediction task failed: {}", e);
        AppError::from(e)
    })?;

    match outcome {
        Ok(response) => {
            tracing::debug!(
                prediction = response.prediction,
                result = %response.result,
                "Prediction served"
            );
            Ok(Json(response))
        }
        Err(e) if e.is_client_error() => {
            tracing::warn!("Rejected prediction request: {}", e);
            Err(e.into())
        }
        Err(e) => {
            tracing::error!(error = ?e, "Error during prediction: {}", error_chain(&e));
            Err(e.into())
        }
    }
}

fn run(predictor: &Predictor, body: &[u8]) -> Result<PredictResponse, PredictError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| PredictError::MalformedBody(e.to_string()))?;
    predictor.predict(&value)
}
