//! Artifact loading
//!
//! Both artifacts are read once at startup. A failure leaves that slot empty
//! and the service keeps running in a degraded state.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::classifier::OnnxClassifier;
use super::error::{error_chain, ArtifactError};
use super::scaler::StandardScaler;
use super::{Classifier, Scaler};
use crate::config::Config;

/// Metadata recorded for a successfully loaded artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub path: String,
    pub sha256: String,
    pub size_bytes: usize,
    pub loaded_at: DateTime<Utc>,
}

impl ArtifactInfo {
    fn describe(path: &Path, bytes: &[u8]) -> Self {
        Self {
            path: path.display().to_string(),
            sha256: hex::encode(Sha256::digest(bytes)),
            size_bytes: bytes.len(),
            loaded_at: Utc::now(),
        }
    }
}

/// What was loaded, reported by the health endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactReport {
    pub model: Option<ArtifactInfo>,
    pub scaler: Option<ArtifactInfo>,
}

/// Result of startup loading
#[derive(Default)]
pub struct LoadedArtifacts {
    pub classifier: Option<Arc<dyn Classifier>>,
    pub scaler: Option<Arc<dyn Scaler>>,
    pub report: ArtifactReport,
}

impl LoadedArtifacts {
    /// Load classifier and scaler from the configured paths
    pub fn load(config: &Config) -> Self {
        let (classifier, model_info) = match load_artifact(&config.model_path, OnnxClassifier::from_bytes) {
            Ok((classifier, info)) => (Some(Arc::new(classifier) as Arc<dyn Classifier>), Some(info)),
            Err(e) => {
                tracing::error!("Error loading model: {}", error_chain(&e));
                (None, None)
            }
        };

        let (scaler, scaler_info) = match load_artifact(&config.scaler_path, StandardScaler::from_json) {
            Ok((scaler, info)) => (Some(Arc::new(scaler) as Arc<dyn Scaler>), Some(info)),
            Err(e) => {
                tracing::error!("Error loading scaler: {}", error_chain(&e));
                (None, None)
            }
        };

        let loaded = Self {
            classifier,
            scaler,
            report: ArtifactReport {
                model: model_info,
                scaler: scaler_info,
            },
        };

        if loaded.is_ready() {
            tracing::info!("Model and scaler loaded successfully");
        } else {
            tracing::warn!("Serving in degraded mode: /predict will reject every request");
        }

        loaded
    }

    pub fn is_ready(&self) -> bool {
        self.classifier.is_some() && self.scaler.is_some()
    }
}

/// Read an artifact, hash it, and hand the bytes to `parse`.
fn load_artifact<T>(
    path: &Path,
    parse: impl FnOnce(&[u8]) -> Result<T, ArtifactError>,
) -> Result<(T, ArtifactInfo), ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let artifact = parse(&bytes)?;
    let info = ArtifactInfo::describe(path, &bytes);

    tracing::info!(
        path = %info.path,
        sha256 = %info.sha256,
        size_bytes = info.size_bytes,
        "Artifact loaded"
    );

    Ok((artifact, info))
}
