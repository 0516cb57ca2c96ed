//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_MODEL_PATH, DEFAULT_PORT, DEFAULT_SCALER_PATH};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// ONNX classifier artifact
    pub model_path: PathBuf,

    /// Scaler parameter artifact (JSON)
    pub scaler_path: PathBuf,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),

            model_path: lookup("MODEL_PATH")
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
                .into(),

            scaler_path: lookup("SCALER_PATH")
                .unwrap_or_else(|| DEFAULT_SCALER_PATH.to_string())
                .into(),

            environment: lookup("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
