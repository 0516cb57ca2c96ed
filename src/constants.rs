//! Central Configuration Constants
//!
//! Single source of truth for the model contract and service defaults.

/// Number of features the classifier was trained on
pub const FEATURE_COUNT: usize = 40;

/// Score at or above which a vector is classified as phishing
pub const PHISHING_THRESHOLD: f32 = 0.5;

/// Default listening port
pub const DEFAULT_PORT: u16 = 8080;

/// Default ONNX classifier artifact
pub const DEFAULT_MODEL_PATH: &str = "phishing.onnx";

/// Default scaler parameter artifact
pub const DEFAULT_SCALER_PATH: &str = "scaler.json";

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "phishing_guard=debug,tower_http=debug";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
