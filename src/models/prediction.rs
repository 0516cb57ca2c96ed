//! Prediction response model

use serde::{Deserialize, Serialize};

use crate::constants::PHISHING_THRESHOLD;

/// Thresholded label derived from the classifier score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Phishing,
    Legitimate,
}

impl Verdict {
    pub fn from_score(score: f32) -> Self {
        if score >= PHISHING_THRESHOLD {
            Verdict::Phishing
        } else {
            Verdict::Legitimate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Phishing => "Phishing",
            Verdict::Legitimate => "Legitimate",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `POST /predict` success body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Raw phishing probability
    pub prediction: f64,
    pub result: Verdict,
}

impl PredictResponse {
    pub fn from_score(score: f32) -> Self {
        Self {
            prediction: f64::from(score),
            result: Verdict::from_score(score),
        }
    }
}
