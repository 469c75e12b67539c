use crate::{error::ClientError, validate::FileRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use tracing::warn;

/// One submission to the classifier. Exactly one shape is sent per request.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationRequest {
    Text { content: String },
    File { payload: Vec<u8>, filename: String },
}

impl ClassificationRequest {
    /// Read the selected file into a file request.
    pub async fn from_file(file: &FileRef) -> Result<Self, ClientError> {
        let payload = tokio::fs::read(file.path())
            .await
            .map_err(|source| ClientError::FileRead {
                path: file.path.clone(),
                source,
            })?;
        Ok(Self::File {
            payload,
            filename: file.name.clone(),
        })
    }

    /// Message shown when the service fails without a usable `detail`.
    pub fn fallback_error_message(&self) -> &'static str {
        match self {
            Self::Text { .. } => "Failed to classify email",
            Self::File { .. } => "Failed to classify file",
        }
    }
}

/// Body of `POST /api/classify/text`
#[derive(Serialize, Debug, Clone)]
pub struct TextClassificationBody<'a> {
    pub content: &'a str,
}

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr,
)]
pub enum Category {
    #[serde(rename = "Produtivo")]
    #[strum(serialize = "Produtivo")]
    Productive,
    #[serde(rename = "Improdutivo")]
    #[strum(serialize = "Improdutivo")]
    Unproductive,
}

impl Category {
    pub fn badge_class(&self) -> &'static str {
        match self {
            Category::Productive => "produtivo",
            Category::Unproductive => "improdutivo",
        }
    }
}

/// Verdict returned by the classifier
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub classification: Category,
    pub confidence: f64,
    #[serde(default)]
    pub suggested_response: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ClassificationResult {
    /// Clamp the confidence into [0.0, 1.0].
    pub fn normalized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.confidence) {
            warn!(
                "Classifier returned out-of-range confidence {}, clamping",
                self.confidence
            );
            self.confidence = if self.confidence.is_nan() {
                0.0
            } else {
                self.confidence.clamp(0.0, 1.0)
            };
        }
        self
    }
}

/// Failure body, `{"detail": "..."}`. FastAPI-style validation errors put
/// a list in `detail`, so it is kept as a raw value.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(|d| d.as_str())
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Body of `GET /health`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub ai_enabled: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Latest known availability of the service. Only the most recent value
/// is kept.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ServiceStatus {
    pub reachable: bool,
    pub ai_enabled: bool,
    pub version: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl ServiceStatus {
    pub fn online(health: &HealthResponse) -> Self {
        Self {
            reachable: true,
            ai_enabled: health.ai_enabled,
            version: health.version.clone(),
            checked_at: Utc::now(),
        }
    }

    pub fn offline() -> Self {
        Self {
            reachable: false,
            ai_enabled: false,
            version: None,
            checked_at: Utc::now(),
        }
    }

    pub fn indicator(&self) -> &'static str {
        if self.reachable { "online" } else { "offline" }
    }

    pub fn status_text(&self) -> &'static str {
        match (self.reachable, self.ai_enabled) {
            (false, _) => "Connection error with the server",
            (true, true) => "AI connected and ready",
            (true, false) => "Heuristic mode (no AI backend)",
        }
    }
}
