use mail_triage_client::{
    Category, ClassificationResult, ClientErrorType, ResultView, ServiceStatus,
};
use serde::Serialize;

/// Error information
#[derive(Serialize, Debug, Clone)]
pub struct ErrorInfo {
    pub error_type: ClientErrorType,
    pub message: String,
}

/// Output format for successful classification
#[derive(Serialize, Debug, Clone)]
pub struct ClassificationOutput {
    pub source: String,
    pub result: String, // "classified"
    pub classification: Category,
    pub confidence: f64,
    pub confidence_percent: u8,
    pub confidence_band: String,
    pub suggested_response: String,
    pub keywords: Vec<String>,
}

/// Output format for errors
#[derive(Serialize, Debug, Clone)]
pub struct ErrorOutput {
    pub source: String,
    pub result: String, // "error"
    pub error: ErrorInfo,
}

#[derive(Serialize, Debug, Clone)]
pub struct HealthOutput {
    pub service_url: String,
    pub indicator: String,
    pub status_text: String,
    #[serde(flatten)]
    pub status: ServiceStatus,
}

impl ClassificationOutput {
    pub fn new(source: &str, result: ClassificationResult) -> Self {
        let view = ResultView::new(&result);
        Self {
            source: source.to_string(),
            result: "classified".to_string(),
            classification: result.classification,
            confidence: result.confidence,
            confidence_percent: view.percent,
            confidence_band: view.band.to_string(),
            suggested_response: result.suggested_response,
            keywords: result.keywords,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl ErrorOutput {
    pub fn new(source: &str, error_type: ClientErrorType, message: String) -> Self {
        Self {
            source: source.to_string(),
            result: "error".to_string(),
            error: ErrorInfo {
                error_type,
                message,
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl HealthOutput {
    pub fn new(service_url: &str, status: ServiceStatus) -> Self {
        Self {
            service_url: service_url.to_string(),
            indicator: status.indicator().to_string(),
            status_text: status.status_text().to_string(),
            status,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
