use crate::{
    error::ClientError,
    model::{
        ClassificationRequest, ClassificationResult, ErrorBody, HealthResponse,
        TextClassificationBody,
    },
    validate::FileRef,
};
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

pub const HEALTH_PATH: &str = "health";
pub const TEXT_CLASSIFY_PATH: &str = "api/classify/text";
pub const FILE_CLASSIFY_PATH: &str = "api/classify/file";
pub const FILE_FIELD: &str = "file";

/// HTTP client for the classification service. Cheap to clone; clones
/// share the connection pool.
#[derive(Clone, Debug)]
pub struct ClassifierClient {
    base_url: Url,
    client: Client,
}

impl ClassifierClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        // Relative joins drop the last path segment unless it ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    pub async fn check_health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.endpoint(HEALTH_PATH)?;
        debug!("Checking service health at {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ClientError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(ClientError::Network)?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn submit_text(&self, content: &str) -> Result<ClassificationResult, ClientError> {
        self.classify(ClassificationRequest::Text {
            content: content.to_string(),
        })
        .await
    }

    pub async fn submit_file(&self, file: &FileRef) -> Result<ClassificationResult, ClientError> {
        let request = ClassificationRequest::from_file(file).await?;
        self.classify(request).await
    }

    /// Send one classification request. Never retries.
    pub async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<ClassificationResult, ClientError> {
        let fallback = request.fallback_error_message();

        let builder = match request {
            ClassificationRequest::Text { content } => {
                info!("Submitting text for classification ({} chars)", content.len());
                self.client
                    .post(self.endpoint(TEXT_CLASSIFY_PATH)?)
                    .json(&TextClassificationBody { content: &content })
            }
            ClassificationRequest::File { payload, filename } => {
                info!(
                    "Submitting file {} for classification ({} bytes)",
                    filename,
                    payload.len()
                );
                let part = Part::bytes(payload).file_name(filename);
                self.client
                    .post(self.endpoint(FILE_CLASSIFY_PATH)?)
                    .multipart(Form::new().part(FILE_FIELD, part))
            }
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                error!("Classification request timed out");
            } else if e.is_connect() {
                error!("Failed to connect to classification service");
            }
            ClientError::Network(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::Network)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message().map(str::to_string))
                .unwrap_or_else(|| fallback.to_string());
            error!("Classification service returned {}: {}", status, message);
            return Err(ClientError::RemoteClassification {
                status: status.as_u16(),
                message,
            });
        }

        let result: ClassificationResult = serde_json::from_slice(&body).map_err(|e| {
            error!("Failed to parse classification response");
            ClientError::Decode(e)
        })?;

        info!(
            "Classification complete: {} ({:.2})",
            result.classification, result.confidence
        );

        Ok(result.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_normalizes_base_path() {
        let client =
            ClassifierClient::new("http://localhost:8000/triage", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/triage/");
        assert_eq!(
            client.endpoint(TEXT_CLASSIFY_PATH).unwrap().as_str(),
            "http://localhost:8000/triage/api/classify/text"
        );
    }

    #[test]
    fn test_client_creation_root_url() {
        let client = ClassifierClient::new("http://localhost:8000", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.endpoint(HEALTH_PATH).unwrap().as_str(),
            "http://localhost:8000/health"
        );
    }

    #[test]
    fn test_client_rejects_invalid_url() {
        let result = ClassifierClient::new("not a url", Duration::from_secs(5));
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }
}
