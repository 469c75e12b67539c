use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::{Display, EnumString};
use thiserror::Error;

/// Input rejected before any request is sent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter the email content")]
    EmptyInput,

    #[error("Unsupported file format. Use .txt or .pdf")]
    UnsupportedExtension,
}

impl ValidationError {
    pub fn to_error_type(&self) -> ClientErrorType {
        ClientErrorType::InvalidInputError
    }
}

/// Semantic error kinds, stable enough to be serialized in JSON output
#[derive(Debug, Display, EnumString, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub enum ClientErrorType {
    InvalidInputError,
    NetworkError,
    NetworkTimeoutError,
    RemoteClassificationError,
    UnexpectedStatusError,
    ResponseDecodeError,
    FileReadError,
    InvalidUrlError,
}

#[derive(Error, Debug)]
pub enum ClientError {
    /// No response was received from the service.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The classifier answered with a failure status and a reason.
    #[error("{message}")]
    RemoteClassification { status: u16, message: String },

    #[error("Service returned HTTP {0}")]
    UnexpectedStatus(u16),

    #[error("Failed to decode service response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to read {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    pub fn to_error_type(&self) -> ClientErrorType {
        match self {
            ClientError::Network(e) => {
                if e.is_timeout() {
                    ClientErrorType::NetworkTimeoutError
                } else {
                    ClientErrorType::NetworkError
                }
            }
            ClientError::RemoteClassification { .. } => {
                ClientErrorType::RemoteClassificationError
            }
            ClientError::UnexpectedStatus(_) => ClientErrorType::UnexpectedStatusError,
            ClientError::Decode(_) => ClientErrorType::ResponseDecodeError,
            ClientError::FileRead { .. } => ClientErrorType::FileReadError,
            ClientError::InvalidUrl(_) => ClientErrorType::InvalidUrlError,
        }
    }
}
