use mail_triage_client::{ClientError, ClientErrorType, ValidationError};
use mail_triage_common::LoggingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
  #[error("Logging setup failed: {0}")]
  Logging(#[from] LoggingError),

  #[error(transparent)]
  Client(#[from] ClientError),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("Terminal I/O failed: {0}")]
  Io(#[from] std::io::Error),

  #[error("Failed to serialize output: {0}")]
  Serialize(#[from] serde_json::Error),
}

impl CliError {
  /// Semantic kind for errors that come from classifying, `None` for
  /// failures of the program itself.
  pub fn error_type(&self) -> Option<ClientErrorType> {
    match self {
      CliError::Client(e) => Some(e.to_error_type()),
      CliError::Validation(e) => Some(e.to_error_type()),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_type_for_classification_failures() {
    let err = CliError::from(ValidationError::EmptyInput);
    assert_eq!(err.error_type(), Some(ClientErrorType::InvalidInputError));
    assert_eq!(err.to_string(), "Please enter the email content");

    let err = CliError::from(ClientError::UnexpectedStatus(502));
    assert_eq!(
      err.error_type(),
      Some(ClientErrorType::UnexpectedStatusError)
    );
  }

  #[test]
  fn test_program_errors_have_no_error_type() {
    let err = CliError::from(std::io::Error::other("closed"));
    assert_eq!(err.error_type(), None);
  }
}
