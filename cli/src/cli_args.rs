use clap::{Args, Parser, Subcommand, ValueEnum};
use mail_triage_client::RuntimeConfig;
use mail_triage_common::LogArgs;
use std::path::PathBuf;
use std::time::Duration;
use strum::Display;

#[derive(ValueEnum, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
  Human,
  Json,
}

#[derive(Parser, Debug)]
#[command(
  name = "mail-triage",
  version,
  about = "Terminal client for the email classification service"
)]
pub struct CliArgs {
  /// Base URL of the classification service.
  #[arg(long, env = "SERVICE_URL", default_value = "http://localhost:8000")]
  pub service_url: String,

  /// HTTP timeout in seconds.
  #[arg(long, env = "HTTP_TIMEOUT_SEC", default_value = "30")]
  pub http_timeout_sec: u64,

  /// Seconds between health checks.
  #[arg(long, env = "HEALTH_INTERVAL_SEC", default_value = "30")]
  pub health_interval_sec: u64,

  /// How long the "Copied!" confirmation stays up, in milliseconds.
  #[arg(long, env = "COPY_FEEDBACK_MS", default_value = "2000")]
  pub copy_feedback_ms: u64,

  /// Output format for one-shot commands (json or human-readable).
  #[arg(
    long,
    env = "OUTPUT",
    value_enum,
    default_value = "human",
    global = true
  )]
  pub output: OutputFormat,

  #[command(flatten)]
  pub log: LogArgs,

  #[command(subcommand)]
  pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
  /// Interactive session (the default).
  Interactive,
  /// Classify one email and exit.
  Classify(ClassifyArgs),
  /// Check the service once and exit.
  Health,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct ClassifyArgs {
  /// Email content to classify.
  #[arg(long)]
  pub text: Option<String>,

  /// A .txt or .pdf file to classify.
  #[arg(long)]
  pub file: Option<PathBuf>,
}

impl CliArgs {
  pub fn http_timeout(&self) -> Duration {
    Duration::from_secs(self.http_timeout_sec.max(1))
  }

  pub fn runtime_config(&self) -> RuntimeConfig {
    RuntimeConfig {
      health_interval: Duration::from_secs(self.health_interval_sec.max(1)),
      copy_feedback: Duration::from_millis(self.copy_feedback_ms),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let args = CliArgs::try_parse_from(["mail-triage"]).unwrap();
    assert_eq!(args.http_timeout(), Duration::from_secs(30));
    assert_eq!(args.command, None);

    let config = args.runtime_config();
    assert_eq!(config.health_interval, Duration::from_secs(30));
    assert_eq!(config.copy_feedback, Duration::from_millis(2000));
  }

  #[test]
  fn test_classify_text() {
    let args = CliArgs::try_parse_from([
      "mail-triage",
      "classify",
      "--text",
      "Olá",
      "--output",
      "json",
    ])
    .unwrap();

    assert_eq!(args.output, OutputFormat::Json);
    assert_eq!(
      args.command,
      Some(Command::Classify(ClassifyArgs {
        text: Some("Olá".to_string()),
        file: None,
      }))
    );
  }

  #[test]
  fn test_classify_needs_exactly_one_source() {
    assert!(CliArgs::try_parse_from(["mail-triage", "classify"]).is_err());
    assert!(
      CliArgs::try_parse_from([
        "mail-triage",
        "classify",
        "--text",
        "a",
        "--file",
        "b.txt",
      ])
      .is_err()
    );
  }

  #[test]
  fn test_zero_health_interval_is_raised() {
    let args = CliArgs::try_parse_from([
      "mail-triage",
      "--health-interval-sec",
      "0",
      "health",
    ])
    .unwrap();
    assert_eq!(args.command, Some(Command::Health));
    assert_eq!(args.runtime_config().health_interval, Duration::from_secs(1));
  }

  #[test]
  fn test_zero_http_timeout_is_raised() {
    let args = CliArgs::try_parse_from([
      "mail-triage",
      "--http-timeout-sec",
      "0",
      "health",
    ])
    .unwrap();
    assert_eq!(args.http_timeout(), Duration::from_secs(1));
  }
}
