use clap::{Args, ValueEnum};
use thiserror::Error;
use tracing::Level;

/// Output format for log lines written to stderr.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Args, Debug, Clone)]
pub struct LogArgs {
  /// Minimum log level (trace, debug, info, warn, error).
  #[arg(long, env = "LOG_LEVEL", default_value = "info")]
  pub log_level: Level,

  /// Log line format.
  #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "pretty")]
  pub log_format: LogFormat,
}

#[derive(Error, Debug)]
pub enum LoggingError {
  #[error("Failed to install tracing subscriber: {0}")]
  InitError(String),
}

/// Install the global tracing subscriber. Logs always go to stderr so
/// stdout stays free for rendered output.
pub fn init_logging(args: &LogArgs) -> Result<(), LoggingError> {
  let builder = tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_ansi(atty::is(atty::Stream::Stderr))
    .with_env_filter(
      tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(args.log_level.into()),
    );

  let installed = match args.log_format {
    LogFormat::Pretty => builder.try_init(),
    LogFormat::Json => builder.json().try_init(),
  };

  installed.map_err(|e| LoggingError::InitError(e.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::Parser;

  #[derive(Parser, Debug)]
  struct TestCli {
    #[command(flatten)]
    log: LogArgs,
  }

  #[test]
  fn test_log_args_defaults() {
    let cli = TestCli::try_parse_from(["test"]).unwrap();
    assert_eq!(cli.log.log_level, Level::INFO);
    assert_eq!(cli.log.log_format, LogFormat::Pretty);
  }

  #[test]
  fn test_log_args_explicit_values() {
    let cli = TestCli::try_parse_from([
      "test",
      "--log-level",
      "debug",
      "--log-format",
      "json",
    ])
    .unwrap();
    assert_eq!(cli.log.log_level, Level::DEBUG);
    assert_eq!(cli.log.log_format, LogFormat::Json);
  }

  #[test]
  fn test_log_args_rejects_unknown_level() {
    let result = TestCli::try_parse_from(["test", "--log-level", "loud"]);
    assert!(result.is_err());
  }
}
