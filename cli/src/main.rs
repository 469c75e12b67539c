mod cli_args;
mod error;
mod output;
mod samples;
mod terminal;

use clap::Parser;
use cli_args::{ClassifyArgs, CliArgs, Command, OutputFormat};
use error::CliError;
use mail_triage_client::{
  ClassificationResult, ClassifierClient, FileRef, Runtime, clipboard::SystemClipboard, health,
  sanitize_terminal, validate_file_selection, validate_text_submission,
};
use mail_triage_common::init_logging;
use output::{ClassificationOutput, ErrorOutput, HealthOutput};
use std::sync::{Arc, atomic::AtomicBool};
use terminal::TerminalFrontend;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
  let args = CliArgs::parse();
  init_logging(&args.log)?;

  info!("Starting mail-triage");
  info!("Service URL: {}", args.service_url);
  info!("Output format: {}", args.output);

  let client = ClassifierClient::new(&args.service_url, args.http_timeout())?;

  match args.command.clone().unwrap_or(Command::Interactive) {
    Command::Interactive => run_interactive(&args, client).await,
    Command::Classify(source) => run_classify(&args, &client, source).await,
    Command::Health => run_health(&args, &client).await,
  }
}

async fn run_interactive(args: &CliArgs, client: ClassifierClient) -> Result<(), CliError> {
  let show_status = Arc::new(AtomicBool::new(true));
  let runtime = Runtime::new(
    client,
    Arc::new(SystemClipboard),
    args.runtime_config(),
    TerminalFrontend::new(show_status.clone()),
  );

  println!("{}", terminal::HELP);
  let reader = tokio::spawn(terminal::read_commands(runtime.sender(), show_status));

  let last = runtime.run().await;
  reader.abort();

  info!("Session ended in {} state", last.state.name());
  Ok(())
}

async fn classify_once(
  client: &ClassifierClient,
  source: ClassifyArgs,
) -> Result<ClassificationResult, CliError> {
  match (source.text, source.file) {
    (_, Some(path)) => {
      let file = validate_file_selection(FileRef::from_path(path))?;
      Ok(client.submit_file(&file).await?)
    }
    (text, None) => {
      let content = validate_text_submission(text.as_deref().unwrap_or_default())?;
      Ok(client.submit_text(&content).await?)
    }
  }
}

async fn run_classify(
  args: &CliArgs,
  client: &ClassifierClient,
  source: ClassifyArgs,
) -> Result<(), CliError> {
  let label = match &source.file {
    Some(path) => FileRef::from_path(path).name,
    None => "text".to_string(),
  };

  let result = match classify_once(client, source).await {
    Ok(result) => ClassificationOutput::new(&label, result),
    Err(e) => {
      let Some(error_type) = e.error_type() else {
        return Err(e);
      };
      error!("Classification failed: {}", e);
      let output = ErrorOutput::new(&label, error_type, e.to_string());
      match args.output {
        OutputFormat::Json => println!("{}", output.to_json()?),
        OutputFormat::Human => {
          eprintln!("Classification Error:");
          eprintln!("  Source: {}", output.source);
          eprintln!("  Error Type: {}", output.error.error_type);
          eprintln!("  Message: {}", sanitize_terminal(&output.error.message));
        }
      }
      std::process::exit(1);
    }
  };

  info!(
    "Classification complete: {} ({}%)",
    result.classification, result.confidence_percent
  );

  match args.output {
    OutputFormat::Json => println!("{}", result.to_json()?),
    OutputFormat::Human => {
      println!("Classification Result:");
      println!("  Source: {}", result.source);
      println!("  Category: {}", result.classification);
      println!(
        "  Confidence: {}% ({})",
        result.confidence_percent, result.confidence_band
      );
      let keywords: Vec<String> = result.keywords.iter().map(|k| sanitize_terminal(k)).collect();
      println!("  Keywords: {}", keywords.join(", "));
      println!("  Suggested Response:");
      for line in sanitize_terminal(&result.suggested_response).lines() {
        println!("    {}", line);
      }
    }
  }

  Ok(())
}

async fn run_health(args: &CliArgs, client: &ClassifierClient) -> Result<(), CliError> {
  let output = HealthOutput::new(client.base_url().as_str(), health::probe(client).await);

  match args.output {
    OutputFormat::Json => println!("{}", output.to_json()?),
    OutputFormat::Human => {
      println!("Service: {}", output.service_url);
      println!("  Status: {}", output.indicator);
      println!("  {}", output.status_text);
      if let Some(version) = &output.status.version {
        println!("  Version: {}", sanitize_terminal(version));
      }
    }
  }

  if !output.status.reachable {
    std::process::exit(1);
  }
  Ok(())
}
