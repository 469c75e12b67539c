//! Line-oriented terminal front end.

use crate::samples::Sample;
use mail_triage_client::{
  Event, FileRef, Frontend, Notice, NoticeLevel, Snapshot, ViewState,
  controller::SubmissionKind, sanitize_terminal,
};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{
  Arc,
  atomic::{AtomicBool, Ordering},
};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error};

const BAR_WIDTH: usize = 20;
const PASTE_END: &str = ".";

pub const HELP: &str = "Commands:
  text <content>     set the email text
  paste              enter multi-line text, finish with a line containing only '.'
  sample <name>      load a sample email (suporte, status, natal, agradecimento)
  file <path>        select a .txt or .pdf file
  clear-file         drop the selected file
  submit             classify the email text
  submit-file        classify the selected file
  reset              clear the form and the result
  copy               copy the suggested response
  status             show the service status
  help               show this help
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
  Text(String),
  Paste,
  Sample(Sample),
  File(PathBuf),
  ClearFile,
  Submit,
  SubmitFile,
  Reset,
  Copy,
  Status,
  Help,
  Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
  #[error("Unknown command '{0}', type 'help' for a list")]
  Unknown(String),

  #[error("'{0}' needs an argument")]
  MissingArgument(&'static str),

  #[error("Unknown sample '{0}', try suporte, status, natal or agradecimento")]
  UnknownSample(String),
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<UserCommand>, CommandError> {
  let line = line.trim();
  if line.is_empty() {
    return Ok(None);
  }

  let (name, rest) = match line.split_once(char::is_whitespace) {
    Some((name, rest)) => (name, rest.trim()),
    None => (line, ""),
  };

  let command = match name {
    "text" => UserCommand::Text(rest.to_string()),
    "paste" => UserCommand::Paste,
    "sample" => {
      if rest.is_empty() {
        return Err(CommandError::MissingArgument("sample"));
      }
      let sample = Sample::from_str(rest)
        .map_err(|_| CommandError::UnknownSample(rest.to_string()))?;
      UserCommand::Sample(sample)
    }
    "file" => {
      if rest.is_empty() {
        return Err(CommandError::MissingArgument("file"));
      }
      UserCommand::File(PathBuf::from(rest))
    }
    "clear-file" => UserCommand::ClearFile,
    "submit" => UserCommand::Submit,
    "submit-file" => UserCommand::SubmitFile,
    "reset" => UserCommand::Reset,
    "copy" => UserCommand::Copy,
    "status" => UserCommand::Status,
    "help" | "?" => UserCommand::Help,
    "quit" | "exit" => UserCommand::Quit,
    other => return Err(CommandError::Unknown(other.to_string())),
  };

  Ok(Some(command))
}

/// Read commands from stdin and forward them as events until `quit`, end
/// of input, or the event loop going away.
pub async fn read_commands(events: UnboundedSender<Event>, show_status: Arc<AtomicBool>) {
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  let mut paste: Option<Vec<String>> = None;

  loop {
    let line = match lines.next_line().await {
      Ok(Some(line)) => line,
      Ok(None) => {
        debug!("End of input");
        break;
      }
      Err(e) => {
        error!("Failed to read from stdin: {}", e);
        break;
      }
    };

    if let Some(buffer) = paste.as_mut() {
      if line.trim_end() == PASTE_END {
        let text = buffer.join("\n");
        paste = None;
        if events.send(Event::TextChanged(text)).is_err() {
          return;
        }
        println!("Text set.");
      } else {
        buffer.push(line);
      }
      continue;
    }

    let command = match parse_command(&line) {
      Ok(Some(command)) => command,
      Ok(None) => continue,
      Err(e) => {
        println!("{}", e);
        continue;
      }
    };

    let event = match command {
      UserCommand::Text(text) => {
        println!("Text set.");
        Event::TextChanged(text)
      }
      UserCommand::Paste => {
        println!("Paste the email, then a line containing only '{}':", PASTE_END);
        paste = Some(Vec::new());
        continue;
      }
      UserCommand::Sample(sample) => {
        println!("Loaded sample '{}'.", sample.as_ref());
        Event::TextChanged(sample.text().to_string())
      }
      UserCommand::File(path) => Event::FileSelected(FileRef::from_path(path)),
      UserCommand::ClearFile => Event::FileCleared,
      UserCommand::Submit => Event::SubmitText,
      UserCommand::SubmitFile => Event::SubmitFile,
      UserCommand::Reset => Event::Reset,
      UserCommand::Copy => Event::CopyRequested,
      UserCommand::Status => {
        show_status.store(true, Ordering::SeqCst);
        Event::HealthCheckRequested
      }
      UserCommand::Help => {
        println!("{}", HELP);
        continue;
      }
      UserCommand::Quit => {
        let _ = events.send(Event::Quit);
        return;
      }
    };

    if events.send(event).is_err() {
      return;
    }
  }

  let _ = events.send(Event::Quit);
}

/// One line for the health indicator, e.g. `[online] AI connected and ready`.
pub fn render_status(snapshot: &Snapshot) -> String {
  match &snapshot.service {
    Some(status) => {
      let version = status
        .version
        .as_deref()
        .map(|v| format!(" (v{})", sanitize_terminal(v)))
        .unwrap_or_default();
      format!("[{}] {}{}", status.indicator(), status.status_text(), version)
    }
    None => "[checking] Checking service...".to_string(),
  }
}

/// The main panel for the current state.
pub fn render_panel(snapshot: &Snapshot) -> String {
  match &snapshot.state {
    ViewState::Idle => {
      let mut out = String::from("Ready. Enter text or select a file (type 'help').");
      if let Some(err) = &snapshot.last_error {
        out.push_str(&format!("\nLast attempt failed: {}", sanitize_terminal(err)));
      }
      out
    }
    ViewState::Pending { token, kind } => {
      let what = match kind {
        SubmissionKind::Text => "email",
        SubmissionKind::File => "file",
      };
      format!("Classifying {} ({})...", what, token)
    }
    ViewState::Result { view, .. } => {
      let keywords = if view.keyword_tags.is_empty() {
        "-".to_string()
      } else {
        view.keyword_tags.join(", ")
      };
      let response = view
        .suggested_response
        .lines()
        .map(|l| format!("    {}", l))
        .collect::<Vec<_>>()
        .join("\n");

      format!(
        "== {} ==\n  Confidence: {} [{}] {}\n  Keywords: {}\n  Suggested response:\n{}\n  [copy] {}",
        view.label,
        view.percent_label(),
        view.confidence_bar(BAR_WIDTH),
        view.band,
        keywords,
        response,
        snapshot.copy_feedback.label()
      )
    }
  }
}

/// Prints to stdout only what changed since the last frame.
pub struct TerminalFrontend {
  last: Option<Snapshot>,
  show_status: Arc<AtomicBool>,
}

impl TerminalFrontend {
  pub fn new(show_status: Arc<AtomicBool>) -> Self {
    Self {
      last: None,
      show_status,
    }
  }
}

impl Frontend for TerminalFrontend {
  fn draw(&mut self, snapshot: &Snapshot) {
    let previous = self.last.as_ref();

    let status_changed = previous.is_none_or(|p| {
      let key = |s: &Snapshot| s.service.as_ref().map(|st| (st.reachable, st.ai_enabled));
      key(p) != key(snapshot)
    });
    if self.show_status.swap(false, Ordering::SeqCst) || status_changed {
      println!("{}", render_status(snapshot));
    }

    if previous.is_none_or(|p| p.selected_file != snapshot.selected_file) {
      if let Some(file) = &snapshot.selected_file {
        println!("Selected file: {}", file.name);
      } else if previous.is_some_and(|p| p.selected_file.is_some()) {
        println!("No file selected.");
      }
    }

    if previous.is_none_or(|p| p.state != snapshot.state) {
      println!("{}", render_panel(snapshot));
    } else if previous.is_some_and(|p| p.copy_feedback != snapshot.copy_feedback)
      && matches!(snapshot.state, ViewState::Result { .. })
    {
      println!("  [copy] {}", snapshot.copy_feedback.label());
    }

    self.last = Some(snapshot.clone());
  }

  fn notify(&mut self, notice: &Notice) {
    match notice.level {
      NoticeLevel::Info => println!("* {}", sanitize_terminal(&notice.message)),
      NoticeLevel::Error => println!("! {}", sanitize_terminal(&notice.message)),
    }
  }
}
