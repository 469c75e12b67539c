//! View state machine.
//!
//! The [`Controller`] is the only writer of the UI state. Front ends feed it
//! [`Event`]s and carry out the [`Effect`]s it hands back; nothing else
//! mutates the state, and each transition replaces it in one assignment.
//!
//! ```text
//! Idle    --submit (valid)-->  Pending
//! Pending --success------->    Result
//! Pending --failure------->    Idle      (error surfaced)
//! Result  --submit (valid)-->  Pending
//! Result  --reset--------->    Idle      (form cleared)
//! ```

use crate::{
    error::ClientError,
    model::{ClassificationResult, ServiceStatus},
    render::ResultView,
    validate::{FileRef, validate_file_selection, validate_text_submission},
};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const COPY_FEEDBACK_DELAY: Duration = Duration::from_secs(2);

/// Identifies one submission. Tokens increase monotonically; only the
/// response carrying the active token is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Text,
    File,
}

/// What the runtime should send. File content is read when the request is
/// built, not here.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Text(String),
    File(FileRef),
}

impl Submission {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            Submission::Text(_) => SubmissionKind::Text,
            Submission::File(_) => SubmissionKind::File,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Pending {
        token: RequestToken,
        kind: SubmissionKind,
    },
    Result {
        result: ClassificationResult,
        view: ResultView,
    },
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Pending { .. } => "pending",
            ViewState::Result { .. } => "result",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ViewState::Pending { .. })
    }

    pub fn result_view(&self) -> Option<&ResultView> {
        match self {
            ViewState::Result { view, .. } => Some(view),
            _ => None,
        }
    }
}

/// Inputs to the state machine, from the user or from finished background
/// work.
#[derive(Debug)]
pub enum Event {
    TextChanged(String),
    SubmitText,
    FileSelected(FileRef),
    FileCleared,
    SubmitFile,
    Reset,
    CopyRequested,
    CopyFinished(bool),
    CopyFeedbackExpired(u64),
    HealthTick(ServiceStatus),
    HealthCheckRequested,
    ClassificationFinished {
        token: RequestToken,
        outcome: Result<ClassificationResult, ClientError>,
    },
    Quit,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Classify {
        token: RequestToken,
        submission: Submission,
    },
    Copy(String),
    ExpireCopyFeedback {
        generation: u64,
        after: Duration,
    },
    ProbeHealth,
    Notify(Notice),
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message for the user, shown once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyFeedback {
    #[default]
    Ready,
    Copied,
}

impl CopyFeedback {
    pub fn label(&self) -> &'static str {
        match self {
            CopyFeedback::Ready => "Copy response",
            CopyFeedback::Copied => "Copied!",
        }
    }
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub state: ViewState,
    pub text: String,
    pub selected_file: Option<FileRef>,
    pub service: Option<ServiceStatus>,
    pub copy_feedback: CopyFeedback,
    pub last_error: Option<String>,
    pub can_submit_text: bool,
    pub can_submit_file: bool,
}

#[derive(Debug)]
pub struct Controller {
    state: ViewState,
    text: String,
    selected_file: Option<FileRef>,
    service: Option<ServiceStatus>,
    copy_feedback: CopyFeedback,
    copy_generation: u64,
    copy_feedback_delay: Duration,
    last_error: Option<String>,
    last_token: u64,
    /// Outstanding request. Survives a reset, so the view can be back to
    /// idle while a response is still owed.
    in_flight: Option<RequestToken>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(COPY_FEEDBACK_DELAY)
    }
}

impl Controller {
    pub fn new(copy_feedback_delay: Duration) -> Self {
        Self {
            state: ViewState::Idle,
            text: String::new(),
            selected_file: None,
            service: None,
            copy_feedback: CopyFeedback::Ready,
            copy_generation: 0,
            copy_feedback_delay,
            last_error: None,
            last_token: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selected_file(&self) -> Option<&FileRef> {
        self.selected_file.as_ref()
    }

    pub fn service(&self) -> Option<&ServiceStatus> {
        self.service.as_ref()
    }

    pub fn copy_feedback(&self) -> CopyFeedback {
        self.copy_feedback
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn in_flight(&self) -> Option<RequestToken> {
        self.in_flight
    }

    pub fn can_submit_text(&self) -> bool {
        self.in_flight.is_none()
    }

    pub fn can_submit_file(&self) -> bool {
        self.in_flight.is_none() && self.selected_file.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            text: self.text.clone(),
            selected_file: self.selected_file.clone(),
            service: self.service.clone(),
            copy_feedback: self.copy_feedback,
            last_error: self.last_error.clone(),
            can_submit_text: self.can_submit_text(),
            can_submit_file: self.can_submit_file(),
        }
    }

    /// Apply one event and return the effects the caller must perform.
    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::TextChanged(text) => {
                self.text = text;
                vec![]
            }
            Event::SubmitText => self.submit_text(),
            Event::FileSelected(file) => self.select_file(file),
            Event::FileCleared => {
                self.selected_file = None;
                vec![]
            }
            Event::SubmitFile => self.submit_file(),
            Event::Reset => self.reset(),
            Event::CopyRequested => self.request_copy(),
            Event::CopyFinished(copied) => self.copy_finished(copied),
            Event::CopyFeedbackExpired(generation) => {
                if generation == self.copy_generation {
                    self.copy_feedback = CopyFeedback::Ready;
                }
                vec![]
            }
            Event::HealthTick(status) => {
                self.record_health(status);
                vec![]
            }
            Event::HealthCheckRequested => vec![Effect::ProbeHealth],
            Event::ClassificationFinished { token, outcome } => self.finish(token, outcome),
            Event::Quit => vec![Effect::Exit],
        }
    }

    /// Refuse a submit while a request is outstanding. The user only hears
    /// about it when the view no longer shows the pending state.
    fn reject_while_in_flight(&self) -> Option<Vec<Effect>> {
        let token = self.in_flight?;
        warn!("Submission {} still outstanding, ignoring submit", token);
        if self.state.is_pending() {
            Some(vec![])
        } else {
            Some(vec![Effect::Notify(Notice::info(
                "Previous classification still in progress, try again shortly",
            ))])
        }
    }

    fn submit_text(&mut self) -> Vec<Effect> {
        if let Some(rejected) = self.reject_while_in_flight() {
            return rejected;
        }

        match validate_text_submission(&self.text) {
            Ok(content) => self.begin(Submission::Text(content)),
            Err(e) => {
                warn!("Text submission rejected: {}", e);
                vec![Effect::Notify(Notice::error(e.to_string()))]
            }
        }
    }

    fn submit_file(&mut self) -> Vec<Effect> {
        if let Some(rejected) = self.reject_while_in_flight() {
            return rejected;
        }

        match self.selected_file.clone() {
            Some(file) => self.begin(Submission::File(file)),
            None => {
                debug!("No file selected, file submit is disabled");
                vec![]
            }
        }
    }

    fn select_file(&mut self, file: FileRef) -> Vec<Effect> {
        let name = file.name.clone();
        match validate_file_selection(file) {
            Ok(file) => {
                info!("Selected file {}", file.name);
                self.selected_file = Some(file);
                vec![]
            }
            Err(e) => {
                warn!("File {:?} rejected: {}", name, e);
                self.selected_file = None;
                vec![Effect::Notify(Notice::error(e.to_string()))]
            }
        }
    }

    fn begin(&mut self, submission: Submission) -> Vec<Effect> {
        self.last_token += 1;
        let token = RequestToken(self.last_token);
        let kind = submission.kind();

        info!("Submission {} started ({:?})", token, kind);
        self.last_error = None;
        self.copy_feedback = CopyFeedback::Ready;
        self.state = ViewState::Pending { token, kind };
        self.in_flight = Some(token);

        vec![Effect::Classify { token, submission }]
    }

    fn finish(
        &mut self,
        token: RequestToken,
        outcome: Result<ClassificationResult, ClientError>,
    ) -> Vec<Effect> {
        if self.in_flight == Some(token) {
            self.in_flight = None;
        }

        let kind = match &self.state {
            ViewState::Pending { token: active, kind } if *active == token => *kind,
            _ => {
                debug!(
                    "Dropping response for submission {}, state is now {}",
                    token,
                    self.state.name()
                );
                return vec![];
            }
        };

        match outcome {
            Ok(result) => {
                let view = ResultView::new(&result);
                info!(
                    "Submission {} classified as {} ({}, {})",
                    token,
                    view.label,
                    view.percent_label(),
                    view.band
                );
                self.state = ViewState::Result { result, view };
                vec![]
            }
            Err(e) => {
                error!("Submission {} failed: {}", token, e);
                let message = e.to_string();
                self.state = ViewState::Idle;
                if kind == SubmissionKind::File {
                    self.selected_file = None;
                }
                self.last_error = Some(message.clone());
                vec![Effect::Notify(Notice::error(message))]
            }
        }
    }

    fn reset(&mut self) -> Vec<Effect> {
        if let ViewState::Pending { token, .. } = &self.state {
            info!("Reset while submission {} outstanding, its response will be dropped", token);
        }
        self.state = ViewState::Idle;
        self.text.clear();
        self.selected_file = None;
        self.last_error = None;
        self.copy_feedback = CopyFeedback::Ready;
        vec![]
    }

    fn request_copy(&mut self) -> Vec<Effect> {
        match &self.state {
            ViewState::Result { result, .. } => {
                vec![Effect::Copy(result.suggested_response.clone())]
            }
            other => {
                debug!("Nothing to copy in {} state", other.name());
                vec![]
            }
        }
    }

    fn copy_finished(&mut self, copied: bool) -> Vec<Effect> {
        if !copied {
            return vec![Effect::Notify(Notice::error("Failed to copy text"))];
        }

        self.copy_generation += 1;
        self.copy_feedback = CopyFeedback::Copied;
        vec![Effect::ExpireCopyFeedback {
            generation: self.copy_generation,
            after: self.copy_feedback_delay,
        }]
    }

    fn record_health(&mut self, status: ServiceStatus) {
        let changed = self
            .service
            .as_ref()
            .is_none_or(|prev| prev.reachable != status.reachable || prev.ai_enabled != status.ai_enabled);
        if changed {
            info!("Service status: {}", status.status_text());
        } else {
            debug!("Service status unchanged: {}", status.status_text());
        }
        self.service = Some(status);
    }
}
