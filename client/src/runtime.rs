use crate::{
    api::ClassifierClient,
    clipboard::{self, ClipboardWriter},
    controller::{COPY_FEEDBACK_DELAY, Controller, Effect, Event, Notice, Snapshot, Submission},
    health::{self, HEALTH_CHECK_INTERVAL, HealthMonitor},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// Draws controller state. Implemented by each front end.
pub trait Frontend {
    fn draw(&mut self, snapshot: &Snapshot);
    fn notify(&mut self, notice: &Notice);
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub health_interval: Duration,
    pub copy_feedback: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            health_interval: HEALTH_CHECK_INTERVAL,
            copy_feedback: COPY_FEEDBACK_DELAY,
        }
    }
}

/// Event loop that owns the [`Controller`], feeds it events and performs
/// the effects it returns. Network calls, clipboard writes and timers run
/// as spawned tasks that report back through the event channel.
pub struct Runtime<F: Frontend> {
    controller: Controller,
    client: ClassifierClient,
    clipboard: Arc<dyn ClipboardWriter>,
    config: RuntimeConfig,
    frontend: F,
    events_tx: UnboundedSender<Event>,
    events_rx: UnboundedReceiver<Event>,
}

impl<F: Frontend> Runtime<F> {
    pub fn new(
        client: ClassifierClient,
        clipboard: Arc<dyn ClipboardWriter>,
        config: RuntimeConfig,
        frontend: F,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            controller: Controller::new(config.copy_feedback),
            client,
            clipboard,
            config,
            frontend,
            events_tx,
            events_rx,
        }
    }

    /// Handle for input sources to push events into the loop.
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.events_tx.clone()
    }

    /// Run until [`Event::Quit`] is received. Returns the final state.
    pub async fn run(mut self) -> Snapshot {
        let monitor = HealthMonitor::spawn(
            self.client.clone(),
            self.config.health_interval,
            self.events_tx.clone(),
        );

        self.frontend.draw(&self.controller.snapshot());

        while let Some(event) = self.events_rx.recv().await {
            let mut exit = false;
            for effect in self.controller.dispatch(event) {
                match effect {
                    Effect::Exit => exit = true,
                    other => self.perform(other),
                }
            }

            self.frontend.draw(&self.controller.snapshot());
            if exit {
                break;
            }
        }

        info!("Event loop finished");
        monitor.stop();
        self.controller.snapshot()
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::Classify { token, submission } => {
                let client = self.client.clone();
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let outcome = match &submission {
                        Submission::Text(content) => client.submit_text(content).await,
                        Submission::File(file) => client.submit_file(file).await,
                    };
                    if events
                        .send(Event::ClassificationFinished { token, outcome })
                        .is_err()
                    {
                        debug!("Event loop closed before submission {} finished", token);
                    }
                });
            }
            Effect::Copy(text) => {
                let writer = self.clipboard.clone();
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let copied = clipboard::copy(writer, text).await;
                    let _ = events.send(Event::CopyFinished(copied));
                });
            }
            Effect::ExpireCopyFeedback { generation, after } => {
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = events.send(Event::CopyFeedbackExpired(generation));
                });
            }
            Effect::ProbeHealth => {
                let client = self.client.clone();
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let status = health::probe(&client).await;
                    let _ = events.send(Event::HealthTick(status));
                });
            }
            Effect::Notify(notice) => self.frontend.notify(&notice),
            Effect::Exit => {}
        }
    }
}
