use crate::{api::ClassifierClient, controller::Event, model::ServiceStatus};
use std::time::Duration;
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, info, warn};

pub const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Probe the service once. Any failure, network or status, counts as
/// unreachable.
pub async fn probe(client: &ClassifierClient) -> ServiceStatus {
    match client.check_health().await {
        Ok(health) => {
            debug!(
                "Health check ok: ai_enabled={}, version={:?}",
                health.ai_enabled, health.version
            );
            ServiceStatus::online(&health)
        }
        Err(e) => {
            warn!("Health check failed: {}", e);
            ServiceStatus::offline()
        }
    }
}

/// Background task that reports service availability as
/// [`Event::HealthTick`]s. The first probe runs immediately; ticks keep
/// coming regardless of any submission in flight.
pub struct HealthMonitor {
    handle: JoinHandle<()>,
}

impl HealthMonitor {
    pub fn spawn(
        client: ClassifierClient,
        period: Duration,
        events: UnboundedSender<Event>,
    ) -> Self {
        info!("Starting health monitor (every {:?})", period);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let status = probe(&client).await;
                if events.send(Event::HealthTick(status)).is_err() {
                    debug!("Event loop closed, stopping health monitor");
                    break;
                }
            }
        });

        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}
