use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use panel_core::ServerStatus;
use panel_logging::{panel_debug, panel_trace};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{ApiError, ClientEvent, PanelApi};

const MIN_PERIOD: Duration = Duration::from_millis(10);

/// Receives the outcome of every poll tick.
pub trait StatusSink: Send + Sync {
    fn deliver(&self, status: Result<ServerStatus, ApiError>);
}

pub struct ChannelStatusSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelStatusSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl StatusSink for ChannelStatusSink {
    fn deliver(&self, status: Result<ServerStatus, ApiError>) {
        let _ = self.tx.send(ClientEvent::Status(status));
    }
}

/// Fixed-interval status polling with at most one request in flight.
///
/// Each tick waits for its fetch to resolve before the next tick is taken;
/// ticks that fall due during a slow fetch are skipped, not queued.
pub struct StatusPoller {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl StatusPoller {
    /// Spawns the polling loop on the current tokio runtime. The first tick
    /// fires immediately.
    pub fn start(api: Arc<dyn PanelApi>, period: Duration, sink: Arc<dyn StatusSink>) -> Self {
        // `tokio::time::interval` panics on a zero period.
        let period = period.max(MIN_PERIOD);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(api, period, sink, cancel.clone()));
        panel_debug!("Status poller started, period={:?}", period);
        Self { cancel, task }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Cancels the loop, abandoning a fetch in flight, and waits for it to exit.
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.task.await;
        panel_debug!("Status poller stopped");
    }
}

async fn run(
    api: Arc<dyn PanelApi>,
    period: Duration,
    sink: Arc<dyn StatusSink>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut ticks: u64 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }
        ticks += 1;
        panel_trace!("Poll tick {}", ticks);

        let result = tokio::select! {
            _ = cancel.cancelled() => break,
            result = api.status() => result,
        };
        sink.deliver(result);
    }
}
