use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use panel_core::JobConfig;
use panel_logging::{panel_debug, panel_error, panel_info};

use crate::poller::{ChannelStatusSink, StatusPoller};
use crate::{ClientEvent, PanelApi};

enum ClientCommand {
    Request(Request),
    StartPolling(Duration),
    StopPolling,
}

/// One-shot requests, each answered by exactly one `ClientEvent`.
enum Request {
    Start(JobConfig),
    Stop,
    Clear,
    Videos(u64),
    Creators(u64),
    Count(u64),
}

/// Sends commands to the client runtime thread.
///
/// Every request runs as its own task on a dedicated tokio runtime, so data
/// refreshes and commands proceed concurrently; the status poller is the
/// only recurring task and is started and stopped explicitly.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

/// Receiving half for results coming back from the client runtime.
pub struct ClientEvents {
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientEvents {
    /// Blocks until the next event; `None` once the runtime thread is gone.
    pub fn recv(&self) -> Option<ClientEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ClientEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl ClientHandle {
    pub fn new(api: Arc<dyn PanelApi>) -> (Self, ClientEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run_runtime(api, cmd_rx, event_tx));

        (Self { cmd_tx }, ClientEvents { event_rx })
    }

    pub fn start_job(&self, config: JobConfig) {
        self.send(ClientCommand::Request(Request::Start(config)));
    }

    pub fn stop_job(&self) {
        self.send(ClientCommand::Request(Request::Stop));
    }

    pub fn clear_results(&self) {
        self.send(ClientCommand::Request(Request::Clear));
    }

    /// Data fetches echo `generation` in their event so stale answers can be told apart.
    pub fn refresh_videos(&self, generation: u64) {
        self.send(ClientCommand::Request(Request::Videos(generation)));
    }

    pub fn refresh_creators(&self, generation: u64) {
        self.send(ClientCommand::Request(Request::Creators(generation)));
    }

    pub fn refresh_count(&self, generation: u64) {
        self.send(ClientCommand::Request(Request::Count(generation)));
    }

    /// Starts status polling; ignored if a poller is already running.
    pub fn start_polling(&self, period: Duration) {
        self.send(ClientCommand::StartPolling(period));
    }

    pub fn stop_polling(&self) {
        self.send(ClientCommand::StopPolling);
    }

    fn send(&self, command: ClientCommand) {
        if self.cmd_tx.send(command).is_err() {
            panel_error!("Client runtime is gone; command dropped");
        }
    }
}

fn run_runtime(
    api: Arc<dyn PanelApi>,
    cmd_rx: mpsc::Receiver<ClientCommand>,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            panel_error!("Failed to build client runtime: {}", err);
            return;
        }
    };

    let mut poller: Option<StatusPoller> = None;
    while let Ok(command) = cmd_rx.recv() {
        match command {
            ClientCommand::StartPolling(period) => {
                if poller.as_ref().is_some_and(StatusPoller::is_running) {
                    panel_debug!("Status poller already running");
                    continue;
                }
                let _guard = runtime.enter();
                let sink = Arc::new(ChannelStatusSink::new(event_tx.clone()));
                poller = Some(StatusPoller::start(api.clone(), period, sink));
            }
            ClientCommand::StopPolling => {
                if let Some(active) = poller.take() {
                    runtime.block_on(active.stop());
                }
            }
            ClientCommand::Request(request) => {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_request(api.as_ref(), request).await;
                    let _ = event_tx.send(event);
                });
            }
        }
    }

    if let Some(active) = poller.take() {
        runtime.block_on(active.stop());
    }
    panel_info!("Client runtime shut down");
}

async fn handle_request(api: &dyn PanelApi, request: Request) -> ClientEvent {
    match request {
        Request::Start(config) => ClientEvent::StartCompleted(api.start_job(&config).await),
        Request::Stop => ClientEvent::StopCompleted(api.stop_job().await),
        Request::Clear => ClientEvent::ClearCompleted(api.clear_results().await),
        Request::Videos(generation) => ClientEvent::VideosLoaded {
            generation,
            result: api.list_videos().await,
        },
        Request::Creators(generation) => ClientEvent::CreatorsLoaded {
            generation,
            result: api.list_creators().await,
        },
        Request::Count(generation) => ClientEvent::CountLoaded {
            generation,
            result: api.video_count().await,
        },
    }
}
