use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use panel_client::{ApiError, ClientEvent, ClientEvents, ClientHandle, PanelApi, StartAck};
use panel_core::{CommandFailure, Effect, Msg};
use panel_logging::{panel_debug, panel_info, panel_warn};

use super::app::Inbound;

/// Executes core effects against the crawler backend.
pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn PanelApi>, inbound_tx: mpsc::Sender<Inbound>) -> Self {
        let (client, events) = ClientHandle::new(api);
        spawn_event_forwarder(events, inbound_tx);
        Self { client }
    }

    pub fn start_polling(&self, period: Duration) {
        panel_info!("Polling server status every {:?}", period);
        self.client.start_polling(period);
    }

    pub fn stop_polling(&self) {
        self.client.stop_polling();
    }

    /// Dispatches network effects. Notices and the clear prompt belong to
    /// the host and are handled before effects get here.
    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitStart(config) => {
                    panel_info!("Submitting start, crawler_type={}", config.crawler_type.as_str());
                    self.client.start_job(config);
                }
                Effect::SubmitStop => {
                    panel_info!("Submitting stop");
                    self.client.stop_job();
                }
                Effect::SubmitClear => {
                    panel_info!("Submitting clear");
                    self.client.clear_results();
                }
                Effect::RefreshVideos { generation } => self.client.refresh_videos(generation),
                Effect::RefreshCreators { generation } => {
                    self.client.refresh_creators(generation)
                }
                Effect::RefreshCount { generation } => self.client.refresh_count(generation),
                Effect::ConfirmClear | Effect::Notify(_) => {
                    panel_warn!("Host effect reached the network runner: {:?}", effect);
                }
            }
        }
    }
}

fn spawn_event_forwarder(events: ClientEvents, inbound_tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            let Some(msg) = map_event(event) else {
                continue;
            };
            if inbound_tx.send(Inbound::Msg(msg)).is_err() {
                break;
            }
        }
        panel_debug!("Client event forwarder exiting");
    });
}

/// Translates a client result into a core message. Failed data loads keep
/// the cached data, so they produce no message.
pub fn map_event(event: ClientEvent) -> Option<Msg> {
    match event {
        ClientEvent::StartCompleted(result) => {
            if let Ok(StartAck {
                message: Some(message),
            }) = &result
            {
                panel_info!("Start acknowledged: {}", message);
            }
            Some(Msg::StartFinished(result.map(drop).map_err(command_failure)))
        }
        ClientEvent::StopCompleted(result) => {
            Some(Msg::StopFinished(result.map_err(command_failure)))
        }
        ClientEvent::ClearCompleted(result) => {
            Some(Msg::ClearFinished(result.map_err(command_failure)))
        }
        ClientEvent::Status(Ok(status)) => Some(Msg::StatusReceived(status)),
        ClientEvent::Status(Err(err)) => {
            panel_warn!("Status poll failed: {}", err);
            Some(Msg::StatusUnavailable)
        }
        ClientEvent::VideosLoaded { generation, result } => {
            loaded(result, "videos").map(|videos| Msg::VideosLoaded { generation, videos })
        }
        ClientEvent::CreatorsLoaded { generation, result } => loaded(result, "creators")
            .map(|creators| Msg::CreatorsLoaded {
                generation,
                creators,
            }),
        ClientEvent::CountLoaded { generation, result } => {
            loaded(result, "video count").map(|count| Msg::CountLoaded { generation, count })
        }
    }
}

fn loaded<T>(result: Result<T, ApiError>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            panel_warn!("Failed to load {}: {}", what, err);
            None
        }
    }
}

fn command_failure(err: ApiError) -> CommandFailure {
    match err {
        ApiError::Rejected { detail, .. } => CommandFailure::Rejected { detail },
        other => CommandFailure::Transport {
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::{ServerStatus, VideoRecord};
    use pretty_assertions::assert_eq;

    #[test]
    fn rejection_keeps_server_detail() {
        let msg = map_event(ClientEvent::StartCompleted(Err(ApiError::Rejected {
            status: 400,
            detail: Some("Crawler is already running".to_string()),
        })));
        assert_eq!(
            msg,
            Some(Msg::StartFinished(Err(CommandFailure::Rejected {
                detail: Some("Crawler is already running".to_string())
            })))
        );
    }

    #[test]
    fn transport_errors_carry_their_message() {
        let msg = map_event(ClientEvent::StopCompleted(Err(ApiError::Timeout(
            "deadline".to_string(),
        ))));
        assert_eq!(
            msg,
            Some(Msg::StopFinished(Err(CommandFailure::Transport {
                message: "request timed out: deadline".to_string()
            })))
        );
    }

    #[test]
    fn start_ack_body_is_not_needed_by_core() {
        let ack = StartAck {
            message: Some("started".to_string()),
        };
        assert_eq!(
            map_event(ClientEvent::StartCompleted(Ok(ack))),
            Some(Msg::StartFinished(Ok(())))
        );
    }

    #[test]
    fn poll_results_map_to_status_messages() {
        assert_eq!(
            map_event(ClientEvent::Status(Ok(ServerStatus::idle()))),
            Some(Msg::StatusReceived(ServerStatus::idle()))
        );
        assert_eq!(
            map_event(ClientEvent::Status(Err(ApiError::Transport(
                "refused".to_string()
            )))),
            Some(Msg::StatusUnavailable)
        );
    }

    #[test]
    fn failed_data_loads_are_dropped() {
        assert_eq!(
            map_event(ClientEvent::VideosLoaded {
                generation: 1,
                result: Err(ApiError::Decode("bad".to_string())),
            }),
            None
        );
        assert_eq!(
            map_event(ClientEvent::CountLoaded {
                generation: 2,
                result: Ok(7),
            }),
            Some(Msg::CountLoaded {
                generation: 2,
                count: 7
            })
        );
        assert_eq!(
            map_event(ClientEvent::VideosLoaded {
                generation: 2,
                result: Ok(vec![VideoRecord::default()]),
            }),
            Some(Msg::VideosLoaded {
                generation: 2,
                videos: vec![VideoRecord::default()]
            })
        );
    }
}
