#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use panel_client::{ApiError, PanelApi, StartAck};
use panel_core::{CreatorRecord, JobConfig, ServerStatus, VideoRecord};

/// In-process stand-in for the backend that records how it was called.
#[derive(Default)]
pub struct FakeApi {
    pub status_delay: Duration,
    pub status_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub running: Mutex<bool>,
    pub started: Mutex<Vec<JobConfig>>,
    pub reject_start: Option<String>,
}

impl FakeApi {
    pub fn with_status_delay(delay: Duration) -> Self {
        Self {
            status_delay: delay,
            ..Self::default()
        }
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PanelApi for FakeApi {
    async fn start_job(&self, config: &JobConfig) -> Result<StartAck, ApiError> {
        if let Some(detail) = &self.reject_start {
            return Err(ApiError::Rejected {
                status: 400,
                detail: Some(detail.clone()),
            });
        }
        self.started.lock().unwrap().push(config.clone());
        *self.running.lock().unwrap() = true;
        Ok(StartAck::default())
    }

    async fn stop_job(&self) -> Result<(), ApiError> {
        *self.running.lock().unwrap() = false;
        Ok(())
    }

    async fn clear_results(&self) -> Result<(), ApiError> {
        Err(ApiError::Transport("connection reset".to_string()))
    }

    async fn list_videos(&self) -> Result<Vec<VideoRecord>, ApiError> {
        Ok(vec![VideoRecord::default()])
    }

    async fn list_creators(&self) -> Result<Vec<CreatorRecord>, ApiError> {
        Ok(Vec::new())
    }

    async fn video_count(&self) -> Result<u64, ApiError> {
        Ok(1)
    }

    async fn status(&self) -> Result<ServerStatus, ApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.status_delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if *self.running.lock().unwrap() {
            Ok(ServerStatus::running("search"))
        } else {
            Ok(ServerStatus::idle())
        }
    }
}
