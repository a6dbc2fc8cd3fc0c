use std::time::Duration;

use panel_core::{CreatorRecord, ServerStatus, VideoRecord};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// `limit` query parameter for the video and creator listings.
    pub list_limit: u32,
}

impl ClientSettings {
    pub fn new(mut base_url: Url) -> Self {
        // `Url::join` drops the last path segment unless it ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            list_limit: 100,
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("default base url is valid");
        Self::new(base_url)
    }
}

/// Acknowledgment body of `POST /api/start`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StartAck {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("server rejected the request (status {status})")]
    Rejected { status: u16, detail: Option<String> },
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("unreadable response: {0}")]
    Decode(String),
}

/// Results delivered back from the client runtime, one per command or poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    StartCompleted(Result<StartAck, ApiError>),
    StopCompleted(Result<(), ApiError>),
    ClearCompleted(Result<(), ApiError>),
    VideosLoaded {
        generation: u64,
        result: Result<Vec<VideoRecord>, ApiError>,
    },
    CreatorsLoaded {
        generation: u64,
        result: Result<Vec<CreatorRecord>, ApiError>,
    },
    CountLoaded {
        generation: u64,
        result: Result<u64, ApiError>,
    },
    Status(Result<ServerStatus, ApiError>),
}
