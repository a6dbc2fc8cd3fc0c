use panel_core::{CreatorRecord, JobConfig, ServerStatus, VideoRecord};
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::{ApiError, ClientSettings, StartAck};

/// The crawler backend's HTTP surface.
#[async_trait::async_trait]
pub trait PanelApi: Send + Sync {
    async fn start_job(&self, config: &JobConfig) -> Result<StartAck, ApiError>;
    async fn stop_job(&self) -> Result<(), ApiError>;
    async fn clear_results(&self) -> Result<(), ApiError>;
    async fn list_videos(&self) -> Result<Vec<VideoRecord>, ApiError>;
    async fn list_creators(&self) -> Result<Vec<CreatorRecord>, ApiError>;
    async fn video_count(&self) -> Result<u64, ApiError>;
    async fn status(&self) -> Result<ServerStatus, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPanelApi {
    settings: ClientSettings,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct CountBody {
    count: u64,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ReqwestPanelApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.settings
            .base_url
            .join(path)
            .map_err(|err| ApiError::Transport(format!("invalid endpoint {path}: {err}")))
    }

    fn listing(&self, path: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut()
            .append_pair("limit", &self.settings.list_limit.to_string());
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        // The body is best effort; a rejection stays a rejection without it.
        let body = response.bytes().await.unwrap_or_default();
        Err(ApiError::Rejected {
            status: status.as_u16(),
            detail: rejection_detail(&body),
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.send(self.client.get(url)).await?;
        read_json(response).await
    }
}

#[async_trait::async_trait]
impl PanelApi for ReqwestPanelApi {
    async fn start_job(&self, config: &JobConfig) -> Result<StartAck, ApiError> {
        let body = serde_json::to_vec(config).map_err(|err| ApiError::Decode(err.to_string()))?;
        let request = self
            .client
            .post(self.endpoint("api/start")?)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(StartAck::default());
        }
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn stop_job(&self) -> Result<(), ApiError> {
        self.send(self.client.post(self.endpoint("api/stop")?))
            .await
            .map(drop)
    }

    async fn clear_results(&self) -> Result<(), ApiError> {
        self.send(self.client.delete(self.endpoint("api/videos/clear")?))
            .await
            .map(drop)
    }

    async fn list_videos(&self) -> Result<Vec<VideoRecord>, ApiError> {
        self.fetch_json(self.listing("api/videos")?).await
    }

    async fn list_creators(&self) -> Result<Vec<CreatorRecord>, ApiError> {
        self.fetch_json(self.listing("api/creators")?).await
    }

    async fn video_count(&self) -> Result<u64, ApiError> {
        let body: CountBody = self.fetch_json(self.endpoint("api/videos/count")?).await?;
        Ok(body.count)
    }

    async fn status(&self) -> Result<ServerStatus, ApiError> {
        self.fetch_json(self.endpoint("api/status")?).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Extracts the human-readable `detail` of an error body. Validation errors
/// carry a structured detail, which is passed on as compact JSON.
fn rejection_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout(err.to_string());
    }
    if err.is_decode() {
        return ApiError::Decode(err.to_string());
    }
    ApiError::Transport(err.to_string())
}
