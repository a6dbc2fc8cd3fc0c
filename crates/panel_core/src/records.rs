use serde::{Deserialize, Serialize};

/// One stored video as listed by `GET /api/videos`.
///
/// Text fields are optional because the backend sends `null` or empty strings
/// for columns the crawler could not fill.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VideoRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub aweme_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub create_time: Option<i64>,
}

/// One stored creator as listed by `GET /api/creators`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreatorRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default)]
    pub aweme_count: u64,
    #[serde(default)]
    pub sec_user_id: String,
}

/// Body of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServerStatus {
    pub running: bool,
    #[serde(default)]
    pub current_task: Option<String>,
    #[serde(default)]
    pub progress: u64,
    #[serde(default)]
    pub total: u64,
}

impl ServerStatus {
    pub fn running(task: impl Into<String>) -> Self {
        Self {
            running: true,
            current_task: Some(task.into()),
            ..Self::default()
        }
    }

    pub fn idle() -> Self {
        Self::default()
    }
}
