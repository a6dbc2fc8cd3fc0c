use crate::JobConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitStart(JobConfig),
    SubmitStop,
    /// Ask the user before deleting stored results.
    ConfirmClear,
    SubmitClear,
    /// Each refresh carries the generation its response must echo back.
    RefreshVideos { generation: u64 },
    RefreshCreators { generation: u64 },
    RefreshCount { generation: u64 },
    Notify(Notice),
}

impl Effect {
    /// The three independent data fetches that make up a full refresh.
    pub fn full_refresh(generation: u64) -> [Effect; 3] {
        [
            Effect::RefreshVideos { generation },
            Effect::RefreshCreators { generation },
            Effect::RefreshCount { generation },
        ]
    }
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
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}
