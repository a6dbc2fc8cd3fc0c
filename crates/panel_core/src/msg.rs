use crate::{CrawlerType, CreatorRecord, DataTab, ServerStatus, VideoRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a crawler type in the mode selector.
    CrawlerTypeSelected(CrawlerType),
    /// User edited the keywords input.
    KeywordsChanged(String),
    /// User edited the video URL textbox (one URL per line).
    VideoUrlsChanged(String),
    /// User edited the creator URL textbox (one URL per line).
    CreatorUrlsChanged(String),
    /// User edited the max count input.
    MaxCountChanged(String),
    EnableMediaToggled(bool),
    TabSelected(DataTab),
    StartClicked,
    StopClicked,
    ClearClicked,
    /// Answer to the clear confirmation prompt.
    ClearConfirmed(bool),
    StartFinished(Result<(), CommandFailure>),
    StopFinished(Result<(), CommandFailure>),
    ClearFinished(Result<(), CommandFailure>),
    /// A poll tick fetched the server status.
    StatusReceived(ServerStatus),
    /// A poll tick failed; the next tick retries.
    StatusUnavailable,
    /// Host asked for a full data refresh (startup, or the user).
    RefreshRequested,
    /// Loaded rows, tagged with the generation of the refresh that asked for them.
    VideosLoaded {
        generation: u64,
        videos: Vec<VideoRecord>,
    },
    CreatorsLoaded {
        generation: u64,
        creators: Vec<CreatorRecord>,
    },
    CountLoaded {
        generation: u64,
        count: u64,
    },
}

/// Why a start, stop or clear command did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandFailure {
    /// The server answered with a non-2xx status, optionally explaining why.
    Rejected { detail: Option<String> },
    /// No usable response reached us.
    Transport { message: String },
}
