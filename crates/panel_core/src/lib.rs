//! Crawl panel core: pure state machine, job configuration and view-model helpers.
mod config;
mod effect;
mod msg;
mod records;
mod router;
mod state;
mod update;
mod view_model;

pub use config::{
    build, split_lines, CrawlerType, FormState, JobConfig, ValidationError, DEFAULT_MAX_COUNT,
};
pub use effect::{Effect, Notice, NoticeLevel};
pub use msg::{CommandFailure, Msg};
pub use records::{CreatorRecord, ServerStatus, VideoRecord};
pub use router::{DataTab, FormSection, ViewRouter};
pub use state::{PanelState, PendingCommand, RunState};
pub use update::update;
pub use view_model::{
    escape_html, format_number, render_creator_rows, render_video_rows, truncate_identifier,
    ControlsView, PanelViewModel, StatusIndicator, CREATOR_COLUMNS, ID_DISPLAY_PREFIX,
    VIDEO_COLUMNS,
};
