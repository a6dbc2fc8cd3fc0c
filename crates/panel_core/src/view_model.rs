use crate::{CrawlerType, CreatorRecord, DataTab, FormSection, VideoRecord};

/// Column count of the videos table.
pub const VIDEO_COLUMNS: usize = 5;
/// Column count of the creators table.
pub const CREATOR_COLUMNS: usize = 4;
/// Characters of an opaque identifier shown before the ellipsis.
pub const ID_DISPLAY_PREFIX: usize = 20;

const NUMBER_UNIT_THRESHOLD: u64 = 10_000;
const NUMBER_UNIT_SUFFIX: &str = "w";
const PLACEHOLDER: &str = "-";
const UNTITLED: &str = "Untitled";
const NO_DATA: &str = "No data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusIndicator {
    #[default]
    Idle,
    Running,
    Stopping,
}

impl StatusIndicator {
    /// CSS class for the status indicator element.
    pub fn css_class(self) -> &'static str {
        match self {
            StatusIndicator::Idle => "status-idle",
            StatusIndicator::Running => "status-running",
            StatusIndicator::Stopping => "status-stopping",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlsView {
    pub start_enabled: bool,
    pub stop_enabled: bool,
    pub clear_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelViewModel {
    pub indicator: StatusIndicator,
    pub status_text: String,
    pub progress_text: Option<String>,
    pub controls: ControlsView,
    pub crawler_type: CrawlerType,
    pub visible_section: FormSection,
    pub active_tab: DataTab,
    pub video_count: String,
    pub creator_count: String,
    pub videos_html: String,
    pub creators_html: String,
    pub dirty: bool,
}

/// Formats a count for display: plain below 10,000, otherwise in units of
/// 10,000 with one decimal, rounded half up (`25500` -> `2.6w`).
pub fn format_number(value: u64) -> String {
    if value < NUMBER_UNIT_THRESHOLD {
        return value.to_string();
    }
    let tenths = (u128::from(value) * 10 + u128::from(NUMBER_UNIT_THRESHOLD) / 2)
        / u128::from(NUMBER_UNIT_THRESHOLD);
    format!("{}.{}{}", tenths / 10, tenths % 10, NUMBER_UNIT_SUFFIX)
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Shortens an identifier for display. The record itself is never touched.
pub fn truncate_identifier(id: &str, prefix_chars: usize) -> String {
    match id.char_indices().nth(prefix_chars) {
        Some((cut, _)) => format!("{}...", &id[..cut]),
        None => id.to_string(),
    }
}

pub fn render_video_rows(videos: &[VideoRecord]) -> String {
    if videos.is_empty() {
        return placeholder_row(VIDEO_COLUMNS);
    }
    videos.iter().map(render_video_row).collect()
}

pub fn render_creator_rows(creators: &[CreatorRecord]) -> String {
    if creators.is_empty() {
        return placeholder_row(CREATOR_COLUMNS);
    }
    creators.iter().map(render_creator_row).collect()
}

fn render_video_row(video: &VideoRecord) -> String {
    let link = match non_blank(video.video_url.as_deref()) {
        Some(url) => format!(
            "<a class=\"btn-link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">View</a>",
            escape_html(url)
        ),
        None => PLACEHOLDER.to_string(),
    };
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        text_or(video.title.as_deref(), UNTITLED),
        text_or(video.author_name.as_deref(), PLACEHOLDER),
        format_number(video.like_count),
        text_or(video.keyword.as_deref(), PLACEHOLDER),
        link
    )
}

fn render_creator_row(creator: &CreatorRecord) -> String {
    let id = escape_html(&creator.sec_user_id);
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td><code title=\"{id}\" data-sec-user-id=\"{id}\">{}</code></td></tr>",
        text_or(creator.nickname.as_deref(), PLACEHOLDER),
        format_number(creator.follower_count),
        format_number(creator.aweme_count),
        escape_html(&truncate_identifier(&creator.sec_user_id, ID_DISPLAY_PREFIX)),
    )
}

fn placeholder_row(columns: usize) -> String {
    format!("<tr><td colspan=\"{columns}\" class=\"no-data\">{NO_DATA}</td></tr>")
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    non_blank(value).map_or_else(|| fallback.to_string(), escape_html)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
