use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Job size used by the backend when the form does not carry a usable value.
pub const DEFAULT_MAX_COUNT: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlerType {
    #[default]
    Search,
    Detail,
    Creator,
}

impl CrawlerType {
    pub const ALL: [CrawlerType; 3] = [CrawlerType::Search, CrawlerType::Detail, CrawlerType::Creator];

    pub fn as_str(self) -> &'static str {
        match self {
            CrawlerType::Search => "search",
            CrawlerType::Detail => "detail",
            CrawlerType::Creator => "creator",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Raw form input as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub crawler_type: CrawlerType,
    pub keywords: String,
    pub video_urls: String,
    pub creator_urls: String,
    pub max_count: String,
    pub enable_media: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            crawler_type: CrawlerType::default(),
            keywords: String::new(),
            video_urls: String::new(),
            creator_urls: String::new(),
            max_count: DEFAULT_MAX_COUNT.to_string(),
            enable_media: false,
        }
    }
}

/// Job-submission payload for `POST /api/start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobConfig {
    pub crawler_type: CrawlerType,
    pub max_count: u32,
    pub enable_media: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_urls: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter search keywords")]
    MissingKeywords,
    #[error("Please enter at least one video URL")]
    MissingVideoUrls,
    #[error("Please enter at least one creator URL")]
    MissingCreatorUrls,
}

/// Validates the form and produces the payload for the selected crawler type.
///
/// Only the input field matching the crawler type is read; the others are
/// left out of the payload even if they hold text.
pub fn build(form: &FormState) -> Result<JobConfig, ValidationError> {
    let mut config = JobConfig {
        crawler_type: form.crawler_type,
        max_count: parse_max_count(&form.max_count),
        enable_media: form.enable_media,
        keywords: None,
        video_urls: None,
        creator_urls: None,
    };

    match form.crawler_type {
        CrawlerType::Search => {
            let keywords = form.keywords.trim();
            if keywords.is_empty() {
                return Err(ValidationError::MissingKeywords);
            }
            config.keywords = Some(keywords.to_owned());
        }
        CrawlerType::Detail => {
            let urls = split_lines(&form.video_urls);
            if urls.is_empty() {
                return Err(ValidationError::MissingVideoUrls);
            }
            config.video_urls = Some(urls);
        }
        CrawlerType::Creator => {
            let urls = split_lines(&form.creator_urls);
            if urls.is_empty() {
                return Err(ValidationError::MissingCreatorUrls);
            }
            config.creator_urls = Some(urls);
        }
    }

    Ok(config)
}

/// Splits a multi-line textbox into trimmed, non-empty lines in input order.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn parse_max_count(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(count) if count > 0 => count,
        _ => DEFAULT_MAX_COUNT,
    }
}
