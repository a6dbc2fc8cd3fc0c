//! Line-oriented front end: parses typed commands into messages and formats
//! what the panel shows.

use chrono::{DateTime, Local};
use panel_core::{
    format_number, truncate_identifier, CrawlerType, CreatorRecord, DataTab, FormState, Msg,
    Notice, NoticeLevel, PanelViewModel, VideoRecord, ID_DISPLAY_PREFIX,
};

use super::ui::constants::ElementId;
use super::ui::dom::DomDocument;

pub const HELP: &str = "\
Commands:
  type <search|detail|creator>   choose the crawler type
  keywords <text>                set search keywords
  video-url <url>                add a video URL
  video-urls-clear               remove all video URLs
  creator-url <url>              add a creator URL
  creator-urls-clear             remove all creator URLs
  max <n>                        set the maximum item count
  media <on|off>                 toggle media download
  tab <videos|creators>          switch the data tab
  start | stop | clear           job controls
  refresh                        reload videos, creators and count
  show <videos|creators|form>    print loaded data or the form
  status                         print the status bar
  help                           this text
  quit                           exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTarget {
    Videos,
    Creators,
    Form,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Dispatch(Msg),
    Show(ShowTarget),
    Status,
    Help,
    Quit,
}

/// Parses one input line. URL commands append to the form's current text,
/// so the message carries the whole textbox content.
pub fn parse_line(line: &str, form: &FormState) -> Result<ConsoleCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let msg = match verb.to_ascii_lowercase().as_str() {
        "" => return Err("Type 'help' for a list of commands".to_string()),
        "help" | "?" => return Ok(ConsoleCommand::Help),
        "quit" | "exit" => return Ok(ConsoleCommand::Quit),
        "status" => return Ok(ConsoleCommand::Status),
        "show" => {
            let target = match rest.to_ascii_lowercase().as_str() {
                "videos" => ShowTarget::Videos,
                "creators" => ShowTarget::Creators,
                "form" => ShowTarget::Form,
                _ => return Err("Usage: show <videos|creators|form>".to_string()),
            };
            return Ok(ConsoleCommand::Show(target));
        }
        "type" => match CrawlerType::parse(rest) {
            Some(kind) => Msg::CrawlerTypeSelected(kind),
            None => return Err("Usage: type <search|detail|creator>".to_string()),
        },
        "keywords" => Msg::KeywordsChanged(rest.to_string()),
        "video-url" => Msg::VideoUrlsChanged(append_line(&form.video_urls, rest)?),
        "video-urls-clear" => Msg::VideoUrlsChanged(String::new()),
        "creator-url" => Msg::CreatorUrlsChanged(append_line(&form.creator_urls, rest)?),
        "creator-urls-clear" => Msg::CreatorUrlsChanged(String::new()),
        "max" => Msg::MaxCountChanged(rest.to_string()),
        "media" => match rest.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" => Msg::EnableMediaToggled(true),
            "off" | "no" | "false" => Msg::EnableMediaToggled(false),
            _ => return Err("Usage: media <on|off>".to_string()),
        },
        "tab" => match DataTab::parse(rest) {
            Some(tab) => Msg::TabSelected(tab),
            None => return Err("Usage: tab <videos|creators>".to_string()),
        },
        "start" => Msg::StartClicked,
        "stop" => Msg::StopClicked,
        "clear" => Msg::ClearClicked,
        "refresh" => Msg::RefreshRequested,
        other => return Err(format!("Unknown command '{other}'. Type 'help'.")),
    };
    Ok(ConsoleCommand::Dispatch(msg))
}

fn append_line(existing: &str, url: &str) -> Result<String, String> {
    if url.is_empty() {
        return Err("A URL is required".to_string());
    }
    if existing.trim().is_empty() {
        Ok(url.to_string())
    } else {
        Ok(format!("{}\n{}", existing.trim_end(), url))
    }
}

/// Only an explicit yes confirms.
pub fn parse_confirmation(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn format_notice(notice: &Notice, at: DateTime<Local>) -> String {
    let tag = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Error => "error",
    };
    format!("[{}] {}: {}", at.format("%H:%M:%S"), tag, notice.text)
}

pub fn format_status(view: &PanelViewModel) -> String {
    let mut line = format!("[{}] {}", view.indicator.css_class(), view.status_text);
    if let Some(progress) = &view.progress_text {
        line.push_str(&format!(" ({progress})"));
    }
    let controls = &view.controls;
    line.push_str(&format!(
        " | start:{} stop:{} clear:{} | videos:{} creators:{}",
        on_off(controls.start_enabled),
        on_off(controls.stop_enabled),
        on_off(controls.clear_enabled),
        view.video_count,
        view.creator_count
    ));
    line
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// One line per changed element, skipping table bodies.
pub fn format_changes(document: &DomDocument, changed: &[ElementId]) -> Vec<String> {
    changed
        .iter()
        .copied()
        .filter(|id| !id.ends_with("-tbody"))
        .filter_map(|id| document.element(id).map(|element| (id, element)))
        .map(|(id, element)| {
            let mut line = format!("  {id}");
            if !element.text.is_empty() {
                line.push_str(&format!(" = {:?}", element.text));
            }
            if !element.class.is_empty() {
                line.push_str(&format!(" class={}", element.class));
            }
            if !element.enabled {
                line.push_str(" disabled");
            }
            if element.hidden {
                line.push_str(" hidden");
            }
            line
        })
        .collect()
}

pub fn format_videos(videos: &[VideoRecord]) -> Vec<String> {
    if videos.is_empty() {
        return vec!["No data".to_string()];
    }
    videos
        .iter()
        .map(|video| {
            format!(
                "{} | {} | {} likes | {} | {}",
                text_or(video.title.as_deref(), "Untitled"),
                text_or(video.author_name.as_deref(), "-"),
                format_number(video.like_count),
                text_or(video.keyword.as_deref(), "-"),
                text_or(video.video_url.as_deref(), "-"),
            )
        })
        .collect()
}

pub fn format_creators(creators: &[CreatorRecord]) -> Vec<String> {
    if creators.is_empty() {
        return vec!["No data".to_string()];
    }
    creators
        .iter()
        .map(|creator| {
            format!(
                "{} | {} followers | {} videos | {}",
                text_or(creator.nickname.as_deref(), "-"),
                format_number(creator.follower_count),
                format_number(creator.aweme_count),
                truncate_identifier(&creator.sec_user_id, ID_DISPLAY_PREFIX),
            )
        })
        .collect()
}

fn text_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|text| !text.trim().is_empty()).unwrap_or(fallback)
}

pub fn format_form(form: &FormState) -> Vec<String> {
    let mut lines = vec![
        format!("type: {}", form.crawler_type.as_str()),
        format!("keywords: {}", form.keywords),
    ];
    lines.push("video urls:".to_string());
    lines.extend(form.video_urls.lines().map(|url| format!("  {url}")));
    lines.push("creator urls:".to_string());
    lines.extend(form.creator_urls.lines().map(|url| format!("  {url}")));
    lines.push(format!("max: {}", form.max_count));
    lines.push(format!("media: {}", on_off(form.enable_media)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn dispatch(line: &str, form: &FormState) -> Msg {
        match parse_line(line, form) {
            Ok(ConsoleCommand::Dispatch(msg)) => msg,
            other => panic!("expected a message for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn form_commands_map_to_edit_messages() {
        let form = FormState::default();
        assert_eq!(
            dispatch("type Creator", &form),
            Msg::CrawlerTypeSelected(CrawlerType::Creator)
        );
        assert_eq!(
            dispatch("keywords  rust async ", &form),
            Msg::KeywordsChanged("rust async".to_string())
        );
        assert_eq!(dispatch("max 40", &form), Msg::MaxCountChanged("40".to_string()));
        assert_eq!(dispatch("media on", &form), Msg::EnableMediaToggled(true));
        assert_eq!(dispatch("tab creators", &form), Msg::TabSelected(DataTab::Creators));
        assert_eq!(dispatch("START", &form), Msg::StartClicked);
        assert_eq!(dispatch("refresh", &form), Msg::RefreshRequested);
    }

    #[test]
    fn url_commands_append_to_existing_lines() {
        let mut form = FormState::default();
        assert_eq!(
            dispatch("video-url https://v.example/1", &form),
            Msg::VideoUrlsChanged("https://v.example/1".to_string())
        );

        form.video_urls = "https://v.example/1\n".to_string();
        assert_eq!(
            dispatch("video-url https://v.example/2", &form),
            Msg::VideoUrlsChanged("https://v.example/1\nhttps://v.example/2".to_string())
        );
        assert_eq!(dispatch("video-urls-clear", &form), Msg::VideoUrlsChanged(String::new()));
        assert!(parse_line("creator-url", &form).is_err());
    }

    #[test]
    fn host_commands_and_errors() {
        let form = FormState::default();
        assert_eq!(parse_line("exit", &form), Ok(ConsoleCommand::Quit));
        assert_eq!(
            parse_line("show form", &form),
            Ok(ConsoleCommand::Show(ShowTarget::Form))
        );
        assert!(parse_line("type shopping", &form).is_err());
        assert!(parse_line("show everything", &form).is_err());
        assert!(parse_line("launch", &form).is_err());
        assert!(parse_line("   ", &form).is_err());
    }

    #[test]
    fn confirmation_requires_yes() {
        assert!(parse_confirmation("y"));
        assert!(parse_confirmation(" YES "));
        assert!(!parse_confirmation(""));
        assert!(!parse_confirmation("nope"));
    }

    #[test]
    fn notices_are_timestamped() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 3, 7).unwrap();
        assert_eq!(
            format_notice(&Notice::error("Please enter search keywords"), at),
            "[09:03:07] error: Please enter search keywords"
        );
    }

    #[test]
    fn creator_lines_truncate_long_ids() {
        let creator = CreatorRecord {
            nickname: Some("cook".to_string()),
            follower_count: 123_456,
            aweme_count: 12,
            sec_user_id: "MS4wLjABAAAAabcdefghijklmnop".to_string(),
            ..CreatorRecord::default()
        };
        assert_eq!(
            format_creators(&[creator]),
            vec!["cook | 12.3w followers | 12 videos | MS4wLjABAAAAabcdefgh...".to_string()]
        );
        assert_eq!(format_videos(&[]), vec!["No data".to_string()]);
    }
}
