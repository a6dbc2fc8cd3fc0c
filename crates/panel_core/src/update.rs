use crate::{build, CommandFailure, Effect, Msg, Notice, PanelState};

const START_FALLBACK: &str = "Failed to start crawler";
const STOP_FALLBACK: &str = "Failed to stop crawler";
const CLEAR_FALLBACK: &str = "Failed to clear data";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    let effects = match msg {
        Msg::CrawlerTypeSelected(kind) => {
            state.form_mut().crawler_type = kind;
            state.router_mut().select_crawler(kind);
            Vec::new()
        }
        Msg::KeywordsChanged(text) => {
            state.form_mut().keywords = text;
            Vec::new()
        }
        Msg::VideoUrlsChanged(text) => {
            state.form_mut().video_urls = text;
            Vec::new()
        }
        Msg::CreatorUrlsChanged(text) => {
            state.form_mut().creator_urls = text;
            Vec::new()
        }
        Msg::MaxCountChanged(text) => {
            state.form_mut().max_count = text;
            Vec::new()
        }
        Msg::EnableMediaToggled(enabled) => {
            state.form_mut().enable_media = enabled;
            Vec::new()
        }
        Msg::TabSelected(tab) => {
            if state.router_mut().select_tab(tab) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::StartClicked => {
            if !state.controls().start_enabled {
                return (state, Vec::new());
            }
            match build(state.form()) {
                Ok(config) => {
                    state.begin_start(config.crawler_type);
                    vec![Effect::SubmitStart(config)]
                }
                Err(err) => vec![Effect::Notify(Notice::error(err.to_string()))],
            }
        }
        Msg::StartFinished(result) => {
            let Some(kind) = state.finish_start(result.is_ok()) else {
                return (state, Vec::new());
            };
            match result {
                Ok(()) => vec![Effect::Notify(Notice::info(format!(
                    "Crawler started (mode: {})",
                    kind.as_str()
                )))],
                Err(failure) => vec![Effect::Notify(failure_notice(failure, START_FALLBACK))],
            }
        }
        Msg::StopClicked => {
            if state.pending().is_some() {
                return (state, Vec::new());
            }
            state.begin_stop();
            vec![Effect::SubmitStop]
        }
        Msg::StopFinished(result) => {
            if !state.finish_stop(result.is_ok()) {
                return (state, Vec::new());
            }
            match result {
                Ok(()) => Vec::new(),
                Err(failure) => vec![Effect::Notify(failure_notice(failure, STOP_FALLBACK))],
            }
        }
        Msg::ClearClicked => {
            if state.clear_busy() {
                return (state, Vec::new());
            }
            state.set_confirming_clear(true);
            vec![Effect::ConfirmClear]
        }
        Msg::ClearConfirmed(confirmed) => {
            if !state.is_confirming_clear() {
                return (state, Vec::new());
            }
            state.set_confirming_clear(false);
            if confirmed {
                state.set_clear_in_flight(true);
                vec![Effect::SubmitClear]
            } else {
                Vec::new()
            }
        }
        Msg::ClearFinished(result) => {
            if !state.is_clear_in_flight() {
                return (state, Vec::new());
            }
            state.set_clear_in_flight(false);
            match result {
                Ok(()) => {
                    let mut effects = state.full_refresh();
                    effects.push(Effect::Notify(Notice::info("All data cleared")));
                    effects
                }
                Err(failure) => vec![Effect::Notify(failure_notice(failure, CLEAR_FALLBACK))],
            }
        }
        Msg::StatusReceived(status) => {
            if state.reconcile(&status) {
                state.full_refresh()
            } else {
                Vec::new()
            }
        }
        Msg::RefreshRequested => state.full_refresh(),
        Msg::VideosLoaded { generation, videos } => {
            state.replace_videos(generation, videos);
            Vec::new()
        }
        Msg::CreatorsLoaded {
            generation,
            creators,
        } => {
            state.replace_creators(generation, creators);
            Vec::new()
        }
        Msg::CountLoaded { generation, count } => {
            state.set_video_count(generation, count);
            Vec::new()
        }
        Msg::StatusUnavailable => Vec::new(),
    };

    (state, effects)
}

/// Rejections show the server's explanation verbatim when it sent one.
fn failure_notice(failure: CommandFailure, fallback: &str) -> Notice {
    match failure {
        CommandFailure::Rejected { detail: Some(detail) } if !detail.trim().is_empty() => {
            Notice::error(detail)
        }
        CommandFailure::Rejected { .. } => Notice::error(fallback),
        CommandFailure::Transport { message } => Notice::error(format!("{fallback}: {message}")),
    }
}
