use panel_core::{DataTab, FormSection, PanelViewModel};

use super::constants::*;
use super::dom::DomCommand;

#[allow(clippy::vec_init_then_push)]
pub fn render(view: &PanelViewModel) -> Vec<DomCommand> {
    let mut cmds = Vec::new();

    cmds.push(DomCommand::SetClass {
        id: STATUS_INDICATOR,
        class: view.indicator.css_class().to_string(),
    });
    cmds.push(DomCommand::SetText {
        id: STATUS_TEXT,
        text: view.status_text.clone(),
    });
    cmds.push(DomCommand::SetHidden {
        id: STATUS_PROGRESS,
        hidden: view.progress_text.is_none(),
    });
    cmds.push(DomCommand::SetText {
        id: STATUS_PROGRESS,
        text: view.progress_text.clone().unwrap_or_default(),
    });

    cmds.push(DomCommand::SetEnabled {
        id: BUTTON_START,
        enabled: view.controls.start_enabled,
    });
    cmds.push(DomCommand::SetEnabled {
        id: BUTTON_STOP,
        enabled: view.controls.stop_enabled,
    });
    cmds.push(DomCommand::SetEnabled {
        id: BUTTON_CLEAR,
        enabled: view.controls.clear_enabled,
    });

    cmds.push(DomCommand::SetText {
        id: SELECT_CRAWLER_TYPE,
        text: view.crawler_type.as_str().to_string(),
    });
    for section in FormSection::ALL {
        cmds.push(DomCommand::SetHidden {
            id: section_element(section),
            hidden: section != view.visible_section,
        });
    }
    for tab in DataTab::ALL {
        let class = if tab == view.active_tab {
            "tab-content active"
        } else {
            "tab-content"
        };
        cmds.push(DomCommand::SetClass {
            id: tab_element(tab),
            class: class.to_string(),
        });
    }

    cmds.push(DomCommand::SetText {
        id: LABEL_VIDEO_COUNT,
        text: view.video_count.clone(),
    });
    cmds.push(DomCommand::SetText {
        id: LABEL_CREATOR_COUNT,
        text: view.creator_count.clone(),
    });
    cmds.push(DomCommand::SetInnerHtml {
        id: TBODY_VIDEOS,
        html: view.videos_html.clone(),
    });
    cmds.push(DomCommand::SetInnerHtml {
        id: TBODY_CREATORS,
        html: view.creators_html.clone(),
    });

    cmds
}

pub fn section_element(section: FormSection) -> ElementId {
    match section {
        FormSection::Keywords => GROUP_KEYWORDS,
        FormSection::VideoUrls => GROUP_VIDEO_URLS,
        FormSection::CreatorUrls => GROUP_CREATOR_URLS,
    }
}

pub fn tab_element(tab: DataTab) -> ElementId {
    match tab {
        DataTab::Videos => TAB_VIDEOS,
        DataTab::Creators => TAB_CREATORS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ui::layout::initial_document;
    use panel_core::{update, CrawlerType, Msg, PanelState, ServerStatus};

    #[test]
    fn initial_view_shows_search_form_and_placeholder_rows() {
        let mut document = initial_document();
        document.apply_all(render(&PanelState::new().view()));

        assert!(!document.element(GROUP_KEYWORDS).unwrap().hidden);
        assert!(document.element(GROUP_VIDEO_URLS).unwrap().hidden);
        assert!(document.element(GROUP_CREATOR_URLS).unwrap().hidden);
        assert!(document.element(BUTTON_START).unwrap().enabled);
        assert!(!document.element(BUTTON_STOP).unwrap().enabled);
        assert_eq!(
            document.element(TAB_VIDEOS).unwrap().class,
            "tab-content active"
        );
        assert!(document
            .element(TBODY_VIDEOS)
            .unwrap()
            .inner_html
            .contains("colspan=\"5\""));
        assert_eq!(document.element(STATUS_TEXT).unwrap().text, "Ready");
        assert_eq!(document.element(BUTTON_START).unwrap().text, "Start");
    }

    #[test]
    fn running_status_flips_buttons_and_indicator() {
        let mut document = initial_document();
        let state = PanelState::new();
        document.apply_all(render(&state.view()));

        let (state, _) = update(state, Msg::StatusReceived(ServerStatus::running("search")));
        let changed = document.apply_all(render(&state.view()));

        assert!(changed.contains(&BUTTON_START));
        assert!(changed.contains(&BUTTON_STOP));
        assert!(!changed.contains(&TBODY_VIDEOS));
        assert_eq!(
            document.element(STATUS_INDICATOR).unwrap().class,
            "status-running"
        );
        assert!(!document.element(BUTTON_START).unwrap().enabled);
        assert!(document.element(BUTTON_STOP).unwrap().enabled);
    }

    #[test]
    fn crawler_type_switch_moves_visible_group() {
        let (state, _) = update(
            PanelState::new(),
            Msg::CrawlerTypeSelected(CrawlerType::Creator),
        );
        let mut document = initial_document();
        document.apply_all(render(&state.view()));

        assert!(document.element(GROUP_KEYWORDS).unwrap().hidden);
        assert!(!document.element(GROUP_CREATOR_URLS).unwrap().hidden);
        assert_eq!(document.element(SELECT_CRAWLER_TYPE).unwrap().text, "creator");
    }
}
