use crate::CrawlerType;

/// Form group shown for the selected crawler type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormSection {
    #[default]
    Keywords,
    VideoUrls,
    CreatorUrls,
}

impl FormSection {
    pub const ALL: [FormSection; 3] = [
        FormSection::Keywords,
        FormSection::VideoUrls,
        FormSection::CreatorUrls,
    ];

    pub fn for_crawler(kind: CrawlerType) -> Self {
        match kind {
            CrawlerType::Search => FormSection::Keywords,
            CrawlerType::Detail => FormSection::VideoUrls,
            CrawlerType::Creator => FormSection::CreatorUrls,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataTab {
    #[default]
    Videos,
    Creators,
}

impl DataTab {
    pub const ALL: [DataTab; 2] = [DataTab::Videos, DataTab::Creators];

    pub fn as_str(self) -> &'static str {
        match self {
            DataTab::Videos => "videos",
            DataTab::Creators => "creators",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Presentation-only routing: which form group and which data tab are visible.
///
/// The two axes never influence each other and neither talks to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewRouter {
    section: FormSection,
    tab: DataTab,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_crawler(&mut self, kind: CrawlerType) -> bool {
        let section = FormSection::for_crawler(kind);
        let changed = self.section != section;
        self.section = section;
        changed
    }

    pub fn select_tab(&mut self, tab: DataTab) -> bool {
        let changed = self.tab != tab;
        self.tab = tab;
        changed
    }

    pub fn visible_section(&self) -> FormSection {
        self.section
    }

    pub fn active_tab(&self) -> DataTab {
        self.tab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_keywords_and_videos() {
        let router = ViewRouter::new();
        assert_eq!(router.visible_section(), FormSection::Keywords);
        assert_eq!(router.active_tab(), DataTab::Videos);
    }

    #[test]
    fn axes_move_independently() {
        let mut router = ViewRouter::new();
        assert!(router.select_tab(DataTab::Creators));
        assert_eq!(router.visible_section(), FormSection::Keywords);

        assert!(router.select_crawler(CrawlerType::Creator));
        assert_eq!(router.active_tab(), DataTab::Creators);
        assert!(!router.select_crawler(CrawlerType::Creator));

        assert_eq!(router.visible_section(), FormSection::CreatorUrls);
    }
}
