pub type ElementId = &'static str;

pub const SELECT_CRAWLER_TYPE: ElementId = "crawler-type";
pub const GROUP_KEYWORDS: ElementId = "keywords-group";
pub const GROUP_VIDEO_URLS: ElementId = "video-urls-group";
pub const GROUP_CREATOR_URLS: ElementId = "creator-urls-group";
pub const BUTTON_START: ElementId = "start-btn";
pub const BUTTON_STOP: ElementId = "stop-btn";
pub const BUTTON_CLEAR: ElementId = "clear-btn";
pub const STATUS_INDICATOR: ElementId = "status-indicator";
pub const STATUS_TEXT: ElementId = "status-text";
pub const STATUS_PROGRESS: ElementId = "status-progress";
pub const LABEL_VIDEO_COUNT: ElementId = "video-count";
pub const LABEL_CREATOR_COUNT: ElementId = "creator-count";
pub const TBODY_VIDEOS: ElementId = "videos-tbody";
pub const TBODY_CREATORS: ElementId = "creators-tbody";
pub const TAB_VIDEOS: ElementId = "videos-tab";
pub const TAB_CREATORS: ElementId = "creators-tab";

pub const ALL_ELEMENTS: [ElementId; 16] = [
    SELECT_CRAWLER_TYPE,
    GROUP_KEYWORDS,
    GROUP_VIDEO_URLS,
    GROUP_CREATOR_URLS,
    BUTTON_START,
    BUTTON_STOP,
    BUTTON_CLEAR,
    STATUS_INDICATOR,
    STATUS_TEXT,
    STATUS_PROGRESS,
    LABEL_VIDEO_COUNT,
    LABEL_CREATOR_COUNT,
    TBODY_VIDEOS,
    TBODY_CREATORS,
    TAB_VIDEOS,
    TAB_CREATORS,
];
