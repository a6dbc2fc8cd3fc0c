//! Crawl panel client: HTTP boundary to the crawler backend and status polling.
mod api;
mod handle;
mod poller;
mod types;

pub use api::{PanelApi, ReqwestPanelApi};
pub use handle::{ClientEvents, ClientHandle};
pub use poller::{ChannelStatusSink, StatusPoller, StatusSink};
pub use types::{ApiError, ClientEvent, ClientSettings, StartAck, DEFAULT_BASE_URL};
