mod common;

use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::FakeApi;
use panel_client::{ApiError, StatusPoller, StatusSink};
use panel_core::ServerStatus;

#[derive(Default)]
struct RecordingSink {
    delivered: Mutex<Vec<Result<ServerStatus, ApiError>>>,
}

impl RecordingSink {
    fn count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

impl StatusSink for RecordingSink {
    fn deliver(&self, status: Result<ServerStatus, ApiError>) {
        self.delivered.lock().unwrap().push(status);
    }
}

#[tokio::test]
async fn polls_repeatedly_until_stopped() {
    let api = Arc::new(FakeApi::default());
    let sink = Arc::new(RecordingSink::default());

    let poller = StatusPoller::start(api.clone(), Duration::from_millis(20), sink.clone());
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(poller.is_running());
    poller.stop().await;

    let delivered = sink.count();
    assert!(delivered >= 3, "only {delivered} polls delivered");
    assert!(sink
        .delivered
        .lock()
        .unwrap()
        .iter()
        .all(|status| status == &Ok(ServerStatus::idle())));

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(sink.count(), delivered);
}

#[tokio::test]
async fn slow_fetches_never_overlap() {
    let api = Arc::new(FakeApi::with_status_delay(Duration::from_millis(70)));
    let sink = Arc::new(RecordingSink::default());

    let poller = StatusPoller::start(api.clone(), Duration::from_millis(10), sink.clone());
    tokio::time::sleep(Duration::from_millis(300)).await;
    poller.stop().await;

    assert!(api.status_calls() >= 2);
    assert_eq!(api.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn stop_abandons_fetch_in_flight() {
    let api = Arc::new(FakeApi::with_status_delay(Duration::from_secs(5)));
    let sink = Arc::new(RecordingSink::default());

    let poller = StatusPoller::start(api.clone(), Duration::from_millis(10), sink.clone());
    tokio::time::sleep(Duration::from_millis(50)).await;

    tokio::time::timeout(Duration::from_secs(1), poller.stop())
        .await
        .expect("stop returns promptly");
    assert_eq!(api.status_calls(), 1);
    assert_eq!(sink.count(), 0);
}
