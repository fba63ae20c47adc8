//! Background station fetches
//!
//! Every fetch runs as its own tokio task and reports back to the UI loop over
//! a channel. Nothing is cancelled: when fetches overlap, the message applied
//! last decides what the table shows.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::data::{FetchRequest, Station, StationsClient};
use crate::loading::{LoadingGuard, LoadingIndicator};

/// Capacity of the channel carrying finished fetches
pub const FETCH_CHANNEL_CAPACITY: usize = 32;

/// Result of a single fetch
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The backend answered with a station list
    Loaded(Vec<Station>),
    /// The request or the JSON parse failed
    Failed(String),
}

/// A finished fetch on its way to the UI loop
///
/// Holds the loading guard, so the indicator stays visible until the message
/// has been applied and dropped.
#[derive(Debug)]
pub struct FetchMessage {
    pub request: FetchRequest,
    pub outcome: FetchOutcome,
    pub loading: LoadingGuard,
}

/// Creates the channel fetch tasks report on
pub fn channel() -> (mpsc::Sender<FetchMessage>, mpsc::Receiver<FetchMessage>) {
    mpsc::channel(FETCH_CHANNEL_CAPACITY)
}

/// Spawns a fetch task
///
/// The loading indicator is shown before the task starts.
pub fn spawn_fetch(
    client: StationsClient,
    request: FetchRequest,
    loading: &LoadingIndicator,
    tx: mpsc::Sender<FetchMessage>,
) -> JoinHandle<()> {
    let guard = loading.acquire();

    tokio::spawn(async move {
        let outcome = match client.fetch(&request).await {
            Ok(stations) => FetchOutcome::Loaded(stations),
            Err(e) => FetchOutcome::Failed(e.to_string()),
        };

        let message = FetchMessage {
            request,
            outcome,
            loading: guard,
        };
        if tx.send(message).await.is_err() {
            tracing::debug!("UI loop gone, dropping fetch result");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> StationsClient {
        StationsClient::new(Url::parse(&format!("{}/api", server.uri())).unwrap())
    }

    #[tokio::test]
    async fn test_indicator_visible_until_message_dropped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "name": "A" }])))
            .mount(&server)
            .await;

        let loading = LoadingIndicator::new();
        let (tx, mut rx) = channel();

        let handle = spawn_fetch(client_for(&server), FetchRequest::All, &loading, tx);
        assert!(loading.is_visible(), "indicator shown before the request");

        handle.await.unwrap();
        let message = rx.recv().await.unwrap();
        assert!(loading.is_visible(), "indicator held by the pending message");
        assert!(matches!(message.outcome, FetchOutcome::Loaded(ref s) if s.len() == 1));

        drop(message);
        assert!(!loading.is_visible());
    }

    #[tokio::test]
    async fn test_failure_carries_error_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stations/search/nowhere"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let loading = LoadingIndicator::new();
        let (tx, mut rx) = channel();
        spawn_fetch(
            client_for(&server),
            FetchRequest::Search("nowhere".into()),
            &loading,
            tx,
        );

        let message = rx.recv().await.unwrap();
        assert_eq!(message.request, FetchRequest::Search("nowhere".into()));
        match &message.outcome {
            FetchOutcome::Failed(error) => assert!(error.contains("parse")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_closed_receiver_still_releases_indicator() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let loading = LoadingIndicator::new();
        let (tx, rx) = channel();
        drop(rx);

        spawn_fetch(client_for(&server), FetchRequest::All, &loading, tx)
            .await
            .unwrap();

        assert!(!loading.is_visible());
    }
}
