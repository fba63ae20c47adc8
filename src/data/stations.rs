//! Station backend API client
//!
//! Fetches the station list, or a backend-filtered subset of it, and parses
//! the JSON body into [`Station`] records.

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use super::Station;

/// Backend base URL used when none is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Errors that can occur when fetching stations
#[derive(Debug, Error)]
pub enum StationsError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned status {0}")]
    Status(StatusCode),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Base URL cannot carry path segments
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Which endpoint a fetch targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// The full station collection
    All,
    /// Stations matching a non-blank query
    Search(String),
}

impl FetchRequest {
    /// Builds a request from raw search input; blank input means the full list
    pub fn from_query(query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            FetchRequest::All
        } else {
            FetchRequest::Search(query.to_string())
        }
    }

    /// Message shown to the user when this request fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            FetchRequest::All => "Failed to fetch stations data",
            FetchRequest::Search(_) => "Failed to search stations",
        }
    }
}

/// Client for the station backend
#[derive(Debug, Clone)]
pub struct StationsClient {
    http_client: Client,
    base_url: Url,
}

impl StationsClient {
    /// Create a client for the backend rooted at `base_url` (e.g. `http://host/api`)
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client with a custom HTTP client
    pub fn with_client(http_client: Client, base_url: Url) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StationsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StationsError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of the full station collection
    pub fn stations_url(&self) -> Result<Url, StationsError> {
        self.endpoint(&["stations"])
    }

    /// URL of the search endpoint for a query
    pub fn search_url(&self, query: &str) -> Result<Url, StationsError> {
        self.endpoint(&["stations", "search", query])
    }

    /// Fetch every station
    pub async fn fetch_all(&self) -> Result<Vec<Station>, StationsError> {
        let url = self.stations_url()?;
        self.get_stations(url).await
    }

    /// Fetch stations matching `query`
    ///
    /// A blank query is the same as [`fetch_all`](Self::fetch_all).
    pub async fn search(&self, query: &str) -> Result<Vec<Station>, StationsError> {
        let query = query.trim();
        if query.is_empty() {
            return self.fetch_all().await;
        }
        let url = self.search_url(query)?;
        self.get_stations(url).await
    }

    /// Run a [`FetchRequest`] against the matching endpoint
    pub async fn fetch(&self, request: &FetchRequest) -> Result<Vec<Station>, StationsError> {
        match request {
            FetchRequest::All => self.fetch_all().await,
            FetchRequest::Search(query) => self.search(query).await,
        }
    }

    async fn get_stations(&self, url: Url) -> Result<Vec<Station>, StationsError> {
        tracing::debug!(%url, "requesting stations");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StationsError::Status(status));
        }

        let text = response.text().await?;
        let stations: Vec<Station> = serde_json::from_str(&text)?;

        tracing::info!(count = stations.len(), "stations received");
        Ok(stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> StationsClient {
        let base = Url::parse(&format!("{}/api", server.uri())).unwrap();
        StationsClient::new(base)
    }

    fn default_client() -> StationsClient {
        StationsClient::new(Url::parse(DEFAULT_API_URL).unwrap())
    }

    fn sample_body() -> serde_json::Value {
        json!([
            {
                "name": "Station A",
                "ebike": 3,
                "mechanical": 2,
                "is_installed": true,
                "is_renting": true,
                "capacity": 10
            },
            {
                "name": "Station B",
                "is_installed": true,
                "is_renting": false
            }
        ])
    }

    #[test]
    fn test_default_points_at_local_backend() {
        let client = default_client();
        assert_eq!(client.base_url().as_str(), DEFAULT_API_URL);
        assert_eq!(
            client.stations_url().unwrap().as_str(),
            "http://localhost:5000/api/stations"
        );
    }

    #[test]
    fn test_trailing_slash_in_base_is_ignored() {
        let client = StationsClient::new(Url::parse("http://example.com/api/").unwrap());
        assert_eq!(
            client.stations_url().unwrap().as_str(),
            "http://example.com/api/stations"
        );
    }

    #[test]
    fn test_search_url_escapes_query_segment() {
        let client = default_client();
        assert_eq!(
            client.search_url("Gare de Lyon").unwrap().as_str(),
            "http://localhost:5000/api/stations/search/Gare%20de%20Lyon"
        );
        assert_eq!(
            client.search_url("a/b?c#d").unwrap().as_str(),
            "http://localhost:5000/api/stations/search/a%2Fb%3Fc%23d"
        );
        assert_eq!(
            client.search_url("Opéra").unwrap().as_str(),
            "http://localhost:5000/api/stations/search/Op%C3%A9ra"
        );
    }

    #[test]
    fn test_base_that_cannot_hold_paths_is_rejected() {
        let client = StationsClient::new(Url::parse("mailto:someone@example.com").unwrap());
        assert!(matches!(
            client.stations_url(),
            Err(StationsError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_fetch_request_from_query() {
        assert_eq!(FetchRequest::from_query(""), FetchRequest::All);
        assert_eq!(FetchRequest::from_query("   \t"), FetchRequest::All);
        assert_eq!(
            FetchRequest::from_query("  bastille "),
            FetchRequest::Search("bastille".to_string())
        );
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            FetchRequest::All.failure_message(),
            "Failed to fetch stations data"
        );
        assert_eq!(
            FetchRequest::Search("x".into()).failure_message(),
            "Failed to search stations"
        );
    }

    #[tokio::test]
    async fn test_fetch_all_parses_stations() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let stations = client_for(&server).fetch_all().await.unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name, "Station A");
        assert_eq!(stations[0].ebike_count(), 3);
        assert!(stations[0].is_active());
        assert!(!stations[1].is_active());
    }

    #[tokio::test]
    async fn test_search_hits_search_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stations/search/bastille"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "name": "Bastille" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let stations = client_for(&server).search("bastille").await.unwrap();

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "Bastille");
    }

    #[tokio::test]
    async fn test_blank_search_uses_collection_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let stations = client_for(&server).search("   ").await.unwrap();
        assert_eq!(stations.len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stations"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_all().await;
        assert!(matches!(result, Err(StationsError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_error_object_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stations"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "error": "Failed to fetch data" })),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_all().await;
        assert!(matches!(result, Err(StationsError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_server_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stations"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_all().await;
        match result {
            Err(StationsError::Status(status)) => assert_eq!(status.as_u16(), 500),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_request_error() {
        // Nothing listens on port 1.
        let client = StationsClient::new(Url::parse("http://127.0.0.1:1/api").unwrap());

        let result = client.fetch(&FetchRequest::All).await;
        assert!(matches!(result, Err(StationsError::RequestFailed(_))));
    }
}
