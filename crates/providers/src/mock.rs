use crate::client::{SuggestionClient, encode_answer};
use helpai_core::{Error, FetchError, FetchResult, Result, SuggestionRequest};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted outcome for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MockResponse {
    /// Well-formed payload carrying `text` as the answer
    Answer { text: String },
    /// Payload sent verbatim
    Payload { raw: String },
    /// Transport failure
    Error { message: String },
    /// Answer plus a GraphQL error in the same result
    Partial { text: String, message: String },
    /// Neither data nor error
    Empty,
}

impl MockResponse {
    fn into_result(self) -> FetchResult {
        match self {
            MockResponse::Answer { text } => FetchResult::data(encode_answer(&text)),
            MockResponse::Payload { raw } => FetchResult::data(raw),
            MockResponse::Error { message } => FetchResult::error(FetchError::Transport(message)),
            MockResponse::Partial { text, message } => {
                FetchResult::data(encode_answer(&text)).with_error(FetchError::GraphQl(vec![message]))
            }
            MockResponse::Empty => FetchResult::default(),
        }
    }
}

/// Mock configuration from TOML file
#[derive(Debug, Deserialize)]
struct MockConfig {
    #[serde(default)]
    delay_ms: u64,
    responses: Vec<MockResponse>,
}

/// Deterministic client for tests and offline demos.
///
/// Responses are served in order; once exhausted the last one repeats.
pub struct MockClient {
    responses: Vec<MockResponse>,
    current: AtomicUsize,
    delay: Duration,
    requests: Arc<Mutex<Vec<SuggestionRequest>>>,
}

impl MockClient {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self { responses, current: AtomicUsize::new(0), delay: Duration::ZERO, requests: Arc::default() }
    }

    /// Load a script such as:
    ///
    /// ```toml
    /// delay_ms = 300
    ///
    /// [[responses]]
    /// type = "answer"
    /// text = "Open the Alarms tab."
    /// ```
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: MockConfig =
            toml::from_str(toml_str).map_err(|e| Error::Parse(format!("invalid mock responses: {}", e)))?;
        if config.responses.is_empty() {
            return Err(Error::Validation("mock responses file has no [[responses]]".to_string()));
        }
        Ok(Self::new(config.responses).with_delay(Duration::from_millis(config.delay_ms)))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Handle onto every request seen so far
    pub fn requests(&self) -> Arc<Mutex<Vec<SuggestionRequest>>> {
        Arc::clone(&self.requests)
    }

    fn next_response(&self) -> MockResponse {
        let index = self.current.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(index).or_else(|| self.responses.last()) {
            Some(response) => response.clone(),
            None => MockResponse::Empty,
        }
    }
}

#[async_trait::async_trait]
impl SuggestionClient for MockClient {
    async fn fetch(&self, request: &SuggestionRequest) -> FetchResult {
        match self.requests.lock() {
            Ok(mut requests) => requests.push(request.clone()),
            Err(poisoned) => poisoned.into_inner().push(request.clone()),
        }

        let response = self.next_response();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        response.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpai_core::{Variation, parse_answer};

    fn request() -> SuggestionRequest {
        SuggestionRequest::new("q", Variation::Generic, None)
    }

    #[test]
    fn test_mock_response_parsing() {
        let toml = r#"
delay_ms = 25

[[responses]]
type = "answer"
text = "Hello"

[[responses]]
type = "error"
message = "boom"

[[responses]]
type = "partial"
text = "Half"
message = "warning"

[[responses]]
type = "payload"
raw = "not json"

[[responses]]
type = "empty"
"#;

        let client = MockClient::from_toml_str(toml).unwrap();
        assert_eq!(client.responses.len(), 5);
        assert_eq!(client.delay, Duration::from_millis(25));
        assert!(matches!(client.responses[0], MockResponse::Answer { .. }));
        assert!(matches!(client.responses[4], MockResponse::Empty));
    }

    #[test]
    fn test_mock_rejects_empty_script() {
        assert!(MockClient::from_toml_str("responses = []").is_err());
        assert!(MockClient::from_toml_str("nonsense").is_err());
    }

    #[test]
    fn test_mock_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mock.toml");
        std::fs::write(&path, "[[responses]]\ntype = \"answer\"\ntext = \"From file\"\n").unwrap();

        let client = MockClient::from_file(&path).unwrap();
        assert_eq!(client.responses, vec![MockResponse::Answer { text: "From file".to_string() }]);
    }

    #[tokio::test]
    async fn test_mock_serves_in_order_then_repeats_last() {
        let client = MockClient::new(vec![
            MockResponse::Answer { text: "one".to_string() },
            MockResponse::Error { message: "down".to_string() },
        ]);

        let first = client.fetch(&request()).await;
        assert_eq!(parse_answer(first.payload().unwrap()).unwrap(), "one");

        let second = client.fetch(&request()).await;
        assert_eq!(second.error, Some(FetchError::Transport("down".to_string())));

        let third = client.fetch(&request()).await;
        assert_eq!(third, second);
    }

    #[tokio::test]
    async fn test_mock_partial_has_both() {
        let client = MockClient::new(vec![MockResponse::Partial {
            text: "ok".to_string(),
            message: "warn".to_string(),
        }]);
        let result = client.fetch(&request()).await;
        assert!(result.payload().is_some());
        assert!(result.error.is_some());
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let client = MockClient::new(vec![MockResponse::Empty]);
        let requests = client.requests();

        client.fetch(&SuggestionRequest::new("first", Variation::Insight, Some("b".to_string()))).await;
        client.fetch(&request()).await;

        let seen = requests.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].prompt, "first");
        assert_eq!(seen[0].building_id, "b");
    }

    #[tokio::test]
    async fn test_mock_without_responses_is_empty() {
        let client = MockClient::new(Vec::new());
        assert_eq!(client.fetch(&request()).await, FetchResult::default());
    }
}
