use crate::client::SuggestionClient;
use crate::retry::{RetryConfig, is_retryable};
use helpai_core::{EndpointConfig, FetchError, FetchResult, SuggestionRequest};
use reqwest::Client as HttpClient;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// The `getAISuggestion` query document
pub const GET_AI_SUGGESTION: &str = r#"query getAISuggestion($prompt: String, $type: String, $buildingId: String) {
  getAISuggestion(prompt: $prompt, type: $type, buildingId: $buildingId)
}"#;

/// Where the payload lives in the GraphQL response
pub const RESULT_PATH: &str = "data.getAISuggestion";

/// Longest HTTP error body kept in a [`FetchError::Http`]
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Serialize)]
struct GraphQlBody<'a> {
    query: &'static str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
struct Variables<'a> {
    limit: u32,
    #[serde(flatten)]
    request: &'a SuggestionRequest,
}

/// `getAISuggestion` over HTTP
pub struct GraphQlClient {
    client: HttpClient,
    url: String,
    api_key: Option<String>,
    limit: u32,
    timeout: Duration,
    retry: RetryConfig,
}

impl GraphQlClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(),
            url: url.into(),
            api_key: None,
            limit: 1000,
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }

    /// Create from the `[endpoint]` section and the widget's `limit`
    pub fn from_config(endpoint: &EndpointConfig, limit: u32) -> Self {
        Self::new(endpoint.url.clone())
            .with_api_key(endpoint.api_key.clone())
            .with_limit(limit)
            .with_timeout(Duration::from_millis(endpoint.timeout_ms))
            .with_retry(RetryConfig::from_endpoint(endpoint))
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// JSON body sent for a request
    pub fn request_body(&self, request: &SuggestionRequest) -> Value {
        let body = GraphQlBody { query: GET_AI_SUGGESTION, variables: Variables { limit: self.limit, request } };
        serde_json::to_value(&body).unwrap_or(Value::Null)
    }

    async fn fetch_once(&self, request: &SuggestionRequest) -> FetchResult {
        let mut builder = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&self.request_body(request));

        if let Some(ref api_key) = self.api_key {
            builder = builder.header("x-api-key", api_key);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return FetchResult::error(FetchError::Timeout(self.timeout.as_millis() as u64));
            }
            Err(e) => return FetchResult::error(FetchError::Transport(e.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = text.chars().take(MAX_ERROR_BODY).collect();
            return FetchResult::error(FetchError::Http { status: status.as_u16(), message });
        }

        match response.json::<Value>().await {
            Ok(value) => decode_response(&value),
            Err(e) if e.is_timeout() => FetchResult::error(FetchError::Timeout(self.timeout.as_millis() as u64)),
            Err(e) => FetchResult::error(FetchError::Decode(e.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl SuggestionClient for GraphQlClient {
    async fn fetch(&self, request: &SuggestionRequest) -> FetchResult {
        let mut attempt = 0;
        loop {
            tokio::time::sleep(self.retry.delay_for_attempt(attempt)).await;
            let result = self.fetch_once(request).await;
            attempt += 1;

            if !is_retryable(&result) || !self.retry.should_retry(attempt) {
                return result;
            }

            tracing::debug!(
                attempt,
                max_attempts = self.retry.max_attempts,
                error = ?result.error,
                "retrying suggestion query"
            );
        }
    }
}

/// Split a GraphQL response into the `{data, error}` pair
pub fn decode_response(value: &Value) -> FetchResult {
    let data = value_at_path(value, RESULT_PATH).and_then(|payload| match payload {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    });

    let messages: Vec<String> = value
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|error| match error.get("message").and_then(Value::as_str) {
                    Some(message) => message.to_string(),
                    None => error.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    let error = if messages.is_empty() { None } else { Some(FetchError::GraphQl(messages)) };

    FetchResult { data, error }
}

/// Follow a dot-separated path of object keys
pub fn value_at_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpai_core::Variation;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let client = GraphQlClient::new("http://localhost/graphql");
        let request = SuggestionRequest::new("How do I log in?", Variation::Generic, None);

        let body = client.request_body(&request);
        assert_eq!(body["query"], GET_AI_SUGGESTION);
        assert_eq!(
            body["variables"],
            json!({"limit": 1000, "prompt": "How do I log in?", "type": "generic", "buildingId": "NA"})
        );
    }

    #[test]
    fn test_from_config() {
        let endpoint = EndpointConfig {
            url: "https://api.example.com/graphql".to_string(),
            api_key: Some("key".to_string()),
            timeout_ms: 1500,
            retry_count: 2,
            retry_delay_ms: 10,
        };
        let client = GraphQlClient::from_config(&endpoint, 50);

        assert_eq!(client.url(), "https://api.example.com/graphql");
        assert_eq!(client.api_key.as_deref(), Some("key"));
        assert_eq!(client.limit, 50);
        assert_eq!(client.timeout, Duration::from_millis(1500));
        assert_eq!(client.retry.max_attempts, 2);
    }

    #[test]
    fn test_decode_string_payload() {
        let value = json!({"data": {"getAISuggestion": "{\"body\":\"{}\"}"}});
        let result = decode_response(&value);
        assert_eq!(result.data.as_deref(), Some("{\"body\":\"{}\"}"));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_decode_object_payload_is_reserialized() {
        let value = json!({"data": {"getAISuggestion": {"body": "{\"Answer\":\"7\"}"}}});
        let result = decode_response(&value);
        let payload = result.payload().unwrap();
        assert_eq!(helpai_core::parse_answer(payload).unwrap(), "7");
    }

    #[test]
    fn test_decode_errors_only() {
        let value = json!({"data": null, "errors": [{"message": "Unauthorized"}, {"path": ["x"]}]});
        let result = decode_response(&value);
        assert!(result.data.is_none());
        match result.error {
            Some(FetchError::GraphQl(messages)) => {
                assert_eq!(messages.len(), 2);
                assert_eq!(messages[0], "Unauthorized");
                assert!(messages[1].contains("path"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_decode_data_and_errors() {
        let value = json!({
            "data": {"getAISuggestion": "payload"},
            "errors": [{"message": "partial failure"}]
        });
        let result = decode_response(&value);
        assert_eq!(result.payload(), Some("payload"));
        assert_eq!(result.error, Some(FetchError::GraphQl(vec!["partial failure".to_string()])));
    }

    #[test]
    fn test_decode_null_field() {
        let result = decode_response(&json!({"data": {"getAISuggestion": null}}));
        assert_eq!(result, FetchResult::default());
    }

    #[test]
    fn test_value_at_path() {
        let value = json!({"a": {"b": {"c": 1}}});
        assert_eq!(value_at_path(&value, "a.b.c"), Some(&json!(1)));
        assert_eq!(value_at_path(&value, "a.x"), None);
    }
}
