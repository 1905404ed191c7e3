use helpai_core::{FetchResult, SuggestionRequest};

/// Backend that answers help questions
///
/// Implementations report failures inside the returned [`FetchResult`]
/// rather than as a `Result`, since data and an error may arrive together.
#[async_trait::async_trait]
pub trait SuggestionClient: Send + Sync {
    async fn fetch(&self, request: &SuggestionRequest) -> FetchResult;
}

/// Build a payload in the double-encoded shape the widget expects
pub fn encode_answer(answer: &str) -> String {
    let body = serde_json::json!({ "Answer": answer }).to_string();
    serde_json::json!({ "body": body }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_answer_round_trips_through_widget_parser() {
        let payload = encode_answer("Reset the \"main\" breaker.");
        assert_eq!(helpai_core::parse_answer(&payload).unwrap(), "Reset the \"main\" breaker.");
    }
}
