//! Decoding of the `getAISuggestion` payload.
//!
//! The payload is JSON text whose `body` field is itself JSON text:
//!
//! ```text
//! {"statusCode": 200, "body": "{\"Answer\": \"Reset the breaker first.\"}"}
//! ```

use crate::ResponseError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Envelope {
    body: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct AnswerBody {
    #[serde(rename = "Answer")]
    answer: Option<serde_json::Value>,
}

/// Extract the answer text from a double-encoded payload
pub fn parse_answer(payload: &str) -> Result<String, ResponseError> {
    let envelope: Envelope = serde_json::from_str(payload).map_err(|e| ResponseError::not_json(e.to_string()))?;

    let body = match envelope.body {
        Some(serde_json::Value::String(body)) => body,
        _ => return Err(ResponseError::MissingBody),
    };

    let inner: AnswerBody = serde_json::from_str(&body).map_err(|e| ResponseError::body_not_json(e.to_string()))?;

    match inner.answer {
        Some(serde_json::Value::String(answer)) => Ok(answer),
        _ => Err(ResponseError::MissingAnswer),
    }
}
