//! Backends for the help widget's `getAISuggestion` query.

pub mod client;
pub mod graphql;
pub mod mock;
pub mod query;
pub mod retry;

pub use client::{SuggestionClient, encode_answer};
pub use graphql::{GET_AI_SUGGESTION, GraphQlClient, RESULT_PATH, decode_response};
pub use mock::{MockClient, MockResponse};
pub use query::SuggestionQuery;
pub use retry::RetryConfig;

pub use helpai_core::{Error, Result};
