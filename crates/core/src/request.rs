use crate::{FetchError, Variation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sent as `buildingId` when no building is selected
pub const BUILDING_ID_SENTINEL: &str = "NA";

/// Correlation id attached to every outgoing suggestion request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Variables for one `getAISuggestion` refetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub prompt: String,
    #[serde(rename = "type")]
    pub variation: Variation,
    #[serde(rename = "buildingId")]
    pub building_id: String,
}

impl SuggestionRequest {
    /// Build a request, substituting [`BUILDING_ID_SENTINEL`] for a missing or empty building
    pub fn new(prompt: impl Into<String>, variation: Variation, building_id: Option<String>) -> Self {
        Self {
            prompt: prompt.into(),
            variation,
            building_id: building_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| BUILDING_ID_SENTINEL.to_string()),
        }
    }

    pub fn has_building(&self) -> bool {
        self.building_id != BUILDING_ID_SENTINEL
    }
}

/// A request the widget wants dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub id: RequestId,
    pub request: SuggestionRequest,
    pub issued_at: DateTime<Utc>,
}

/// What the query capability reports for one fetch.
///
/// Mirrors a `{data, error}` pair: both may be present at once, in which case
/// data wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchResult {
    pub data: Option<String>,
    pub error: Option<FetchError>,
}

impl FetchResult {
    pub fn data(payload: impl Into<String>) -> Self {
        Self { data: Some(payload.into()), error: None }
    }

    pub fn error(error: FetchError) -> Self {
        Self { data: None, error: Some(error) }
    }

    pub fn with_error(mut self, error: FetchError) -> Self {
        self.error = Some(error);
        self
    }

    /// Data payload, treating an empty string as absent
    pub fn payload(&self) -> Option<&str> {
        self.data.as_deref().filter(|data| !data.is_empty())
    }
}

/// A finished fetch, tagged with the request it answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResolution {
    pub id: RequestId,
    pub result: FetchResult,
}
