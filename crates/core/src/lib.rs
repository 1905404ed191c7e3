pub mod building;
pub mod config;
pub mod envelope;
pub mod error;
pub mod input;
pub mod logging;
pub mod request;
pub mod transcript;
pub mod variation;
pub mod widget;

pub use building::{BuildingIdSource, SharedBuildingId, StaticBuildingId};
pub use config::{Config, EndpointConfig, Theme, WidgetConfig};
pub use envelope::parse_answer;
pub use error::{Error, FetchError, ResponseError, Result};
pub use input::InputText;
pub use request::{BUILDING_ID_SENTINEL, FetchResult, PendingFetch, QueryResolution, RequestId, SuggestionRequest};
pub use transcript::{Actor, SEED_GREETINGS, Transcript, TranscriptEntry, TranscriptEvent};
pub use variation::Variation;
pub use widget::{FALLBACK_MESSAGE, HelpWidget, Resolution};
