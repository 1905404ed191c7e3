//! State of the help widget: visibility, composer, persona and transcript.
//!
//! The widget does no I/O. [`HelpWidget::submit`] hands back a
//! [`PendingFetch`] for the runtime to dispatch, and the runtime feeds the
//! outcome back through [`HelpWidget::resolve`]. Only the most recently issued
//! request may append an answer; anything older is dropped.

use crate::building::BuildingIdSource;
use crate::envelope::parse_answer;
use crate::input::InputText;
use crate::logging::{PrivacyConfig, redact_prompt};
use crate::request::{PendingFetch, QueryResolution, RequestId, SuggestionRequest};
use crate::transcript::{Transcript, TranscriptEvent};
use crate::Variation;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Line appended when a question cannot be answered
pub const FALLBACK_MESSAGE: &str = "I am unable to answer that. Please try again or contact support.";

/// What [`HelpWidget::resolve`] did with a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The answer was appended
    Answered,
    /// The fallback line was appended
    Fallback,
    /// Superseded or already resolved; nothing appended
    Stale,
    /// Neither data nor error; nothing appended
    Empty,
}

impl Resolution {
    pub fn appended(&self) -> bool {
        matches!(self, Resolution::Answered | Resolution::Fallback)
    }
}

pub struct HelpWidget {
    open: bool,
    input: InputText,
    variation: Variation,
    transcript: Transcript,
    next_request: u64,
    pending: Option<(RequestId, DateTime<Utc>)>,
    building: Arc<dyn BuildingIdSource>,
    fallback_message: String,
    privacy: PrivacyConfig,
}

impl HelpWidget {
    /// Create a closed widget with the seeded transcript
    pub fn new(building: Arc<dyn BuildingIdSource>) -> Self {
        Self {
            open: false,
            input: InputText::new(),
            variation: Variation::default(),
            transcript: Transcript::seeded(),
            next_request: 1,
            pending: None,
            building,
            fallback_message: FALLBACK_MESSAGE.to_string(),
            privacy: PrivacyConfig::default(),
        }
    }

    pub fn with_variation(mut self, variation: Variation) -> Self {
        self.variation = variation;
        self
    }

    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    pub fn with_privacy(mut self, privacy: PrivacyConfig) -> Self {
        self.privacy = privacy;
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Toggle button activation
    pub fn open(&mut self) {
        if !self.open {
            tracing::debug!("help modal opened");
        }
        self.open = true;
    }

    /// Modal close action
    pub fn close(&mut self) {
        if self.open {
            tracing::debug!("help modal closed");
        }
        self.open = false;
    }

    pub fn variation(&self) -> Variation {
        self.variation
    }

    pub fn set_variation(&mut self, variation: Variation) {
        if variation != self.variation {
            tracing::debug!(from = %self.variation, to = %variation, "variation changed");
        }
        self.variation = variation;
    }

    pub fn text(&self) -> &str {
        self.input.as_str()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input.set(text);
    }

    pub fn input(&self) -> &InputText {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputText {
        &mut self.input
    }

    /// True while the latest request is outstanding
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending.map(|(id, _)| id)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn fallback_message(&self) -> &str {
        &self.fallback_message
    }

    /// Commit the composed text.
    ///
    /// Does nothing when the input is empty. Otherwise clears the input,
    /// appends the user line and returns the request to dispatch. Issuing a new
    /// request supersedes any outstanding one.
    pub fn submit(&mut self) -> Option<PendingFetch> {
        if self.input.is_empty() {
            return None;
        }

        let prompt = self.input.take();
        self.apply(TranscriptEvent::UserMessage { message: prompt.clone(), variation: self.variation });

        let id = RequestId(self.next_request);
        self.next_request += 1;

        if let Some((superseded, _)) = self.pending {
            tracing::debug!(request = %superseded, by = %id, "request superseded");
        }

        let issued_at = Utc::now();
        self.pending = Some((id, issued_at));

        let request = SuggestionRequest::new(prompt, self.variation, self.building.building_id());
        tracing::info!(
            request = %id,
            variation = %request.variation,
            building_id = %request.building_id,
            "submitting help question"
        );
        tracing::debug!(request = %id, prompt = %redact_prompt(&request.prompt, &self.privacy), "question text");

        Some(PendingFetch { id, request, issued_at })
    }

    /// Turn a finished fetch into at most one AI line.
    ///
    /// Data takes precedence over an error reported alongside it. A payload
    /// that does not decode is treated like a failed fetch.
    pub fn resolve(&mut self, resolution: QueryResolution) -> Resolution {
        let QueryResolution { id, result } = resolution;

        let issued_at = match self.pending {
            Some((pending, issued_at)) if pending == id => issued_at,
            _ => {
                tracing::debug!(request = %id, pending = ?self.pending_request(), "dropping stale response");
                return Resolution::Stale;
            }
        };
        self.pending = None;
        let elapsed_ms = (Utc::now() - issued_at).num_milliseconds();

        if let Some(payload) = result.payload() {
            match parse_answer(payload) {
                Ok(answer) => {
                    tracing::info!(request = %id, elapsed_ms, "answer received");
                    self.apply(TranscriptEvent::AiMessage { message: answer, variation: self.variation });
                    return Resolution::Answered;
                }
                Err(e) => {
                    tracing::warn!(request = %id, error = %e, "malformed suggestion response");
                }
            }
        } else if let Some(ref error) = result.error {
            tracing::warn!(request = %id, elapsed_ms, error = %error, "suggestion query failed");
        } else {
            tracing::warn!(request = %id, "suggestion query returned neither data nor error");
            return Resolution::Empty;
        }

        self.apply(TranscriptEvent::AiMessage { message: self.fallback_message.clone(), variation: self.variation });
        Resolution::Fallback
    }

    fn apply(&mut self, event: TranscriptEvent) {
        self.transcript = std::mem::take(&mut self.transcript).reduce(event);
    }
}

impl std::fmt::Debug for HelpWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelpWidget")
            .field("open", &self.open)
            .field("input", &self.input)
            .field("variation", &self.variation)
            .field("transcript_len", &self.transcript.len())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
