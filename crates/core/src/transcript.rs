//! Append-only chat transcript.
//!
//! Every change goes through [`Transcript::reduce`], which takes the previous
//! transcript and one [`TranscriptEvent`] and returns the next transcript with
//! exactly one entry appended. Entries are never reordered or removed.

use crate::Variation;
use serde::{Deserialize, Serialize};

/// Who wrote a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Ai,
    User,
}

impl Actor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Actor::Ai => "ai",
            Actor::User => "user",
        }
    }
}

/// A single transcript line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub actor: Actor,
    pub message: String,
    #[serde(rename = "type")]
    pub variation: Variation,
}

impl TranscriptEntry {
    pub fn ai(message: impl Into<String>, variation: Variation) -> Self {
        Self { actor: Actor::Ai, message: message.into(), variation }
    }

    pub fn user(message: impl Into<String>, variation: Variation) -> Self {
        Self { actor: Actor::User, message: message.into(), variation }
    }

    pub fn is_user(&self) -> bool {
        self.actor == Actor::User
    }
}

/// Greeting lines each persona opens with
pub const SEED_GREETINGS: &[(Variation, &str)] = &[
    (Variation::Generic, "Trane Digital Support  -  Generic Bot"),
    (Variation::Generic, "Hi! Welcome to Trane Digital Support."),
    (Variation::Generic, "Ask me a general question and I'll find the answer for you."),
    (Variation::Insight, "Trane Digital Support  -  Insightful Bot"),
    (Variation::Insight, "Hi! Welcome to Trane Digital Support."),
    (Variation::Insight, "Ask me a specific question and I'll find the answer for you."),
];

/// Something that adds one line to the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    UserMessage { message: String, variation: Variation },
    AiMessage { message: String, variation: Variation },
}

impl TranscriptEvent {
    fn into_entry(self) -> TranscriptEntry {
        match self {
            TranscriptEvent::UserMessage { message, variation } => TranscriptEntry::user(message, variation),
            TranscriptEvent::AiMessage { message, variation } => TranscriptEntry::ai(message, variation),
        }
    }
}

/// Ordered, append-only log of chat entries
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcript holding the six persona greetings
    pub fn seeded() -> Self {
        let entries = SEED_GREETINGS
            .iter()
            .map(|(variation, message)| TranscriptEntry::ai(*message, *variation))
            .collect();
        Self { entries }
    }

    /// Apply one event, returning the next transcript
    pub fn reduce(mut self, event: TranscriptEvent) -> Self {
        self.entries.push(event.into_entry());
        self
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Entries tagged with the given persona, in transcript order
    pub fn for_variation(&self, variation: Variation) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter().filter(move |entry| entry.variation == variation)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }
}
