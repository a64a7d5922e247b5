//! Message types for chat transcripts.

use chrono::{DateTime, Utc};
use crisis_hub_core::MessageId;
use serde::{Deserialize, Serialize};

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The visitor.
    User,
    /// The helpline bot.
    Bot,
}

/// A selectable reply attached to a bot message.
///
/// Selecting it submits `value` exactly as if the user had typed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Button label.
    pub label: String,
    /// Input submitted when chosen.
    pub value: String,
}

impl Choice {
    /// Creates a new choice.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A message emitted by the dialogue engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotMessage {
    /// Message text.
    pub text: String,
    /// Quick replies offered with the message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

impl BotMessage {
    /// Creates a plain text message.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: Vec::new(),
        }
    }

    /// Adds quick replies.
    #[must_use]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = Choice>) -> Self {
        self.choices.extend(choices);
        self
    }
}

/// One line of a chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Unique message identifier.
    pub id: MessageId,
    /// Who wrote it.
    pub speaker: Speaker,
    /// Message text.
    pub text: String,
    /// Quick replies offered (bot entries only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// When the entry was appended.
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    /// Creates a user entry.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            speaker: Speaker::User,
            text: text.into(),
            choices: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Creates a bot entry from an engine message.
    #[must_use]
    pub fn bot(message: &BotMessage) -> Self {
        Self {
            id: MessageId::new(),
            speaker: Speaker::Bot,
            text: message.text.clone(),
            choices: message.choices.clone(),
            timestamp: Utc::now(),
        }
    }
}
