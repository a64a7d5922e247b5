//! Conversation state.
//!
//! The selected crisis category only exists inside
//! [`Step::AwaitingEmergencyConfirmation`], so a category can never linger
//! once the helpline has been disclosed.

use crisis_hub_core::{CrisisCategory, Language};
use serde::{Deserialize, Serialize};

/// The step the scripted conversation is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Waiting for a crisis category (or the `language` command).
    #[default]
    AwaitingCrisis,
    /// Waiting for a language code.
    AwaitingLanguage,
    /// A category was chosen; waiting to hear whether it is an emergency.
    AwaitingEmergencyConfirmation { category: CrisisCategory },
    /// Distress was detected; waiting to hear whether help is needed now.
    AwaitingDistressConfirmation,
}

impl Step {
    /// Returns the category chosen in this step, if any.
    #[must_use]
    pub fn selected_category(&self) -> Option<CrisisCategory> {
        match self {
            Self::AwaitingEmergencyConfirmation { category } => Some(*category),
            _ => None,
        }
    }

    /// Returns true if a distressed message may interrupt this step.
    ///
    /// Emergency confirmation is already the urgent path and is never
    /// interrupted.
    #[must_use]
    pub fn allows_distress_override(&self) -> bool {
        !matches!(self, Self::AwaitingEmergencyConfirmation { .. })
    }
}

/// Everything the dialogue engine needs to know about a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConversationState {
    /// Current step.
    #[serde(flatten)]
    pub step: Step,
    /// Language bot messages are written in.
    pub language: Language,
}

impl ConversationState {
    /// Initial state: waiting for a crisis category, in English.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the category chosen in this state, if any.
    #[must_use]
    pub fn selected_category(&self) -> Option<CrisisCategory> {
        self.step.selected_category()
    }

    #[must_use]
    pub(crate) fn at(self, step: Step) -> Self {
        Self { step, ..self }
    }
}
