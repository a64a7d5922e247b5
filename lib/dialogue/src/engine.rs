//! The scripted helpline conversation.
//!
//! [`DialogueEngine::respond`] is a pure transition function: it takes the
//! current [`ConversationState`] and one line of user input and returns the
//! next state together with the bot's replies. The engine holds only
//! immutable data and can be shared freely between sessions.
//!
//! A distress check runs before the per-step handling. When the input's
//! sentiment falls below the threshold the conversation is redirected to a
//! distress confirmation, whatever the input said.

use crate::directory::HelplineDirectory;
use crate::lexicon::SentimentLexicon;
use crate::message::BotMessage;
use crate::state::{ConversationState, Step};
use crate::templates;
use crisis_hub_core::{CrisisCategory, Language};
use serde::Serialize;

/// Sentiment below which the distress check fires.
pub const DEFAULT_DISTRESS_THRESHOLD: f64 = -0.5;

/// Command that opens the language menu.
const LANGUAGE_COMMAND: &str = "language";

/// The outcome of processing one line of input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Turn {
    /// State after the input.
    pub state: ConversationState,
    /// Replies to display, in order.
    pub messages: Vec<BotMessage>,
    /// Sentiment score of the input.
    pub sentiment: f64,
    /// True if the distress check replaced the normal handling.
    pub distress_override: bool,
}

impl Turn {
    fn ignored(state: ConversationState) -> Self {
        Self {
            state,
            messages: Vec::new(),
            sentiment: 0.0,
            distress_override: false,
        }
    }
}

/// Helpline chatbot state machine.
#[derive(Debug, Clone)]
pub struct DialogueEngine {
    lexicon: SentimentLexicon,
    directory: HelplineDirectory,
    distress_threshold: f64,
}

impl DialogueEngine {
    /// Creates an engine over the given lexicon and helpline directory.
    #[must_use]
    pub fn new(lexicon: SentimentLexicon, directory: HelplineDirectory) -> Self {
        Self {
            lexicon,
            directory,
            distress_threshold: DEFAULT_DISTRESS_THRESHOLD,
        }
    }

    /// Sets the sentiment threshold for the distress check.
    #[must_use]
    pub fn with_distress_threshold(mut self, threshold: f64) -> Self {
        self.distress_threshold = threshold;
        self
    }

    /// Returns the message that opens a conversation.
    #[must_use]
    pub fn greeting(&self) -> BotMessage {
        templates::greeting()
    }

    /// Processes one line of user input.
    ///
    /// Input is trimmed first; blank input is ignored and leaves the state
    /// untouched. Every other input either advances the conversation or
    /// repeats the guidance for the current step.
    #[must_use]
    pub fn respond(&self, state: ConversationState, input: &str) -> Turn {
        let input = input.trim();
        if input.is_empty() {
            return Turn::ignored(state);
        }

        let sentiment = self.lexicon.score(input);

        if sentiment < self.distress_threshold && state.step.allows_distress_override() {
            tracing::info!(
                sentiment,
                language = %state.language,
                "distress detected, asking whether immediate help is needed"
            );
            return Turn {
                state: state.at(Step::AwaitingDistressConfirmation),
                messages: vec![templates::distress_check(state.language)],
                sentiment,
                distress_override: true,
            };
        }

        let (state, message) = self.dispatch(state, input);
        Turn {
            state,
            messages: vec![message],
            sentiment,
            distress_override: false,
        }
    }

    fn dispatch(&self, state: ConversationState, input: &str) -> (ConversationState, BotMessage) {
        let language = state.language;
        match state.step {
            Step::AwaitingCrisis => {
                if let Some(category) = CrisisCategory::recognize(input, language) {
                    tracing::debug!(%category, "crisis category selected");
                    (
                        state.at(Step::AwaitingEmergencyConfirmation { category }),
                        templates::emergency_question(language),
                    )
                } else if input.to_lowercase() == LANGUAGE_COMMAND {
                    (state.at(Step::AwaitingLanguage), templates::language_menu())
                } else {
                    (state, templates::unknown_crisis(language))
                }
            }
            Step::AwaitingLanguage => match Language::from_code(input) {
                Some(selected) => (
                    ConversationState {
                        step: Step::AwaitingCrisis,
                        language: selected,
                    },
                    templates::language_set(selected),
                ),
                None => (state, templates::invalid_language()),
            },
            Step::AwaitingEmergencyConfirmation { category } => {
                let message = if is_affirmative(input) {
                    templates::call_emergency_number(language)
                } else {
                    templates::helpline(language, category, self.directory.helpline(category))
                };
                (state.at(Step::AwaitingCrisis), message)
            }
            Step::AwaitingDistressConfirmation => {
                let message = if is_affirmative(input) {
                    templates::connecting_to_help(language)
                } else {
                    templates::reassurance(language)
                };
                (state.at(Step::AwaitingCrisis), message)
            }
        }
    }
}

impl Default for DialogueEngine {
    fn default() -> Self {
        Self::new(SentimentLexicon::default(), HelplineDirectory::default())
    }
}

/// "yes" in any ASCII case, or the Hindi "हाँ", in either language.
fn is_affirmative(input: &str) -> bool {
    input.eq_ignore_ascii_case("yes") || input == "हाँ"
}
