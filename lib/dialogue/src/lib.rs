//! Helpline chatbot for the crisis-hub service.
//!
//! This crate provides:
//!
//! - **Sentiment Lexicon**: fixed word weights used to spot distress
//! - **Helpline Directory**: the helpline numbers for each crisis category
//! - **Dialogue Engine**: the scripted conversation as a pure transition function
//! - **Session Store**: per-visitor conversation state and transcript

pub mod directory;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod message;
pub mod session;
pub mod state;
pub mod templates;

pub use directory::HelplineDirectory;
pub use engine::{DEFAULT_DISTRESS_THRESHOLD, DialogueEngine, Turn};
pub use error::SessionError;
pub use lexicon::SentimentLexicon;
pub use message::{BotMessage, Choice, Speaker, TranscriptEntry};
pub use session::{ChatSession, InMemorySessionStore, SessionStore};
pub use state::{ConversationState, Step};
