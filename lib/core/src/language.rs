//! Display languages supported by the helpline chatbot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The language bot messages are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English, the primary locale.
    #[default]
    En,
    /// Hindi, the secondary locale.
    Hi,
}

impl Language {
    /// All supported languages, in menu order.
    pub const ALL: [Language; 2] = [Language::En, Language::Hi];

    /// Returns the language code used in selection input.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }

    /// Returns the language's name written in itself.
    #[must_use]
    pub const fn native_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "हिंदी",
        }
    }

    /// Parses a language code, ignoring ASCII case.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
