//! Crisis categories the helpline chatbot knows about.

use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the supported helpline topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisCategory {
    NaturalDisasters,
    MentalHealth,
    DomesticViolence,
    Homelessness,
}

impl CrisisCategory {
    /// All categories, in menu order.
    pub const ALL: [CrisisCategory; 4] = [
        CrisisCategory::NaturalDisasters,
        CrisisCategory::MentalHealth,
        CrisisCategory::DomesticViolence,
        CrisisCategory::Homelessness,
    ];

    /// Returns the lowercase English key.
    ///
    /// This is what English-mode users type and what the helpline
    /// directory is keyed on, whatever the display language.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::NaturalDisasters => "natural disasters",
            Self::MentalHealth => "mental health",
            Self::DomesticViolence => "domestic violence",
            Self::Homelessness => "homelessness",
        }
    }

    /// Returns the title-cased English label used on menu buttons.
    #[must_use]
    pub const fn english_label(&self) -> &'static str {
        match self {
            Self::NaturalDisasters => "Natural Disasters",
            Self::MentalHealth => "Mental Health",
            Self::DomesticViolence => "Domestic Violence",
            Self::Homelessness => "Homelessness",
        }
    }

    /// Returns the Hindi display name.
    #[must_use]
    pub const fn hindi_name(&self) -> &'static str {
        match self {
            Self::NaturalDisasters => "प्राकृतिक आपदाएँ",
            Self::MentalHealth => "मानसिक स्वास्थ्य",
            Self::DomesticViolence => "घरेलू हिंसा",
            Self::Homelessness => "बेघरता",
        }
    }

    /// Returns the name shown to a user of the given language.
    #[must_use]
    pub const fn display_name(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.key(),
            Language::Hi => self.hindi_name(),
        }
    }

    /// Returns the menu button label for the given language.
    #[must_use]
    pub const fn menu_label(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.english_label(),
            Language::Hi => self.hindi_name(),
        }
    }

    /// Returns the text a menu button injects as user input.
    #[must_use]
    pub const fn menu_value(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.key(),
            Language::Hi => self.hindi_name(),
        }
    }

    /// Looks up a category by its English key, ignoring case.
    #[must_use]
    pub fn from_english(input: &str) -> Option<Self> {
        let lowered = input.to_lowercase();
        Self::ALL.into_iter().find(|c| c.key() == lowered)
    }

    /// Looks up a category by its exact Hindi name.
    ///
    /// Devanagari has no case, so no folding is applied.
    #[must_use]
    pub fn from_hindi(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.hindi_name() == input)
    }

    /// Looks up a category using the name set of the given language.
    #[must_use]
    pub fn recognize(input: &str, language: Language) -> Option<Self> {
        match language {
            Language::En => Self::from_english(input),
            Language::Hi => Self::from_hindi(input),
        }
    }
}

impl fmt::Display for CrisisCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_lookup_ignores_case() {
        assert_eq!(
            CrisisCategory::from_english("Mental Health"),
            Some(CrisisCategory::MentalHealth)
        );
        assert_eq!(
            CrisisCategory::from_english("HOMELESSNESS"),
            Some(CrisisCategory::Homelessness)
        );
    }

    #[test]
    fn english_lookup_requires_whole_name() {
        assert_eq!(CrisisCategory::from_english("mental"), None);
        assert_eq!(CrisisCategory::from_english("mental  health"), None);
    }

    #[test]
    fn hindi_lookup_is_exact() {
        assert_eq!(
            CrisisCategory::from_hindi("घरेलू हिंसा"),
            Some(CrisisCategory::DomesticViolence)
        );
        assert_eq!(CrisisCategory::from_hindi("घरेलू"), None);
    }

    #[test]
    fn recognize_uses_active_language_only() {
        assert_eq!(CrisisCategory::recognize("बेघरता", Language::En), None);
        assert_eq!(CrisisCategory::recognize("homelessness", Language::Hi), None);
        assert_eq!(
            CrisisCategory::recognize("बेघरता", Language::Hi),
            Some(CrisisCategory::Homelessness)
        );
    }

    #[test]
    fn menu_values_are_recognized() {
        for language in Language::ALL {
            for category in CrisisCategory::ALL {
                assert_eq!(
                    CrisisCategory::recognize(category.menu_value(language), language),
                    Some(category)
                );
            }
        }
    }
}
