//! Localized bot message templates.

use crate::message::{BotMessage, Choice};
use crisis_hub_core::{CrisisCategory, Language};

/// Opening message of every session. Always bilingual.
#[must_use]
pub fn greeting() -> BotMessage {
    let options: String = CrisisCategory::ALL
        .iter()
        .map(|c| format!("\n- {} ({})", c.english_label(), c.hindi_name()))
        .collect();
    let text = format!(
        "Hi! I can provide helpline numbers and nearby resources for crises in India. \
         What type of crisis are you facing?\n\nOptions:{options}\n\
         Type \"language\" to switch between English and Hindi."
    );
    BotMessage::text(text).with_choices(category_choices(Language::En))
}

/// Quick replies for every crisis category in the given language.
#[must_use]
pub fn category_choices(language: Language) -> Vec<Choice> {
    CrisisCategory::ALL
        .iter()
        .map(|c| Choice::new(c.menu_label(language), c.menu_value(language)))
        .collect()
}

fn language_choices() -> Vec<Choice> {
    Language::ALL
        .iter()
        .map(|l| Choice::new(l.native_name(), l.code()))
        .collect()
}

#[must_use]
pub fn distress_check(language: Language) -> BotMessage {
    BotMessage::text(match language {
        Language::En => "I sense you're feeling very distressed. Do you need immediate help? (Yes/No)",
        Language::Hi => {
            "मुझे लगता है कि आप बहुत परेशान हैं। क्या आपको तुरंत सहायता चाहिए? (हाँ/नहीं)"
        }
    })
}

#[must_use]
pub fn emergency_question(language: Language) -> BotMessage {
    BotMessage::text(match language {
        Language::En => "Is this an emergency? (Yes/No)",
        Language::Hi => "क्या यह आपातकालीन स्थिति है? (हाँ/नहीं)",
    })
}

#[must_use]
pub fn unknown_crisis(language: Language) -> BotMessage {
    BotMessage::text(match language {
        Language::En => "Sorry, I don’t recognize that crisis type. Please choose from below:",
        Language::Hi => "क्षमा करें, मैं उस संकट प्रकार को नहीं पहचानता। कृपया नीचे से चुनें:",
    })
    .with_choices(category_choices(language))
}

/// The language menu is shown in English whatever the active language.
#[must_use]
pub fn language_menu() -> BotMessage {
    BotMessage::text("Please select a language:").with_choices(language_choices())
}

#[must_use]
pub fn invalid_language() -> BotMessage {
    BotMessage::text("Invalid language. Please select below:").with_choices(language_choices())
}

/// Confirmation, written in the newly selected language.
#[must_use]
pub fn language_set(language: Language) -> BotMessage {
    BotMessage::text(match language {
        Language::En => "Language set to English. What type of crisis are you facing?",
        Language::Hi => "भाषा हिंदी में सेट की गई। आप किस प्रकार के संकट का सामना कर रहे हैं?",
    })
}

#[must_use]
pub fn call_emergency_number(language: Language) -> BotMessage {
    BotMessage::text(match language {
        Language::En => "Please call 112 or your local emergency number immediately.",
        Language::Hi => "कृपया तुरंत 112 या स्थानीय आपातकालीन नंबर पर कॉल करें।",
    })
}

#[must_use]
pub fn helpline(language: Language, category: CrisisCategory, helpline: &str) -> BotMessage {
    let name = category.display_name(language);
    BotMessage::text(match language {
        Language::En => format!("Here’s the helpline for {name}: {helpline}"),
        Language::Hi => format!("{name} के लिए हेल्पलाइन: {helpline}"),
    })
}

#[must_use]
pub fn connecting_to_help(language: Language) -> BotMessage {
    BotMessage::text(match language {
        Language::En => "I’m connecting you to immediate help. Please dial 112.",
        Language::Hi => "मैं आपको तुरंत सहायता से जोड़ रहा हूँ। कृपया 112 डायल करें।",
    })
}

#[must_use]
pub fn reassurance(language: Language) -> BotMessage {
    BotMessage::text(match language {
        Language::En => "Okay, I’m here to help. What type of crisis are you facing?",
        Language::Hi => {
            "ठीक है, मैं आपकी सहायता के लिए यहाँ हूँ। आप किस प्रकार के संकट का सामना कर रहे हैं?"
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_lists_every_category_in_both_languages() {
        let msg = greeting();
        for category in CrisisCategory::ALL {
            assert!(msg.text.contains(category.english_label()));
            assert!(msg.text.contains(category.hindi_name()));
        }
        assert!(msg.text.contains("\"language\""));
        assert_eq!(msg.choices.len(), 4);
    }

    #[test]
    fn hindi_category_menu_submits_hindi_names() {
        let choices = category_choices(Language::Hi);
        assert_eq!(choices[1].value, "मानसिक स्वास्थ्य");
    }

    #[test]
    fn language_menu_offers_codes() {
        let values: Vec<_> = language_menu().choices.into_iter().map(|c| c.value).collect();
        assert_eq!(values, ["en", "hi"]);
    }

    #[test]
    fn helpline_uses_localized_category_name() {
        let en = helpline(Language::En, CrisisCategory::MentalHealth, "Kiran");
        assert_eq!(en.text, "Here’s the helpline for mental health: Kiran");

        let hi = helpline(Language::Hi, CrisisCategory::MentalHealth, "Kiran");
        assert_eq!(hi.text, "मानसिक स्वास्थ्य के लिए हेल्पलाइन: Kiran");
    }
}
