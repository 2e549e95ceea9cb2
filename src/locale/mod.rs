//! Dual-language string table.
//!
//! The model has no native locale switch, so the output language is enforced
//! through imperative directives injected into the prompt text. Everything
//! user-visible that the core needs (directives, welcome messages, the generic
//! chat error line) lives here, keyed by [`Language`] and looked up once.

use crate::models::api::{AccountTier, Language};

/// Directive appended to every generation prompt. Whole-output language rule.
pub fn generation_directive(language: Language) -> &'static str {
    match language {
        Language::En => "IMPORTANT: You MUST generate ALL content in ENGLISH.",
        Language::Fr => "IMPORTANT: You MUST generate ALL content in FRENCH.",
    }
}

/// Directive used in the chat system instruction. Reply-language rule.
pub fn chat_directive(language: Language) -> &'static str {
    match language {
        Language::En => "IMPORTANT: You MUST reply in ENGLISH.",
        Language::Fr => "IMPORTANT: You MUST reply in FRENCH.",
    }
}

/// Human-readable language name used when prompts describe the key/value
/// split for JSON modes ("keys in English, values in ...").
pub fn value_language(language: Language) -> &'static str {
    match language {
        Language::En => "English",
        Language::Fr => "French",
    }
}

/// Synthetic model-authored welcome message emitted exactly once when a chat
/// session initializes. Selected by account tier and language.
pub fn welcome_message(tier: AccountTier, language: Language) -> &'static str {
    match (tier, language) {
        (AccountTier::Guest, Language::En) => {
            "\u{1F44B} Welcome! You are in guest mode. Nothing will be saved. \
             Upload a document to start."
        }
        (AccountTier::Registered, Language::En) => {
            "\u{1F44B} Welcome! Your documents and study space are ready. \
             Upload your file or type a topic."
        }
        (AccountTier::Guest, Language::Fr) => {
            "\u{1F44B} Bienvenue ! Tu es en mode invit\u{e9}. Rien ne sera sauvegard\u{e9}. \
             T\u{e9}l\u{e9}verse un document pour commencer."
        }
        (AccountTier::Registered, Language::Fr) => {
            "\u{1F44B} Bienvenue ! Tes documents et ton espace d\u{2019}\u{e9}tude sont pr\u{ea}ts. \
             T\u{e9}l\u{e9}verse ton fichier ou \u{e9}cris un sujet."
        }
    }
}

/// Generic failure line appended to the transcript (flagged `isError`) when a
/// chat turn fails. Never carries upstream detail.
pub fn generic_error(language: Language) -> &'static str {
    match language {
        Language::En => "Something went wrong. Please try again.",
        Language::Fr => "Une erreur est survenue. Veuillez r\u{e9}essayer.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_are_language_exclusive() {
        assert!(generation_directive(Language::En).contains("ENGLISH"));
        assert!(!generation_directive(Language::En).contains("FRENCH"));
        assert!(generation_directive(Language::Fr).contains("FRENCH"));
        assert!(!generation_directive(Language::Fr).contains("ENGLISH"));
    }

    #[test]
    fn test_welcome_varies_by_tier_and_language() {
        let guest_en = welcome_message(AccountTier::Guest, Language::En);
        let user_en = welcome_message(AccountTier::Registered, Language::En);
        let guest_fr = welcome_message(AccountTier::Guest, Language::Fr);

        assert_ne!(guest_en, user_en);
        assert_ne!(guest_en, guest_fr);
        assert!(guest_en.contains("guest mode"));
    }
}
