// src/chat/triggers.rs — Finalize trigger detection
//
// A finalize trigger ends the information-gathering phase and requests
// structured extraction. Current revision: literal keywords. Earlier
// revision: affirmative confirmations, kept behind a config flag.

/// Keyword triggers recognized in the current API revision.
const FINALIZE_KEYWORDS: &[&str] = &["#submit", "#generate", "#selesai"];

/// Affirmations the earlier revision treated as "generate now".
const LEGACY_CONFIRMATIONS: &[&str] = &["oke", "ok", "yes", "good"];

/// Whether this user message requests finalization.
///
/// Keywords match as whole whitespace-delimited tokens, case-insensitively,
/// so "#submitted" or a URL fragment does not trigger extraction. Legacy
/// affirmations additionally tolerate trailing punctuation ("Oke!", "ok.").
pub fn is_finalize_trigger(content: &str, legacy_confirmations: bool) -> bool {
    for token in content.split_whitespace() {
        let token = token.to_lowercase();
        if FINALIZE_KEYWORDS.contains(&token.as_str()) {
            return true;
        }
        if legacy_confirmations {
            let bare = token.trim_end_matches(['.', ',', '!', '?']);
            if LEGACY_CONFIRMATIONS.contains(&bare) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_trigger() {
        assert!(is_finalize_trigger("#submit", false));
        assert!(is_finalize_trigger("#generate", false));
        assert!(is_finalize_trigger("#selesai", false));
    }

    #[test]
    fn test_keyword_case_insensitive() {
        assert!(is_finalize_trigger("#SUBMIT", false));
        assert!(is_finalize_trigger("#Selesai", false));
    }

    #[test]
    fn test_keyword_inside_sentence() {
        assert!(is_finalize_trigger("sudah lengkap #submit", false));
    }

    #[test]
    fn test_keyword_must_be_whole_token() {
        assert!(!is_finalize_trigger("#submitted", false));
        assert!(!is_finalize_trigger("see example.com/#submit-form", false));
    }

    #[test]
    fn test_plain_description_does_not_trigger() {
        assert!(!is_finalize_trigger(
            "I want to build an e-learning platform for teachers",
            false
        ));
    }

    #[test]
    fn test_legacy_confirmations_off_by_default() {
        assert!(!is_finalize_trigger("oke", false));
        assert!(!is_finalize_trigger("ok", false));
    }

    #[test]
    fn test_legacy_confirmations_enabled() {
        assert!(is_finalize_trigger("oke", true));
        assert!(is_finalize_trigger("Oke!", true));
        assert!(is_finalize_trigger("ok.", true));
        assert!(is_finalize_trigger("yes", true));
    }

    #[test]
    fn test_legacy_confirmation_not_substring() {
        // "okay" contains "ok" but is not a confirmation token
        assert!(!is_finalize_trigger("okay so next week", true));
        assert!(!is_finalize_trigger("broker", true));
    }

    #[test]
    fn test_empty_content() {
        assert!(!is_finalize_trigger("", true));
        assert!(!is_finalize_trigger("   ", true));
    }
}
