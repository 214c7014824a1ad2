//! Deterministic prompt construction for the rewrite instruction.
//!
//! The tone vocabulary is closed, so the phrasing table is an exhaustive
//! match with no fallback arm; a fifth combination cannot be expressed.

use crate::tone::{Detail, Formality, ToneSelection};

/// Per-combination guidance appended after the quoted source text.
fn tone_guidance(tone: ToneSelection) -> &'static str {
    match (tone.formality, tone.detail) {
        (Formality::Casual, Detail::Concise) => {
            "Make it conversational, friendly, and brief. Use simple language and get straight to the point."
        }
        (Formality::Casual, Detail::Detailed) => {
            "Make it conversational and friendly but comprehensive. Use examples and explanations to elaborate on points."
        }
        (Formality::Formal, Detail::Concise) => {
            "Make it professional and succinct. Use proper business language while keeping it brief and direct."
        }
        (Formality::Formal, Detail::Detailed) => {
            "Make it professional and comprehensive. Use formal language with thorough explanations and proper structure."
        }
    }
}

/// Build the natural-language rewrite instruction for the upstream model.
///
/// Embeds the source text verbatim in quotes and ends with an explicit
/// respond-only instruction so the model returns nothing but the rewrite.
pub fn build_prompt(text: &str, tone: ToneSelection) -> String {
    format!(
        "Rewrite the following text to be {} and {}:\n\n\"{}\"\n\n{}\n\nRespond only with the rewritten text, no additional commentary.",
        tone.formality,
        tone.detail,
        text,
        tone_guidance(tone),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL_TONES: [ToneSelection; 4] = [
        ToneSelection {
            formality: Formality::Casual,
            detail: Detail::Concise,
        },
        ToneSelection {
            formality: Formality::Casual,
            detail: Detail::Detailed,
        },
        ToneSelection {
            formality: Formality::Formal,
            detail: Detail::Concise,
        },
        ToneSelection {
            formality: Formality::Formal,
            detail: Detail::Detailed,
        },
    ];

    #[test]
    fn prompt_embeds_source_text_verbatim() {
        for tone in ALL_TONES {
            let prompt = build_prompt("Hello, world", tone);
            assert!(prompt.contains("\"Hello, world\""));
        }
    }

    #[test]
    fn formal_concise_uses_professional_succinct_phrasing() {
        let prompt = build_prompt(
            "ship it",
            ToneSelection::new(Formality::Formal, Detail::Concise),
        );
        assert!(prompt.contains("formal and concise"));
        assert!(prompt.contains("professional and succinct"));
    }

    #[test]
    fn casual_detailed_uses_examples_phrasing() {
        let prompt = build_prompt(
            "ship it",
            ToneSelection::new(Formality::Casual, Detail::Detailed),
        );
        assert!(prompt.contains("casual and detailed"));
        assert!(prompt.contains("Use examples and explanations"));
    }

    #[test]
    fn four_combinations_map_to_distinct_phrasings() {
        let phrasings: HashSet<&str> = ALL_TONES.iter().map(|t| tone_guidance(*t)).collect();
        assert_eq!(phrasings.len(), 4);
    }

    #[test]
    fn prompt_ends_with_respond_only_instruction() {
        let prompt = build_prompt(
            "x",
            ToneSelection::new(Formality::Casual, Detail::Concise),
        );
        assert!(prompt.ends_with("Respond only with the rewritten text, no additional commentary."));
    }
}
