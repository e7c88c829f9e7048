//! Conversation starters shown by the chat widget.

use folio_types::chat::Language;

const FR: &[&str] = &[
    "Quelles sont les compétences de Samuel ?",
    "Peux-tu me parler de son expérience ?",
    "Quels projets a-t-il réalisés ?",
    "Quelles sont ses certifications ?",
    "Comment le contacter ?",
    "Quelle est sa spécialité en IA ?",
];

const EN: &[&str] = &[
    "What are Samuel's skills?",
    "Can you tell me about his experience?",
    "What projects has he worked on?",
    "What certifications does he have?",
    "How can I contact him?",
    "What's his AI specialty?",
];

const DE: &[&str] = &[
    "Was sind Samuels Fähigkeiten?",
    "Kannst du mir von seiner Erfahrung erzählen?",
    "An welchen Projekten hat er gearbeitet?",
    "Welche Zertifizierungen hat er?",
    "Wie kann ich ihn kontaktieren?",
    "Was ist seine KI-Spezialität?",
];

/// Suggestions for a language. Pure lookup, no I/O.
pub fn suggestions(language: Language) -> &'static [&'static str] {
    match language {
        Language::Fr => FR,
        Language::En => EN,
        Language::De => DE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn german_code_returns_german_list() {
        let list = suggestions(Language::from_code(Some("de")));
        assert_eq!(list[0], "Was sind Samuels Fähigkeiten?");
        assert_eq!(list.len(), 6);
    }

    #[test]
    fn unknown_code_falls_back_to_french() {
        assert_eq!(suggestions(Language::from_code(Some("xx"))), FR);
        assert_eq!(suggestions(Language::from_code(None)), FR);
    }

    #[test]
    fn every_language_has_the_same_number_of_entries() {
        assert_eq!(FR.len(), EN.len());
        assert_eq!(EN.len(), DE.len());
    }
}
