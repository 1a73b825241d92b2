//! Prompt text for the chat assistant.

use crate::controller::ChatSeed;

/// Persona and safety rules fixed at session creation. Passed to the
/// collaborator unchanged.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are the "Care4U AI Assistant", a virtual extension of the University Medical Center.
Your goal is to provide supportive, professional, and clear health guidance to students who are feeling unwell, primarily with common colds and flu.

Guidelines:
1. Always maintain a calm, trustworthy, and caring tone (consistent with Teal Green/White visual identity).
2. Help students recognize symptoms of cold vs. flu.
3. Provide evidence-based self-care advice (hydration, rest, simple nutrition).
4. CRITICAL: If a student mentions severe symptoms (high fever over 103F, chest pain, confusion, persistent vomiting, difficulty breathing), immediately advise them to contact university emergency services or go to the nearest ER.
5. Remind users that you are an AI assistant and they should consult university medical staff for formal diagnoses.
6. Keep responses concise and easy to read.
"#;

/// Suggested one-tap replies shown under the chat input.
pub const QUICK_REPLIES: &[&str] = &[
    "I'm feeling slightly better",
    "My fever is increasing",
    "Is this medicine safe?",
    "When can I return to class?",
    "Book clinic appointment",
];

/// Context-setting first turn for a chat session. `None` when nothing is selected.
pub fn seed_message(seed: &ChatSeed) -> Option<String> {
    if seed.is_empty() {
        return None;
    }
    Some(format!(
        "I am experiencing the following symptoms: {}. (ids: {})",
        seed.symptom_titles.join(", "),
        seed.symptom_ids.join(", ")
    ))
}
