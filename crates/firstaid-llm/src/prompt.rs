//! First-aid instruction template.

/// Framing placed before every user message.
pub const PROMPT_PREAMBLE: &str =
    "You are an emergency health assistant. Provide clear first aid advice.";

/// Embeds `message` in the instruction template.
pub fn build_prompt(message: &str) -> String {
    format!("{PROMPT_PREAMBLE}\n\nUser: {message}\n\nAssistant:")
}
