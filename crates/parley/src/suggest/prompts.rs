//! Prompt texts for the suggestion flow

use super::history::OptionBatch;

/// Fixed system instruction for the chat completion call
pub const SYSTEM_PROMPT: &str = "You assist individuals who rely on eye-tracking to communicate. Given an incoming message, craft four empathetic, conversational reply options that help them continue the conversation.
Guidelines:
- Each option must be no longer than 40 words.
- Avoid numbered lists; prefix options with natural labels like 'Option A:' etc.
- Keep tone warm, respectful, and collaborative.
- Do not repeat any options that have already been suggested in recent turns.
- Reply in JSON strictly as an array of four strings.";

const HISTORY_PREAMBLE: &str = "Previously suggested replies to avoid repeating:";

/// Compose the user prompt for one suggestion request.
///
/// Pure and deterministic: the same message and history always produce
/// the same text. History batches are flattened oldest to newest into a
/// bullet list; an empty history omits the block entirely.
pub fn build_user_prompt(message: &str, history: &[OptionBatch]) -> String {
    let mut prompt = String::new();

    let mut entries = history.iter().flat_map(|batch| batch.iter()).peekable();
    if entries.peek().is_some() {
        prompt.push_str(HISTORY_PREAMBLE);
        prompt.push('\n');
        for entry in entries {
            prompt.push_str("- ");
            prompt.push_str(entry);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str("Incoming message:\n\"\"\"\n");
    prompt.push_str(message.trim());
    prompt.push_str("\n\"\"\"\nGenerate four fresh reply options as instructed above.");
    prompt
}
