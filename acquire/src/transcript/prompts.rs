//! Prompt text for transcript generation.

/// Format rules embedded in the system prompt unless a custom file is supplied.
pub const DEFAULT_FORMAT_RULES: &str = "\
A transcript is a plain-text file holding one message per line.

Each message line has the form:

    <name>: <message>

- `<name>` is the speaking character, written in lowercase letters a-z only \
(no digits, spaces, punctuation or capitals).
- The name is followed by a colon and exactly one space.
- `<message>` is the rest of the line and must not be empty.
- Blank lines may appear between messages and are ignored.
- Any other kind of line is invalid.";

/// Builds the system prompt embedding the format rules.
#[must_use]
pub fn build_system_prompt(format_rules: &str) -> String {
    format!(
        "You are a conversation transcript generator. You produce theater-style \
conversation transcripts that strictly follow a specific format.\n\n\
## Format Rules\n\n\
{format_rules}\n\n\
## Critical Instructions\n\n\
- Output ONLY the conversation transcript, nothing else.\n\
- No headers, titles, labels, or commentary.\n\
- No markdown code fences.\n\
- Every non-blank line MUST match the pattern: <lowercase_name>: <message>\n\
- Character names must be strictly lowercase letters only.\n\
- Do not use any characters outside the ones specified.\n\
- Blank lines between messages are allowed but not required.\n"
    )
}

/// Builds the user prompt for one conversation.
#[must_use]
pub fn build_user_prompt(speakers: &[String], message_count: usize, topic: &str) -> String {
    let names = speakers.join(", ");
    format!(
        "Generate a conversation transcript between these characters: {names}\n\n\
The conversation should be about: {topic}\n\n\
Requirements:\n\
- Produce approximately {message_count} messages total.\n\
- Only use these exact character names: {names}\n\
- Each character should speak multiple times.\n\
- Make the dialogue natural and varied.\n\
- Follow the format rules exactly.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_embeds_rules() {
        let prompt = build_system_prompt("RULES GO HERE");
        assert!(prompt.contains("## Format Rules\n\nRULES GO HERE\n\n## Critical Instructions"));
        assert!(prompt.contains("No markdown code fences."));
    }

    #[test]
    fn test_user_prompt_names_speakers_topic_and_count() {
        let speakers = vec!["alex".to_string(), "sam".to_string()];
        let prompt = build_user_prompt(&speakers, 40, "planning a camping trip");

        assert!(prompt.starts_with("Generate a conversation transcript between these characters: alex, sam\n"));
        assert!(prompt.contains("about: planning a camping trip"));
        assert!(prompt.contains("approximately 40 messages"));
        assert!(prompt.contains("Only use these exact character names: alex, sam\n"));
    }
}
