//! Conversation context construction for each extraction attempt.

use crate::generator::ChatMessage;

/// Follow-up sent on every attempt after the first.
pub const CORRECTIVE_INSTRUCTION: &str =
    "Your previous answer was not valid JSON. Please try again and respond with ONLY a JSON object.";

/// Builds the conversation for the given 1-indexed attempt.
///
/// The first attempt carries only the task. Later attempts carry the task
/// followed by one corrective message; corrections never stack up.
///
/// # Examples
///
/// ```
/// use acquire::extraction::{build_attempt_context, CORRECTIVE_INSTRUCTION};
///
/// let first = build_attempt_context("count things", CORRECTIVE_INSTRUCTION, 1);
/// assert_eq!(first.len(), 1);
///
/// let third = build_attempt_context("count things", CORRECTIVE_INSTRUCTION, 3);
/// assert_eq!(third.len(), 2);
/// assert_eq!(third[1].content, CORRECTIVE_INSTRUCTION);
/// ```
#[must_use]
pub fn build_attempt_context(task: &str, corrective: &str, attempt: usize) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::user(task)];
    if attempt > 1 {
        messages.push(ChatMessage::user(corrective));
    }
    messages
}
