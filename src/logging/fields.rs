//! Field extraction helpers for structured logging

use crate::gateway::CompletionResponse;

/// Extract token counts from a chat completion response
///
/// Returns a tuple of (prompt_tokens, completion_tokens, total_tokens).
/// Missing usage, or a missing counter, reads as 0.
pub fn extract_tokens(response: &CompletionResponse) -> (u32, u32, u32) {
    match &response.usage {
        Some(usage) => (
            usage.prompt_tokens.unwrap_or(0),
            usage.completion_tokens.unwrap_or(0),
            usage.total_tokens.unwrap_or(0),
        ),
        None => (0, 0, 0),
    }
}

/// Preview of the first choice's text content (privacy-safe)
///
/// Returns None unless content logging is enabled. When enabled, returns the
/// first ~100 characters of the content, or None if there is no text.
pub fn content_preview(
    response: &CompletionResponse,
    enable_content_logging: bool,
) -> Option<String> {
    if !enable_content_logging {
        return None;
    }

    let content = response
        .first_choice()?
        .message
        .as_ref()?
        .content
        .as_deref()?;

    if content.is_empty() {
        return None;
    }

    Some(truncate_string(content, 100))
}

/// Truncate to at most `max_chars` characters, appending "..." when cut
fn truncate_string(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}...", &s[..idx]),
    }
}
