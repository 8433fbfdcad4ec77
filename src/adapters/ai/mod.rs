//! AI adapter module. Implements LessonGenerator for LLM providers.
//!
//! Gemini and OpenAI-compatible adapters, plus a mock adapter for offline runs.

pub mod gemini_adapter;
pub mod mock_adapter;
pub mod openai_adapter;

pub use gemini_adapter::GeminiAdapter;
pub use mock_adapter::MockAiAdapter;
pub use openai_adapter::OpenAiAdapter;

/// Longest error body kept in logs and error messages.
const BODY_SNIPPET_CHARS: usize = 200;

/// First 200 characters of an HTTP error body.
pub(crate) fn body_snippet(text: &str) -> String {
    text.chars().take(BODY_SNIPPET_CHARS).collect()
}
