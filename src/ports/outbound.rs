//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, GeneratedLesson, LessonConfig};
use std::path::PathBuf;

/// Lesson content generator (LLM provider).
#[async_trait::async_trait]
pub trait LessonGenerator: Send + Sync {
    /// Generate a complete lesson for `config`. All-or-nothing: any transport
    /// error or schema mismatch is `DomainError::Generation`.
    async fn generate(&self, config: &LessonConfig) -> Result<GeneratedLesson, DomainError>;
}

/// Deck encoder. Turns a lesson into the bytes of a presentation file.
pub trait DeckRenderer: Send + Sync {
    /// File extension of the produced format, without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, lesson: &GeneratedLesson) -> Result<Vec<u8>, DomainError>;
}

/// Deck storage. Persists rendered bytes under a file name.
#[async_trait::async_trait]
pub trait DeckStore: Send + Sync {
    /// Write `bytes` as `file_name`; returns the final path. A failed write
    /// leaves nothing at that path.
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, DomainError>;
}
