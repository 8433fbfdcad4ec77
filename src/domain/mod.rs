//! Core domain layer. No external I/O dependencies.
//!
//! Entities, prompt/schema contract and deck layout live here. Dependencies flow inward.

pub mod deck;
pub mod entities;
pub mod errors;
pub mod prompt;
pub mod schema;
pub mod state;

pub use deck::{ContentSlide, Deck, DeckSlide, SlideTemplate, TitleSlide};
pub use entities::{
    ConfigField, GeneratedLesson, Grade, LessonConfig, LessonType, Level, SlideContent, Style,
    Unit,
};
pub use errors::DomainError;
pub use state::GenerationState;
