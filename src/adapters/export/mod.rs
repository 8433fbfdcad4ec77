//! Deck export adapters. Implements DeckRenderer.

pub mod ooxml;
pub mod pptx_renderer;

pub use pptx_renderer::PptxRenderer;
