//! Persistence adapters. Implements DeckStore.

pub mod fs_deck_store;

pub use fs_deck_store::FsDeckStore;
