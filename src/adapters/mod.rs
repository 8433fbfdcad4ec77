//! Infrastructure adapters. Implement outbound ports.
//!
//! AI providers, deck rendering, filesystem, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod export;
pub mod persistence;
pub mod ui;
