//! Cross-cutting pieces shared by wiring and adapters.

pub mod config;
