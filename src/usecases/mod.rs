//! Application use cases. Orchestrate domain logic via ports.

pub mod export_service;
pub mod lesson_session;

pub use export_service::ExportService;
pub use lesson_session::LessonSession;
