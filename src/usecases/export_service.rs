//! Export service. Renders a lesson to deck bytes and stores them.

use crate::domain::{DomainError, GeneratedLesson};
use crate::ports::{DeckRenderer, DeckStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct ExportService {
    renderer: Arc<dyn DeckRenderer>,
    store: Arc<dyn DeckStore>,
}

impl ExportService {
    pub fn new(renderer: Arc<dyn DeckRenderer>, store: Arc<dyn DeckStore>) -> Self {
        Self { renderer, store }
    }

    /// Render and persist `lesson` under its own file name. Never mutates the lesson.
    pub async fn export(&self, lesson: &GeneratedLesson) -> Result<PathBuf, DomainError> {
        let bytes = self.renderer.render(lesson)?;
        info!(
            file_name = %lesson.file_name,
            slides = lesson.slides.len(),
            bytes = bytes.len(),
            format = self.renderer.extension(),
            "deck rendered"
        );
        self.store.save(&lesson.file_name, &bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::export::PptxRenderer;
    use crate::adapters::persistence::FsDeckStore;

    #[tokio::test]
    async fn test_export_writes_pptx() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = Arc::new(PptxRenderer::new());
        let store = Arc::new(FsDeckStore::new(dir.path(), renderer.extension()));
        let service = ExportService::new(renderer, store);

        let lesson = crate::adapters::ai::mock_adapter::sample_lesson(&Default::default());
        let path = service.export(&lesson).await.unwrap();

        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(lesson.file_name.as_str())
        );
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
