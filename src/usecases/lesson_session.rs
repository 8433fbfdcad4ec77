//! Lesson session. Owns the configuration and the generation state and runs
//! the two user actions: generate and export.
//!
//! Failures are caught here, logged, and turned into the localized message
//! the UI shows. Neither action retries.

use crate::domain::{ConfigField, DomainError, GenerationState, LessonConfig};
use crate::ports::LessonGenerator;
use crate::usecases::ExportService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

pub struct LessonSession {
    config: LessonConfig,
    state: GenerationState,
    generator: Arc<dyn LessonGenerator>,
    exporter: ExportService,
}

impl LessonSession {
    pub fn new(generator: Arc<dyn LessonGenerator>, exporter: ExportService) -> Self {
        Self {
            config: LessonConfig::default(),
            state: GenerationState::Idle,
            generator,
            exporter,
        }
    }

    pub fn config(&self) -> &LessonConfig {
        &self.config
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Replace one configuration field. Does not touch the generation state.
    pub fn update(&mut self, field: ConfigField) {
        self.config = self.config.with(field);
    }

    /// Run one generation with the current configuration.
    ///
    /// Takes `&mut self`, so a second request cannot start while one is in flight.
    pub async fn generate(&mut self) -> &GenerationState {
        self.state = std::mem::take(&mut self.state).begin();
        let config = self.config.clone();

        let outcome = match self.generator.generate(&config).await {
            Ok(lesson) => {
                info!(
                    slides = lesson.slides.len(),
                    file_name = %lesson.file_name,
                    "generation ready"
                );
                Ok(lesson)
            }
            Err(e) => {
                error!(error = %e, grade = %config.grade, unit = %config.unit, "generation failed");
                Err(e.user_message())
            }
        };

        self.state = std::mem::take(&mut self.state).finish(outcome);
        &self.state
    }

    /// Export the current lesson. `Ok(None)` when there is nothing to export yet.
    pub async fn export(&self) -> Result<Option<PathBuf>, DomainError> {
        let Some(lesson) = self.state.lesson() else {
            info!("export requested before any lesson was generated; ignoring");
            return Ok(None);
        };
        match self.exporter.export(lesson).await {
            Ok(path) => Ok(Some(path)),
            Err(e) => {
                error!(error = %e, file_name = %lesson.file_name, "export failed");
                Err(e)
            }
        }
    }
}
