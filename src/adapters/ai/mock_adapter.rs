//! Mock AI adapter for running without API calls.
//!
//! Returns a canned lesson shaped like a real response, derived from the config.

use crate::domain::{DomainError, GeneratedLesson, LessonConfig, SlideContent};
use crate::ports::LessonGenerator;
use std::time::Duration;
use tracing::info;

/// Mock lesson generator.
///
/// Returns predetermined content without making API calls.
/// Simulates network latency with configurable delay.
pub struct MockAiAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockAiAdapter {
    /// Create a new mock adapter with default delay (800ms).
    pub fn new() -> Self {
        Self { delay_ms: 800 }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for MockAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn slide(title: String, points: &[&str], notes: Option<&str>, activity: &str) -> SlideContent {
    SlideContent {
        title,
        points: points.iter().map(|p| p.to_string()).collect(),
        teacher_notes: notes.map(str::to_string),
        activity_type: activity.to_string(),
    }
}

/// Eleven-slide lesson following the requested structure.
pub fn sample_lesson(config: &LessonConfig) -> GeneratedLesson {
    let heading = format!("{}: {}", config.unit, config.lesson_type);
    let mut slides = vec![
        slide(
            heading,
            &[
                "[MOCK] Objectives: talk about the unit topic",
                "Learn 5-7 new words",
                "Practise the target structure",
            ],
            None,
            "Introduction",
        ),
        slide(
            "Warm-up".into(),
            &["What did you do last weekend?", "Who did you go with?"],
            Some("Let pairs answer quickly, 3 minutes."),
            "Game",
        ),
        slide(
            "Vocabulary".into(),
            &[
                "compass /ˈkʌmpəs/ (n): com-pa",
                "uniform /ˈjuːnɪfɔːm/ (n): đồng phục",
            ],
            Some("Drill pronunciation, then check meaning."),
            "Vocabulary",
        ),
        slide(
            "Grammar".into(),
            &["S + V(s/es) + O", "Example: She rides her bike to school."],
            None,
            "Grammar",
        ),
        slide(
            "Pronunciation".into(),
            &["/ɑː/ and /ʌ/", "art, smart / brother, Monday"],
            None,
            "Presentation",
        ),
        slide(
            "Practice 1".into(),
            &["Match the words with the pictures.", "Answers: 1-c, 2-a, 3-b"],
            None,
            "Practice",
        ),
        slide(
            "Practice 2".into(),
            &["Fill in the blanks.", "Answers: has, do, play"],
            None,
            "Practice",
        ),
        slide(
            "Practice 3".into(),
            &["Choose the correct option.", "Answers: A, C, B"],
            None,
            "Practice",
        ),
        slide(
            "Production".into(),
            &["Role-play: introduce your school to a new friend."],
            None,
            "Speaking",
        ),
        slide(
            "Consolidation".into(),
            &["New words", "Target structure", "Speaking skill"],
            None,
            "Summary",
        ),
        slide(
            "Homework".into(),
            &["Learn the new words by heart.", "Do exercises in the workbook."],
            None,
            "Homework",
        ),
    ];
    if config.include_group_work {
        slides[8]
            .points
            .push("Work in groups of four.".to_string());
    }
    if config.include_mini_games {
        slides[1].activity_type = "Mini game".to_string();
    }

    GeneratedLesson {
        outline: format!(
            "[MOCK] Grade {} - {} - {} ({}, {}). Warm-up -> Presentation -> Practice -> Production -> Consolidation -> Homework.",
            config.grade, config.unit, config.lesson_type, config.level, config.style
        ),
        file_name: config.suggested_file_name(),
        slides,
    }
}

#[async_trait::async_trait]
impl LessonGenerator for MockAiAdapter {
    async fn generate(&self, config: &LessonConfig) -> Result<GeneratedLesson, DomainError> {
        info!(
            grade = %config.grade,
            unit = %config.unit,
            lesson = %config.lesson_type,
            "[MOCK] Simulating lesson generation"
        );

        // Simulate network delay
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        Ok(sample_lesson(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigField, Grade};

    #[tokio::test]
    async fn test_mock_adapter() {
        let adapter = MockAiAdapter::with_delay(10);
        let config = LessonConfig::default().with(ConfigField::Grade(Grade::Eight));

        let lesson = adapter.generate(&config).await.unwrap();

        assert_eq!(lesson.slides.len(), 11);
        assert_eq!(
            lesson.file_name,
            "English_8_Unit1_GettingStarted_GlobalSuccess.pptx"
        );
        assert!(lesson.outline.contains("Grade 8"));
        assert!(lesson.slides.iter().all(|s| s.points.len() <= 6));
    }

    #[test]
    fn test_toggles_shape_sample() {
        let off = LessonConfig::default()
            .with(ConfigField::GroupWork(false))
            .with(ConfigField::MiniGames(false));
        let lesson = sample_lesson(&off);
        assert_eq!(lesson.slides[1].activity_type, "Game");
        assert_eq!(lesson.slides[8].points.len(), 1);
    }
}
