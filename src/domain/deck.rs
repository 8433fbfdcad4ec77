//! Deck layout model. What goes on each slide, independent of the file format.
//!
//! The first lesson slide becomes a full-bleed title slide; every other slide
//! sits on the shared template (header bar + series label) with a title,
//! bullet body and an activity badge.

use super::entities::GeneratedLesson;

/// Two-color scheme plus neutral text colors, as hex RGB.
pub mod palette {
    pub const PRIMARY: &str = "3B82F6";
    pub const ACCENT: &str = "F59E0B";
    pub const WHITE: &str = "FFFFFF";
    pub const TITLE_TEXT: &str = "1E293B";
    pub const BODY_TEXT: &str = "334155";
}

const LABEL_PREFIX: &str = "Global Success English";

/// Header bar and label shared by every content slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideTemplate {
    pub header_color: &'static str,
    pub label: String,
}

impl SlideTemplate {
    /// Label uses the second `_`-separated segment of the file name, which is
    /// the grade under the `English_<Grade>_...` convention.
    pub fn for_file_name(file_name: &str) -> Self {
        let label = match file_name.split('_').nth(1).filter(|s| !s.is_empty()) {
            Some(grade) => format!("{} - Grade {}", LABEL_PREFIX, grade),
            None => LABEL_PREFIX.to_string(),
        };
        Self {
            header_color: palette::PRIMARY,
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSlide {
    pub title: String,
    /// Points joined by newlines, centered under the title.
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSlide {
    pub title: String,
    pub bullets: Vec<String>,
    pub badge: String,
}

impl ContentSlide {
    /// Body text: one bullet per line, blank line between bullets.
    pub fn body_text(&self) -> String {
        self.bullets.join("\n\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckSlide {
    Title(TitleSlide),
    Content(ContentSlide),
}

impl DeckSlide {
    pub fn uses_template(&self) -> bool {
        matches!(self, DeckSlide::Content(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub template: SlideTemplate,
    pub slides: Vec<DeckSlide>,
}

impl Deck {
    /// One deck slide per lesson slide, in order.
    pub fn from_lesson(lesson: &GeneratedLesson) -> Self {
        let slides = lesson
            .slides
            .iter()
            .enumerate()
            .map(|(idx, slide)| {
                if idx == 0 {
                    DeckSlide::Title(TitleSlide {
                        title: slide.title.clone(),
                        summary: slide.points.join("\n"),
                    })
                } else {
                    DeckSlide::Content(ContentSlide {
                        title: slide.title.clone(),
                        bullets: slide.points.clone(),
                        badge: slide.activity_type.clone(),
                    })
                }
            })
            .collect();

        Self {
            template: SlideTemplate::for_file_name(&lesson.file_name),
            slides,
        }
    }
}
