//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/IO types here. The option enums only admit the values the
//! textbook series actually has, so a `LessonConfig` is always valid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// School grade covered by the Global Success series (lower secondary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    Six,
    Seven,
    Eight,
    Nine,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Six, Grade::Seven, Grade::Eight, Grade::Nine];

    pub fn number(self) -> u8 {
        match self {
            Grade::Six => 6,
            Grade::Seven => 7,
            Grade::Eight => 8,
            Grade::Nine => 9,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Textbook unit, `Unit 1` through `Unit 12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Unit(u8);

impl Unit {
    pub const COUNT: u8 = 12;

    /// Returns `None` outside 1..=12.
    pub fn new(number: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// All units in textbook order.
    pub fn all() -> impl Iterator<Item = Unit> {
        (1..=Self::COUNT).map(Unit)
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unit {}", self.0)
    }
}

/// Lesson (period) inside a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonType {
    GettingStarted,
    ACloserLook1,
    ACloserLook2,
    Communication,
    Skills1,
    Skills2,
    LookingBackProject,
}

impl LessonType {
    pub const ALL: [LessonType; 7] = [
        LessonType::GettingStarted,
        LessonType::ACloserLook1,
        LessonType::ACloserLook2,
        LessonType::Communication,
        LessonType::Skills1,
        LessonType::Skills2,
        LessonType::LookingBackProject,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LessonType::GettingStarted => "Getting Started",
            LessonType::ACloserLook1 => "A Closer Look 1",
            LessonType::ACloserLook2 => "A Closer Look 2",
            LessonType::Communication => "Communication",
            LessonType::Skills1 => "Skills 1",
            LessonType::Skills2 => "Skills 2",
            LessonType::LookingBackProject => "Looking Back & Project",
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Basic,
    Standard,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Basic, Level::Standard, Level::Advanced];

    pub fn label(self) -> &'static str {
        match self {
            Level::Basic => "Cơ bản",
            Level::Standard => "Chuẩn",
            Level::Advanced => "Nâng cao",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Teaching style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Traditional,
    Dynamic,
    Competency,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Traditional, Style::Dynamic, Style::Competency];

    pub fn label(self) -> &'static str {
        match self {
            Style::Traditional => "Truyền thống",
            Style::Dynamic => "Sinh động – Trò chơi",
            Style::Competency => "Phát triển năng lực",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters of the lesson to generate. Lives only for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonConfig {
    pub grade: Grade,
    pub unit: Unit,
    pub lesson_type: LessonType,
    pub level: Level,
    pub style: Style,
    pub include_group_work: bool,
    pub include_mini_games: bool,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            grade: Grade::Six,
            unit: Unit::default(),
            lesson_type: LessonType::GettingStarted,
            level: Level::Standard,
            style: Style::Dynamic,
            include_group_work: true,
            include_mini_games: true,
        }
    }
}

/// A single-field change to a [`LessonConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Grade(Grade),
    Unit(Unit),
    LessonType(LessonType),
    Level(Level),
    Style(Style),
    GroupWork(bool),
    MiniGames(bool),
}

impl LessonConfig {
    /// Returns a copy with exactly `field` replaced.
    pub fn with(&self, field: ConfigField) -> Self {
        let mut next = self.clone();
        match field {
            ConfigField::Grade(v) => next.grade = v,
            ConfigField::Unit(v) => next.unit = v,
            ConfigField::LessonType(v) => next.lesson_type = v,
            ConfigField::Level(v) => next.level = v,
            ConfigField::Style(v) => next.style = v,
            ConfigField::GroupWork(v) => next.include_group_work = v,
            ConfigField::MiniGames(v) => next.include_mini_games = v,
        }
        next
    }

    /// Deck file name following `English_<Grade>_<Unit>_<Lesson>_GlobalSuccess.pptx`.
    pub fn suggested_file_name(&self) -> String {
        let lesson: String = self
            .lesson_type
            .label()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        format!(
            "English_{}_Unit{}_{}_GlobalSuccess.pptx",
            self.grade,
            self.unit.number(),
            lesson
        )
    }
}

/// One slide as produced by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideContent {
    pub title: String,
    /// One entry per bullet line. The prompt caps these at six.
    pub points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_notes: Option<String>,
    pub activity_type: String,
}

/// Complete generation result. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLesson {
    pub outline: String,
    pub file_name: String,
    pub slides: Vec<SlideContent>,
}
