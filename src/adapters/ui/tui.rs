//! Implements InputPort. Inquire-based interactive prompts.
//!
//! A main menu shows the current configuration; each entry either edits one
//! field, runs a generation, shows the preview, or exports the deck.

use crate::adapters::ui::preview;
use crate::domain::{
    ConfigField, DomainError, GenerationState, Grade, LessonConfig, LessonType, Level, Style, Unit,
};
use crate::ports::InputPort;
use crate::usecases::LessonSession;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::error::InquireError;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use inquire::Select;
use std::fmt;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Blue prompt prefix and amber highlight, matching the deck palette.
pub fn apply_theme() {
    let mut config = RenderConfig::default();
    config.prompt_prefix = Styled::new("?").with_fg(Color::LightBlue);
    config.highlighted_option_prefix = Styled::new("›").with_fg(Color::LightYellow);
    config.selected_option = Some(StyleSheet::new().with_fg(Color::LightYellow));
    config.answer = StyleSheet::new()
        .with_fg(Color::LightBlue)
        .with_attr(Attributes::BOLD);
    config.help_message = StyleSheet::new().with_fg(Color::DarkGrey);
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Grade,
    Unit,
    LessonType,
    Level,
    Style,
    GroupWork,
    MiniGames,
    Generate,
    Preview,
    Download,
    Quit,
}

/// One main-menu row; the label carries the current value.
struct MenuEntry {
    action: MenuAction,
    label: String,
}

impl fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "[x]" } else { "[ ]" }
}

fn menu_entries(config: &LessonConfig, has_lesson: bool) -> Vec<MenuEntry> {
    let entry = |action, label: String| MenuEntry { action, label };
    vec![
        entry(MenuAction::Grade, format!("Khối lớp: Lớp {}", config.grade)),
        entry(MenuAction::Unit, format!("Đơn vị bài (Unit): {}", config.unit)),
        entry(MenuAction::LessonType, format!("Tiết học: {}", config.lesson_type)),
        entry(MenuAction::Level, format!("Mức độ: {}", config.level)),
        entry(MenuAction::Style, format!("Phong cách: {}", config.style)),
        entry(
            MenuAction::GroupWork,
            format!("{} Hoạt động nhóm", on_off(config.include_group_work)),
        ),
        entry(
            MenuAction::MiniGames,
            format!("{} Mini game cuối bài", on_off(config.include_mini_games)),
        ),
        entry(MenuAction::Generate, "Soạn bài ngay".to_string()),
        entry(MenuAction::Preview, "Xem trước".to_string()),
        entry(
            MenuAction::Download,
            if has_lesson {
                "Tải về (.pptx)".to_string()
            } else {
                "Tải về (.pptx) (chưa có bài soạn)".to_string()
            },
        ),
        entry(MenuAction::Quit, "Thoát".to_string()),
    ]
}

/// `Ok(None)` when the user backs out with Esc or Ctrl-C.
fn cancellable<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Input(e.to_string())),
    }
}

/// Single choice with the cursor on the current value.
fn choose<T>(message: &str, options: Vec<T>, current: T) -> Result<Option<T>, DomainError>
where
    T: fmt::Display + PartialEq + Copy,
{
    let cursor = options.iter().position(|o| *o == current).unwrap_or(0);
    cancellable(
        Select::new(message, options)
            .with_starting_cursor(cursor)
            .with_page_size(12)
            .prompt(),
    )
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Current screen: idle guidance, error, or preview.
fn show_state(state: &GenerationState) {
    match state {
        GenerationState::Idle => preview::print_idle(),
        GenerationState::Generating { .. } => {}
        GenerationState::Ready(lesson) => preview::print_preview(lesson),
        GenerationState::Failed { message, previous } => {
            preview::print_error(message);
            if let Some(lesson) = previous {
                preview::print_info("Bài soạn trước đó vẫn được giữ lại:");
                preview::print_preview(lesson);
            }
        }
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    session: Mutex<LessonSession>,
}

impl TuiInputPort {
    pub fn new(session: LessonSession) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    /// Prompt for the new value of one field. `None` when the user backs out.
    fn edit(action: MenuAction, config: &LessonConfig) -> Result<Option<ConfigField>, DomainError> {
        let field = match action {
            MenuAction::Grade => {
                choose("Khối lớp", Grade::ALL.to_vec(), config.grade)?.map(ConfigField::Grade)
            }
            MenuAction::Unit => {
                choose("Đơn vị bài (Unit)", Unit::all().collect(), config.unit)?
                    .map(ConfigField::Unit)
            }
            MenuAction::LessonType => choose(
                "Tiết học (Lesson)",
                LessonType::ALL.to_vec(),
                config.lesson_type,
            )?
            .map(ConfigField::LessonType),
            MenuAction::Level => {
                choose("Mức độ", Level::ALL.to_vec(), config.level)?.map(ConfigField::Level)
            }
            MenuAction::Style => {
                choose("Phong cách giảng dạy", Style::ALL.to_vec(), config.style)?
                    .map(ConfigField::Style)
            }
            MenuAction::GroupWork => Some(ConfigField::GroupWork(!config.include_group_work)),
            MenuAction::MiniGames => Some(ConfigField::MiniGames(!config.include_mini_games)),
            _ => None,
        };
        Ok(field)
    }

    async fn run_generate(&self) {
        let mut session = self.session.lock().await;
        let pb = spinner(preview::loading_text(session.config()));
        let state = session.generate().await;
        pb.finish_and_clear();
        show_state(state);
    }

    async fn run_download(&self) {
        let session = self.session.lock().await;
        match session.export().await {
            Ok(Some(path)) => preview::print_success(&format!("Đã lưu: {}", path.display())),
            Ok(None) => preview::print_info("Chưa có bài soạn. Chọn \"Soạn bài ngay\" trước."),
            Err(e) => preview::print_error(&e.user_message()),
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        show_state(self.session.lock().await.state());

        loop {
            let (config, has_lesson) = {
                let session = self.session.lock().await;
                (session.config().clone(), session.state().lesson().is_some())
            };

            let picked = cancellable(
                Select::new("Cấu hình bài dạy", menu_entries(&config, has_lesson))
                    .with_page_size(12)
                    .prompt(),
            )?;
            let Some(entry) = picked else {
                break;
            };
            debug!(action = ?entry.action, "menu");

            match entry.action {
                MenuAction::Generate => self.run_generate().await,
                MenuAction::Preview => show_state(self.session.lock().await.state()),
                MenuAction::Download => self.run_download().await,
                MenuAction::Quit => break,
                action => {
                    if let Some(field) = Self::edit(action, &config)? {
                        self.session.lock().await.update(field);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_shows_current_values() {
        let config = LessonConfig::default().with(ConfigField::Grade(Grade::Eight));
        let labels: Vec<String> = menu_entries(&config, false)
            .iter()
            .map(|e| e.to_string())
            .collect();

        assert!(labels.contains(&"Khối lớp: Lớp 8".to_string()));
        assert!(labels.contains(&"Đơn vị bài (Unit): Unit 1".to_string()));
        assert!(labels.contains(&"[x] Hoạt động nhóm".to_string()));
        assert!(labels.contains(&"Tải về (.pptx) (chưa có bài soạn)".to_string()));
    }

    #[test]
    fn test_download_label_with_lesson() {
        let entries = menu_entries(&LessonConfig::default(), true);
        assert!(entries.iter().any(|e| e.label == "Tải về (.pptx)"));
        assert_eq!(entries.last().map(|e| e.action), Some(MenuAction::Quit));
    }

    #[test]
    fn test_toggles_flip() {
        let config = LessonConfig::default();
        let field = TuiInputPort::edit(MenuAction::MiniGames, &config).unwrap();
        assert_eq!(field, Some(ConfigField::MiniGames(false)));
    }

    #[test]
    fn test_cancel_is_not_an_error() {
        let r: Result<Option<u8>, _> = cancellable(Err(InquireError::OperationCanceled));
        assert!(matches!(r, Ok(None)));
        let r: Result<Option<u8>, _> = cancellable(Err(InquireError::NotTTY));
        assert!(matches!(r, Err(DomainError::Input(_))));
    }
}
