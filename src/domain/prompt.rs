//! Prompt construction for lesson generation.
//!
//! Provider-agnostic: every AI adapter sends the same instruction text.

use super::entities::LessonConfig;

pub const GROUP_WORK_INSTRUCTION: &str = "Hoạt động nhóm (Group work)";
pub const MINI_GAMES_INSTRUCTION: &str = "Mini game sinh động";

const ROLE: &str = "Bạn là một giáo viên Tiếng Anh THCS chuyên gia về bộ sách Global Success (Kết nối tri thức với cuộc sống).
Hãy soạn nội dung bài giảng PowerPoint chuyên nghiệp, bám sát CTGDPT 2018 cho:";

const SLIDE_REQUIREMENTS: &str = "YÊU CẦU NỘI DUNG TỪNG SLIDE (Mỗi slide ≤ 6 dòng text):
1. Slide 1 (Introduction): Tên Unit, Lesson, và 3-4 Objectives (Mục tiêu bài học) bằng Tiếng Anh.
2. Slide 2 (Warm-up): 1 trò chơi nhỏ (Lead-in) hoặc 3-5 câu hỏi thảo luận liên quan đến chủ đề bài học.
3. Slide 3-5 (Presentation):
   - Từ vựng: Liệt kê 5-7 từ mới quan trọng nhất của tiết học kèm IPA, Word class, Meaning (Tiếng Việt) và Example.
   - Ngữ pháp (nếu có): Cấu trúc, công thức rõ ràng, có ví dụ minh họa.
4. Slide 6-8 (Practice):
   - Các bài tập từ SGK được chuyển đổi thành dạng dễ dạy (Trắc nghiệm/Điền từ/Nối).
   - Có đáp án (Answers) hiển thị rõ ràng.
5. Slide 9 (Production): Hoạt động luyện tập thực tế (Nói/Viết/Đóng vai) áp dụng kiến thức vừa học.
6. Slide 10 (Consolidation): Tóm tắt lại 3 điểm chính đã học (Summary).
7. Slide 11 (Homework): 2-3 nhiệm vụ về nhà kèm lời dặn dò.";

const NOTES: &str = "LƯU Ý QUAN TRỌNG:
- Ngôn ngữ: Sử dụng Tiếng Anh là chính. Chú thích Tiếng Việt ở các phần giải nghĩa từ vựng hoặc hướng dẫn bài tập khó.
- Kiến thức: Phải chính xác theo chương trình Global Success của Bộ Giáo dục & Đào tạo Việt Nam.
- Sư phạm: Các hoạt động phải phát triển được 4 kỹ năng (Nghe - Nói - Đọc - Viết).";

/// Instruction text for the enabled optional activities, comma separated.
fn extras(config: &LessonConfig) -> String {
    let enabled: Vec<&str> = [
        (config.include_group_work, GROUP_WORK_INSTRUCTION),
        (config.include_mini_games, MINI_GAMES_INSTRUCTION),
    ]
    .into_iter()
    .filter_map(|(on, text)| on.then_some(text))
    .collect();

    if enabled.is_empty() {
        "Không có hoạt động bổ sung".to_string()
    } else {
        enabled.join(", ")
    }
}

/// Build the full generation prompt. Each config value appears once, on its own labelled line.
pub fn build_prompt(config: &LessonConfig) -> String {
    format!(
        "{ROLE}

THÔNG TIN BÀI HỌC:
- Lớp: {grade}
- Sách: Global Success (Bộ Kết nối tri thức)
- Đơn vị bài: {unit}
- Tiết học (Lesson): {lesson}
- Mức độ: {level}
- Phong cách giảng dạy: {style}
- Bao gồm: {extras}

{SLIDE_REQUIREMENTS}

{NOTES}
",
        grade = config.grade,
        unit = config.unit,
        lesson = config.lesson_type,
        level = config.level,
        style = config.style,
        extras = extras(config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ConfigField, Grade, LessonType, Level, Style, Unit};

    #[test]
    fn test_default_config_literals() {
        let prompt = build_prompt(&LessonConfig::default());
        assert!(prompt.contains("Lớp: 6"));
        assert!(prompt.contains("Unit 1"));
        assert!(prompt.contains("Getting Started"));
        assert!(prompt.contains("Chuẩn"));
        assert!(prompt.contains("Sinh động – Trò chơi"));
        assert!(prompt.contains(GROUP_WORK_INSTRUCTION));
        assert!(prompt.contains(MINI_GAMES_INSTRUCTION));
    }

    #[test]
    fn test_every_value_embedded_once() {
        for grade in Grade::ALL {
            for unit in Unit::all() {
                for lesson in LessonType::ALL {
                    for level in Level::ALL {
                        for style in Style::ALL {
                            let cfg = LessonConfig {
                                grade,
                                unit,
                                lesson_type: lesson,
                                level,
                                style,
                                include_group_work: true,
                                include_mini_games: true,
                            };
                            let prompt = build_prompt(&cfg);
                            assert_eq!(prompt.matches(&format!("Lớp: {grade}\n")).count(), 1);
                            assert_eq!(prompt.matches(&format!(": {unit}\n")).count(), 1);
                            assert_eq!(prompt.matches(lesson.label()).count(), 1);
                            assert_eq!(prompt.matches(level.label()).count(), 1);
                            assert_eq!(prompt.matches(style.label()).count(), 1);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_toggles_control_instruction_text() {
        let base = LessonConfig::default();

        let no_group = build_prompt(&base.with(ConfigField::GroupWork(false)));
        assert!(!no_group.contains(GROUP_WORK_INSTRUCTION));
        assert!(no_group.contains(MINI_GAMES_INSTRUCTION));

        let none = build_prompt(
            &base
                .with(ConfigField::GroupWork(false))
                .with(ConfigField::MiniGames(false)),
        );
        assert!(!none.contains(GROUP_WORK_INSTRUCTION));
        assert!(!none.contains(MINI_GAMES_INSTRUCTION));
        assert!(none.contains("- Bao gồm: Không có hoạt động bổ sung"));
    }
}
