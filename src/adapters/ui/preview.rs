//! Terminal rendering of the three screens: idle guidance, error, and lesson preview.

use crate::domain::{GeneratedLesson, LessonConfig};
use crossterm::ExecutableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::fmt::Write as _;
use std::io::{Write, stdout};

const RULE: &str = "────────────────────────────────────────────────────────";

pub fn idle_text() -> String {
    concat!(
        "Sẵn sàng để soạn bài?\n",
        "Chọn lớp và bài học bạn muốn soạn, Gemini sẽ tự động thiết kế dàn ý sư phạm\n",
        "và nội dung từng slide theo chuẩn Global Success.\n\n",
        "Hướng dẫn: Hệ thống dựa trên cấu trúc SGK Global Success hiện hành để soạn\n",
        "mục tiêu, từ vựng và bài tập phù hợp với lứa tuổi THCS.\n"
    )
    .to_string()
}

pub fn loading_text(config: &LessonConfig) -> String {
    format!(
        "Đang soạn giáo án điện tử... Gemini đang phân tích chương trình Global Success lớp {}.",
        config.grade
    )
}

/// Plain-text preview: file name, outline, then one block per slide.
pub fn preview_text(lesson: &GeneratedLesson) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Đã hoàn thành soạn bài!");
    let _ = writeln!(out, "{}", lesson.file_name);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Dàn ý bài giảng sư phạm");
    let _ = writeln!(out, "{}", lesson.outline);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Chi tiết Slide ({})", lesson.slides.len());

    for (idx, slide) in lesson.slides.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Slide {} · {} [{}]",
            idx + 1,
            slide.title,
            slide.activity_type
        );
        for point in &slide.points {
            let _ = writeln!(out, "  • {}", point);
        }
        if let Some(notes) = &slide.teacher_notes {
            let _ = writeln!(out, "  Notes: {}", notes);
        }
    }
    out
}

fn print_colored(text: &str, color: Color, bold: bool) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(color));
    if bold {
        let _ = out.execute(SetAttribute(Attribute::Bold));
    }
    let _ = out.execute(Print(text));
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

pub fn print_idle() {
    print_colored(&idle_text(), Color::Grey, false);
    println!();
}

pub fn print_error(message: &str) {
    print_colored(&format!("✗ {}\n", message), Color::Red, true);
}

pub fn print_info(message: &str) {
    print_colored(&format!("{}\n", message), Color::DarkGrey, false);
}

pub fn print_success(message: &str) {
    print_colored(&format!("✓ {}\n", message), Color::Green, true);
}

/// Preview with the slide headings highlighted.
pub fn print_preview(lesson: &GeneratedLesson) {
    for line in preview_text(lesson).lines() {
        if line.starts_with("Slide ") {
            print_colored(&format!("{}\n", line), Color::Blue, true);
        } else if line.starts_with("  Notes:") {
            print_colored(&format!("{}\n", line), Color::DarkYellow, false);
        } else {
            println!("{}", line);
        }
    }
    println!();
}
