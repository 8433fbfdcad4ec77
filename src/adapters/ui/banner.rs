//! Startup banner: "EDU PPTX" in FIGlet with a blue-to-amber gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Primary blue (#3b82f6).
const PRIMARY: (u8, u8, u8) = (0x3b, 0x82, 0xf6);
/// Accent amber (#f59e0b).
const ACCENT: (u8, u8, u8) = (0xf5, 0x9e, 0x0b);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

fn banner_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("EDU PPTX").map(|fig| fig.to_string()))
        .unwrap_or_else(|| "EDU PPTX\n".to_string())
}

/// Prints the welcome banner, then the product line and version.
pub fn print_welcome() {
    let mut out = stdout();
    let art = banner_art();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(PRIMARY, ACCENT, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: PRIMARY.0,
        g: PRIMARY.1,
        b: PRIMARY.2,
    }));
    let _ = out.execute(Print(format!(
        "Gemini Edu PPTX Pro v{}\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print(
        "Sư phạm Tiếng Anh Global Success · Grade 6-9 · CTGDPT 2018\r\n\r\n",
    ));
    let _ = out.flush();
}
