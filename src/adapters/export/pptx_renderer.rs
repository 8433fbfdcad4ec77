//! Implements DeckRenderer for PowerPoint (.pptx).
//!
//! Lays the lesson out as a [`Deck`] and writes the OOXML package into an
//! in-memory zip. Layout 1 is a blank title layout; layout 2 carries the shared
//! header bar and series label.

use super::ooxml::{self, Align, Frame, Paragraph, Rel, TextStyle};
use crate::domain::deck::{ContentSlide, Deck, DeckSlide, SlideTemplate, TitleSlide, palette};
use crate::domain::{DomainError, GeneratedLesson};
use crate::ports::DeckRenderer;
use chrono::Utc;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const TITLE_LAYOUT: usize = 1;
const CONTENT_LAYOUT: usize = 2;
const LAYOUT_COUNT: usize = 2;

const HEADER_BAR: Frame = Frame::new(0.0, 0.0, ooxml::SLIDE_WIDTH_IN, 0.6);
const HEADER_LABEL: Frame = Frame::new(0.2, 0.1, 7.6, 0.4);
const COVER_TITLE: Frame = Frame::new(0.5, 2.0, 9.0, 1.2);
const COVER_SUMMARY: Frame = Frame::new(0.5, 3.5, 9.0, 1.6);
const CONTENT_TITLE: Frame = Frame::new(0.5, 0.7, 9.0, 0.7);
const CONTENT_BODY: Frame = Frame::new(0.5, 1.5, 9.0, 3.5);
const BADGE: Frame = Frame::new(8.0, 0.1, 1.8, 0.4);

const TITLE_FONT: &str = "Quicksand";

/// PowerPoint renderer.
#[derive(Debug, Default)]
pub struct PptxRenderer;

impl PptxRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Build the full package for `deck`.
    pub fn render_deck(&self, deck: &Deck, title: &str) -> Result<Vec<u8>, DomainError> {
        let slide_count = deck.slides.len();
        let mut parts: Vec<(String, String)> = vec![
            (
                "[Content_Types].xml".into(),
                ooxml::content_types_xml(LAYOUT_COUNT, slide_count),
            ),
            ("_rels/.rels".into(), ooxml::package_rels()),
            (
                "docProps/core.xml".into(),
                ooxml::core_props_xml(title, &Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()),
            ),
            ("docProps/app.xml".into(), ooxml::app_props_xml(slide_count)),
            (
                "ppt/presentation.xml".into(),
                ooxml::presentation_xml(slide_count),
            ),
            (
                "ppt/_rels/presentation.xml.rels".into(),
                ooxml::presentation_rels(slide_count),
            ),
            ("ppt/presProps.xml".into(), ooxml::pres_props_xml()),
            ("ppt/viewProps.xml".into(), ooxml::view_props_xml()),
            ("ppt/tableStyles.xml".into(), ooxml::table_styles_xml()),
            ("ppt/theme/theme1.xml".into(), ooxml::theme_xml()),
            (
                "ppt/slideMasters/slideMaster1.xml".into(),
                ooxml::slide_master_xml(LAYOUT_COUNT),
            ),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels".into(),
                ooxml::relationships_xml(&[
                    Rel::new(1, "slideLayout", "../slideLayouts/slideLayout1.xml"),
                    Rel::new(2, "slideLayout", "../slideLayouts/slideLayout2.xml"),
                    Rel::new(3, "theme", "../theme/theme1.xml"),
                ]),
            ),
            (
                "ppt/slideLayouts/slideLayout1.xml".into(),
                ooxml::slide_layout_xml("Title Slide", &[]),
            ),
            (
                "ppt/slideLayouts/slideLayout2.xml".into(),
                ooxml::slide_layout_xml("Lesson Content", &template_shapes(&deck.template)),
            ),
        ];
        for layout in 1..=LAYOUT_COUNT {
            parts.push((
                format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", layout),
                ooxml::relationships_xml(&[Rel::new(
                    1,
                    "slideMaster",
                    "../slideMasters/slideMaster1.xml",
                )]),
            ));
        }

        for (idx, slide) in deck.slides.iter().enumerate() {
            let number = idx + 1;
            let (xml, layout) = match slide {
                DeckSlide::Title(cover) => (title_slide_xml(cover), TITLE_LAYOUT),
                DeckSlide::Content(content) => (content_slide_xml(content), CONTENT_LAYOUT),
            };
            parts.push((format!("ppt/slides/slide{}.xml", number), xml));
            parts.push((
                format!("ppt/slides/_rels/slide{}.xml.rels", number),
                ooxml::relationships_xml(&[Rel::new(
                    1,
                    "slideLayout",
                    format!("../slideLayouts/slideLayout{}.xml", layout),
                )]),
            ));
        }

        let bytes = write_zip(&parts)?;
        debug!(slides = slide_count, bytes = bytes.len(), "pptx package assembled");
        Ok(bytes)
    }
}

impl DeckRenderer for PptxRenderer {
    fn extension(&self) -> &'static str {
        "pptx"
    }

    fn render(&self, lesson: &GeneratedLesson) -> Result<Vec<u8>, DomainError> {
        let deck = Deck::from_lesson(lesson);
        let title = lesson
            .slides
            .first()
            .map(|s| s.title.as_str())
            .unwrap_or(lesson.file_name.as_str());
        self.render_deck(&deck, title)
    }
}

fn write_zip(parts: &[(String, String)]) -> Result<Vec<u8>, DomainError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in parts {
        zip.start_file(name.as_str(), options)
            .map_err(|e| DomainError::Export(format!("zip entry {}: {}", name, e)))?;
        zip.write_all(content.as_bytes())
            .map_err(|e| DomainError::Export(format!("write {}: {}", name, e)))?;
    }
    let cursor = zip
        .finish()
        .map_err(|e| DomainError::Export(format!("finish zip: {}", e)))?;
    Ok(cursor.into_inner())
}

fn template_shapes(template: &SlideTemplate) -> Vec<String> {
    let label_style = TextStyle {
        size_pt: 14,
        color: palette::WHITE,
        bold: false,
        font: None,
        align: Align::Left,
        middle: true,
    };
    vec![
        ooxml::rect_shape(2, "Header Bar", HEADER_BAR, template.header_color),
        ooxml::text_shape(
            3,
            "Header Label",
            HEADER_LABEL,
            &[Paragraph::Text(template.label.clone())],
            &label_style,
            None,
        ),
    ]
}

fn title_slide_xml(cover: &TitleSlide) -> String {
    let title_style = TextStyle {
        size_pt: 36,
        color: palette::WHITE,
        bold: true,
        font: Some(TITLE_FONT),
        align: Align::Center,
        middle: true,
    };
    let summary_style = TextStyle {
        size_pt: 18,
        color: palette::WHITE,
        bold: false,
        font: None,
        align: Align::Center,
        middle: false,
    };
    let mut shapes = vec![ooxml::text_shape(
        2,
        "Title",
        COVER_TITLE,
        &[Paragraph::Text(cover.title.clone())],
        &title_style,
        None,
    )];
    if !cover.summary.is_empty() {
        let lines: Vec<Paragraph> = cover
            .summary
            .split('\n')
            .map(|l| Paragraph::Text(l.to_string()))
            .collect();
        shapes.push(ooxml::text_shape(
            3,
            "Summary",
            COVER_SUMMARY,
            &lines,
            &summary_style,
            None,
        ));
    }
    ooxml::slide_xml(Some(palette::PRIMARY), &shapes)
}

/// Bullets separated by blank paragraphs.
fn body_paragraphs(content: &ContentSlide) -> Vec<Paragraph> {
    let mut paragraphs = Vec::with_capacity(content.bullets.len() * 2);
    for (i, bullet) in content.bullets.iter().enumerate() {
        if i > 0 {
            paragraphs.push(Paragraph::Blank);
        }
        paragraphs.push(Paragraph::Bullet(bullet.clone()));
    }
    paragraphs
}

fn content_slide_xml(content: &ContentSlide) -> String {
    let title_style = TextStyle {
        size_pt: 28,
        color: palette::TITLE_TEXT,
        bold: true,
        font: Some(TITLE_FONT),
        align: Align::Left,
        middle: true,
    };
    let body_style = TextStyle {
        size_pt: 20,
        color: palette::BODY_TEXT,
        bold: false,
        font: None,
        align: Align::Left,
        middle: false,
    };
    let badge_style = TextStyle {
        size_pt: 12,
        color: palette::WHITE,
        bold: true,
        font: None,
        align: Align::Center,
        middle: true,
    };

    let mut shapes = vec![ooxml::text_shape(
        2,
        "Title",
        CONTENT_TITLE,
        &[Paragraph::Text(content.title.clone())],
        &title_style,
        None,
    )];
    if !content.bullets.is_empty() {
        shapes.push(ooxml::text_shape(
            3,
            "Body",
            CONTENT_BODY,
            &body_paragraphs(content),
            &body_style,
            None,
        ));
    }
    shapes.push(ooxml::text_shape(
        4,
        "Activity Badge",
        BADGE,
        &[Paragraph::Text(content.badge.clone())],
        &badge_style,
        Some(palette::ACCENT),
    ));
    ooxml::slide_xml(None, &shapes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SlideContent;
    use std::io::Read;
    use zip::ZipArchive;

    fn lesson(slides: Vec<SlideContent>) -> GeneratedLesson {
        GeneratedLesson {
            outline: "outline".into(),
            file_name: "English_9_Unit4_Skills2_GlobalSuccess.pptx".into(),
            slides,
        }
    }

    fn slide(title: &str, points: &[&str], activity: &str) -> SlideContent {
        SlideContent {
            title: title.into(),
            points: points.iter().map(|p| p.to_string()).collect(),
            teacher_notes: Some("notes".into()),
            activity_type: activity.into(),
        }
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    fn slide_parts(bytes: &[u8]) -> Vec<String> {
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        archive
            .file_names()
            .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_n_slides_in_package() {
        let bytes = PptxRenderer::new()
            .render(&lesson(vec![
                slide("Unit 4: Remembering the Past", &["Objectives"], "Intro"),
                slide("Warm-up", &["Q1"], "Game"),
                slide("Practice", &["Ex 1", "Ex 2"], "Practice"),
            ]))
            .unwrap();

        assert_eq!(slide_parts(&bytes).len(), 3);

        let rels1 = read_part(&bytes, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels1.contains("slideLayout1.xml"));
        for n in 2..=3 {
            let rels = read_part(&bytes, &format!("ppt/slides/_rels/slide{}.xml.rels", n));
            assert!(rels.contains("slideLayout2.xml"));
        }

        let presentation = read_part(&bytes, "ppt/presentation.xml");
        assert_eq!(presentation.matches("<p:sldId ").count(), 3);
    }

    #[test]
    fn test_title_slide_style() {
        let bytes = PptxRenderer::new()
            .render(&lesson(vec![slide("Welcome", &["Line A", "Line B"], "Intro")]))
            .unwrap();
        let xml = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(xml.contains(r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="3B82F6"/>"#));
        assert!(xml.contains("<a:t>Welcome</a:t>"));
        assert!(xml.contains("<a:t>Line A</a:t>"));
        assert!(xml.contains("<a:t>Line B</a:t>"));
        assert!(xml.contains(r#"algn="ctr""#));
        // no badge on the title slide
        assert!(!xml.contains("Activity Badge"));
    }

    #[test]
    fn test_content_slide_and_template() {
        let bytes = PptxRenderer::new()
            .render(&lesson(vec![
                slide("Cover", &[], "Intro"),
                slide("Vocabulary", &["a & b", "c"], "Vocabulary"),
            ]))
            .unwrap();
        let xml = read_part(&bytes, "ppt/slides/slide2.xml");
        assert!(xml.contains("<a:t>Vocabulary</a:t>"));
        assert!(xml.contains("<a:t>a &amp; b</a:t>"));
        assert_eq!(xml.matches("<a:buChar").count(), 2);
        assert_eq!(xml.matches("<a:endParaRPr").count(), 1);
        assert!(xml.contains(r#"<a:srgbClr val="F59E0B"/>"#));
        assert!(!xml.contains("<p:bg>"));

        let layout = read_part(&bytes, "ppt/slideLayouts/slideLayout2.xml");
        assert!(layout.contains("Global Success English - Grade 9"));
        assert!(layout.contains(r#"<a:srgbClr val="3B82F6"/>"#));
    }

    #[test]
    fn test_empty_points_render_title_and_badge_only() {
        let bytes = PptxRenderer::new()
            .render(&lesson(vec![
                slide("Cover", &[], "Intro"),
                slide("Homework", &[], "Homework"),
            ]))
            .unwrap();
        let cover = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(!cover.contains("Summary"));

        let xml = read_part(&bytes, "ppt/slides/slide2.xml");
        assert!(xml.contains("<a:t>Homework</a:t>"));
        assert!(xml.contains("Activity Badge"));
        assert!(!xml.contains(r#"name="Body""#));
    }

    #[test]
    fn test_empty_lesson_is_valid_package() {
        let bytes = PptxRenderer::new().render(&lesson(vec![])).unwrap();
        assert!(slide_parts(&bytes).is_empty());
        let ct = read_part(&bytes, "[Content_Types].xml");
        assert!(ct.contains("presentation.main+xml"));
    }

    #[test]
    fn test_extension() {
        assert_eq!(PptxRenderer::new().extension(), "pptx");
    }
}
