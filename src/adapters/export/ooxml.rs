//! PresentationML building blocks: fixed package parts, relationship and
//! content-type listings, and shape/paragraph XML for the deck renderer.

use std::fmt::Write as _;

pub const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CT_BASE: &str = "application/vnd.openxmlformats-officedocument";

/// 16:9 slide, 10in x 5.625in.
pub const SLIDE_WIDTH_IN: f64 = 10.0;
pub const SLIDE_HEIGHT_IN: f64 = 5.625;

const EMU_PER_INCH: f64 = 914_400.0;

pub fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Escape text for element content and attribute values. Drops characters
/// XML 1.0 cannot carry.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

/// Position and size in inches.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Frame {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    fn xfrm(&self) -> String {
        format!(
            r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
            emu(self.x),
            emu(self.y),
            emu(self.w),
            emu(self.h)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size_pt: u32,
    pub color: &'static str,
    pub bold: bool,
    pub font: Option<&'static str>,
    pub align: Align,
    /// Vertical anchor: top when false, middle when true.
    pub middle: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paragraph {
    Text(String),
    Bullet(String),
    Blank,
}

fn run_props(style: &TextStyle) -> String {
    let mut rpr = format!(r#"<a:rPr lang="en-US" sz="{}""#, style.size_pt * 100);
    if style.bold {
        rpr.push_str(r#" b="1""#);
    }
    let _ = write!(
        rpr,
        r#" dirty="0"><a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
        style.color
    );
    if let Some(font) = style.font {
        let _ = write!(rpr, r#"<a:latin typeface="{}"/>"#, escape(font));
    }
    rpr.push_str("</a:rPr>");
    rpr
}

/// Runs for one paragraph; embedded newlines become line breaks.
fn runs(text: &str, style: &TextStyle) -> String {
    let rpr = run_props(style);
    text.split('\n')
        .map(|line| format!("<a:r>{}<a:t>{}</a:t></a:r>", rpr, escape(line)))
        .collect::<Vec<_>>()
        .join("<a:br/>")
}

fn paragraph_xml(p: &Paragraph, style: &TextStyle) -> String {
    let algn = match style.align {
        Align::Left => "l",
        Align::Center => "ctr",
    };
    match p {
        Paragraph::Text(text) => format!(
            r#"<a:p><a:pPr algn="{}"><a:buNone/></a:pPr>{}</a:p>"#,
            algn,
            runs(text, style)
        ),
        Paragraph::Bullet(text) => format!(
            r#"<a:p><a:pPr marL="342900" indent="-342900" algn="{}"><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/></a:pPr>{}</a:p>"#,
            algn,
            runs(text, style)
        ),
        Paragraph::Blank => format!(
            r#"<a:p><a:pPr algn="{}"><a:buNone/></a:pPr><a:endParaRPr lang="en-US" sz="{}" dirty="0"/></a:p>"#,
            algn,
            style.size_pt * 100
        ),
    }
}

fn solid_fill(color: &str) -> String {
    format!(r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, color)
}

/// Text box shape, optionally filled.
pub fn text_shape(
    id: u32,
    name: &str,
    frame: Frame,
    paragraphs: &[Paragraph],
    style: &TextStyle,
    fill: Option<&str>,
) -> String {
    let fill_xml = fill.map(solid_fill).unwrap_or_else(|| "<a:noFill/>".to_string());
    let anchor = if style.middle { "ctr" } else { "t" };
    let body: String = paragraphs.iter().map(|p| paragraph_xml(p, style)).collect();
    format!(
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
            r#"<p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>{fill}</p:spPr>"#,
            r#"<p:txBody><a:bodyPr wrap="square" rtlCol="0" anchor="{anchor}"><a:normAutofit/></a:bodyPr><a:lstStyle/>{body}</p:txBody>"#,
            r#"</p:sp>"#
        ),
        id = id,
        name = escape(name),
        xfrm = frame.xfrm(),
        fill = fill_xml,
        anchor = anchor,
        body = body,
    )
}

/// Borderless filled rectangle without text.
pub fn rect_shape(id: u32, name: &str, frame: Frame, color: &str) -> String {
    format!(
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr/><p:nvPr userDrawn="1"/></p:nvSpPr>"#,
            r#"<p:spPr>{xfrm}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>{fill}<a:ln><a:noFill/></a:ln></p:spPr>"#,
            r#"</p:sp>"#
        ),
        id = id,
        name = escape(name),
        xfrm = frame.xfrm(),
        fill = solid_fill(color),
    )
}

/// `<p:spTree>` wrapping the given shapes.
pub fn shape_tree(shapes: &[String]) -> String {
    format!(
        concat!(
            r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
            r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
            "{}</p:spTree>"
        ),
        shapes.concat()
    )
}

pub fn solid_background(color: &str) -> String {
    format!(
        "<p:bg><p:bgPr>{}<a:effectLst/></p:bgPr></p:bg>",
        solid_fill(color)
    )
}

pub fn slide_xml(background: Option<&str>, shapes: &[String]) -> String {
    format!(
        r#"{XML_DECL}<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld>{bg}{tree}</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        bg = background.map(solid_background).unwrap_or_default(),
        tree = shape_tree(shapes),
    )
}

pub fn slide_layout_xml(name: &str, shapes: &[String]) -> String {
    format!(
        r#"{XML_DECL}<p:sldLayout xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" preserve="1" userDrawn="1"><p:cSld name="{name}">{tree}</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        name = escape(name),
        tree = shape_tree(shapes),
    )
}

pub const MASTER_ID: u64 = 2_147_483_648;

/// Slide master referencing `layout_count` layouts as rId1..rIdN.
pub fn slide_master_xml(layout_count: usize) -> String {
    let layout_ids: String = (1..=layout_count)
        .map(|i| {
            format!(
                r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#,
                MASTER_ID + i as u64,
                i
            )
        })
        .collect();
    format!(
        concat!(
            r#"{decl}<p:sldMaster xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            r#"<p:cSld>{bg}{tree}</p:cSld>"#,
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst>{ids}</p:sldLayoutIdLst>"#,
            r#"<p:txStyles>"#,
            r#"<p:titleStyle><a:lvl1pPr algn="l"><a:defRPr sz="2800" b="1"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/></a:defRPr></a:lvl1pPr></p:titleStyle>"#,
            r#"<p:bodyStyle><a:lvl1pPr><a:defRPr sz="2000"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr></p:bodyStyle>"#,
            r#"<p:otherStyle><a:lvl1pPr><a:defRPr sz="1800"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill></a:defRPr></a:lvl1pPr></p:otherStyle>"#,
            r#"</p:txStyles></p:sldMaster>"#
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        bg = solid_background("FFFFFF"),
        tree = shape_tree(&[]),
        ids = layout_ids,
    )
}

pub fn presentation_xml(slide_count: usize) -> String {
    // rId1 master, rId2..rId5 fixed parts, slides from rId6
    let slide_ids = if slide_count == 0 {
        String::new()
    } else {
        let ids: String = (0..slide_count)
            .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, 6 + i))
            .collect();
        format!("<p:sldIdLst>{}</p:sldIdLst>", ids)
    };
    format!(
        concat!(
            r#"{decl}<p:presentation xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" saveSubsetFonts="1">"#,
            r#"<p:sldMasterIdLst><p:sldMasterId id="{master}" r:id="rId1"/></p:sldMasterIdLst>"#,
            "{slides}",
            r#"<p:sldSz cx="{cx}" cy="{cy}"/><p:notesSz cx="6858000" cy="9144000"/>"#,
            r#"</p:presentation>"#
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        master = MASTER_ID,
        slides = slide_ids,
        cx = emu(SLIDE_WIDTH_IN),
        cy = emu(SLIDE_HEIGHT_IN),
    )
}

/// One relationship: (id, type suffix under the officeDocument namespace, target).
pub struct Rel<'a> {
    pub id: String,
    pub kind: &'a str,
    pub target: String,
}

impl<'a> Rel<'a> {
    pub fn new(id: usize, kind: &'a str, target: impl Into<String>) -> Self {
        Self {
            id: format!("rId{}", id),
            kind,
            target: target.into(),
        }
    }
}

pub fn relationships_xml(rels: &[Rel<'_>]) -> String {
    let body: String = rels
        .iter()
        .map(|rel| {
            let kind = if rel.kind == "core-properties" {
                "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties"
                    .to_string()
            } else {
                format!("{}/{}", REL_BASE, rel.kind)
            };
            format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                rel.id,
                kind,
                escape(&rel.target)
            )
        })
        .collect();
    format!(
        r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{body}</Relationships>"#
    )
}

pub fn presentation_rels(slide_count: usize) -> String {
    let mut rels = vec![
        Rel::new(1, "slideMaster", "slideMasters/slideMaster1.xml"),
        Rel::new(2, "presProps", "presProps.xml"),
        Rel::new(3, "viewProps", "viewProps.xml"),
        Rel::new(4, "theme", "theme/theme1.xml"),
        Rel::new(5, "tableStyles", "tableStyles.xml"),
    ];
    rels.extend((0..slide_count).map(|i| Rel::new(6 + i, "slide", format!("slides/slide{}.xml", i + 1))));
    relationships_xml(&rels)
}

pub fn package_rels() -> String {
    relationships_xml(&[
        Rel::new(1, "officeDocument", "ppt/presentation.xml"),
        Rel::new(2, "core-properties", "docProps/core.xml"),
        Rel::new(3, "extended-properties", "docProps/app.xml"),
    ])
}

pub fn content_types_xml(layout_count: usize, slide_count: usize) -> String {
    let mut overrides = vec![
        ("/ppt/presentation.xml".to_string(), format!("{CT_BASE}.presentationml.presentation.main+xml")),
        ("/ppt/slideMasters/slideMaster1.xml".to_string(), format!("{CT_BASE}.presentationml.slideMaster+xml")),
        ("/ppt/theme/theme1.xml".to_string(), format!("{CT_BASE}.theme+xml")),
        ("/ppt/presProps.xml".to_string(), format!("{CT_BASE}.presentationml.presProps+xml")),
        ("/ppt/viewProps.xml".to_string(), format!("{CT_BASE}.presentationml.viewProps+xml")),
        ("/ppt/tableStyles.xml".to_string(), format!("{CT_BASE}.presentationml.tableStyles+xml")),
        ("/docProps/core.xml".to_string(), "application/vnd.openxmlformats-package.core-properties+xml".to_string()),
        ("/docProps/app.xml".to_string(), format!("{CT_BASE}.extended-properties+xml")),
    ];
    overrides.extend((1..=layout_count).map(|i| {
        (
            format!("/ppt/slideLayouts/slideLayout{}.xml", i),
            format!("{CT_BASE}.presentationml.slideLayout+xml"),
        )
    }));
    overrides.extend((1..=slide_count).map(|i| {
        (
            format!("/ppt/slides/slide{}.xml", i),
            format!("{CT_BASE}.presentationml.slide+xml"),
        )
    }));
    let body: String = overrides
        .iter()
        .map(|(part, ct)| format!(r#"<Override PartName="{}" ContentType="{}"/>"#, part, ct))
        .collect();
    format!(
        concat!(
            r#"{decl}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            "{body}</Types>"
        ),
        decl = XML_DECL,
        body = body,
    )
}

pub fn core_props_xml(title: &str, timestamp: &str) -> String {
    format!(
        concat!(
            r#"{decl}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{title}</dc:title><dc:creator>{app}</dc:creator>",
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{ts}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{ts}</dcterms:modified>"#,
            "</cp:coreProperties>"
        ),
        decl = XML_DECL,
        title = escape(title),
        app = env!("CARGO_PKG_NAME"),
        ts = timestamp,
    )
}

pub fn app_props_xml(slide_count: usize) -> String {
    format!(
        r#"{XML_DECL}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"><Application>{}</Application><Slides>{}</Slides></Properties>"#,
        env!("CARGO_PKG_NAME"),
        slide_count
    )
}

pub fn pres_props_xml() -> String {
    format!(r#"{XML_DECL}<p:presentationPr xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"/>"#)
}

pub fn view_props_xml() -> String {
    format!(r#"{XML_DECL}<p:viewPr xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"/>"#)
}

pub fn table_styles_xml() -> String {
    format!(
        r#"{XML_DECL}<a:tblStyleLst xmlns:a="{NS_A}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#
    )
}

pub fn theme_xml() -> String {
    let line = |w: u32| {
        format!(r#"<a:ln w="{w}"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#)
    };
    let fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let effect = "<a:effectStyle><a:effectLst/></a:effectStyle>";
    format!(
        concat!(
            r#"{decl}<a:theme xmlns:a="{a}" name="Lesson">"#,
            "<a:themeElements>",
            r#"<a:clrScheme name="Lesson">"#,
            r#"<a:dk1><a:srgbClr val="1E293B"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1>"#,
            r#"<a:dk2><a:srgbClr val="334155"/></a:dk2><a:lt2><a:srgbClr val="F8FAFC"/></a:lt2>"#,
            r#"<a:accent1><a:srgbClr val="3B82F6"/></a:accent1><a:accent2><a:srgbClr val="F59E0B"/></a:accent2>"#,
            r#"<a:accent3><a:srgbClr val="10B981"/></a:accent3><a:accent4><a:srgbClr val="6366F1"/></a:accent4>"#,
            r#"<a:accent5><a:srgbClr val="EF4444"/></a:accent5><a:accent6><a:srgbClr val="8B5CF6"/></a:accent6>"#,
            r#"<a:hlink><a:srgbClr val="2563EB"/></a:hlink><a:folHlink><a:srgbClr val="7C3AED"/></a:folHlink>"#,
            "</a:clrScheme>",
            r#"<a:fontScheme name="Lesson">"#,
            r#"<a:majorFont><a:latin typeface="Quicksand"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
            r#"<a:minorFont><a:latin typeface="Arial"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
            "</a:fontScheme>",
            r#"<a:fmtScheme name="Lesson">"#,
            "<a:fillStyleLst>{fill}{fill}{fill}</a:fillStyleLst>",
            "<a:lnStyleLst>{l1}{l2}{l3}</a:lnStyleLst>",
            "<a:effectStyleLst>{effect}{effect}{effect}</a:effectStyleLst>",
            "<a:bgFillStyleLst>{fill}{fill}{fill}</a:bgFillStyleLst>",
            "</a:fmtScheme>",
            "</a:themeElements>",
            "<a:objectDefaults/><a:extraClrSchemeLst/>",
            "</a:theme>"
        ),
        decl = XML_DECL,
        a = NS_A,
        fill = fill,
        l1 = line(6350),
        l2 = line(12700),
        l3 = line(19050),
        effect = effect,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"Tom & Jerry <"hi"> it's"#),
            "Tom &amp; Jerry &lt;&quot;hi&quot;&gt; it&apos;s"
        );
        assert_eq!(escape("a\u{0001}b\nc"), "ab\nc");
        assert_eq!(escape("Tiếng Việt"), "Tiếng Việt");
    }

    #[test]
    fn test_emu() {
        assert_eq!(emu(SLIDE_WIDTH_IN), 9_144_000);
        assert_eq!(emu(SLIDE_HEIGHT_IN), 5_143_500);
        assert_eq!(emu(0.6), 548_640);
    }

    #[test]
    fn test_presentation_lists_slides() {
        let xml = presentation_xml(2);
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId6"/>"#));
        assert!(xml.contains(r#"<p:sldId id="257" r:id="rId7"/>"#));
        assert!(!presentation_xml(0).contains("sldIdLst"));

        let rels = presentation_rels(2);
        assert!(rels.contains(r#"Id="rId7""#));
        assert!(rels.contains("slides/slide2.xml"));
    }

    #[test]
    fn test_content_types_cover_parts() {
        let ct = content_types_xml(2, 3);
        assert!(ct.contains("/ppt/slideLayouts/slideLayout2.xml"));
        assert!(ct.contains("/ppt/slides/slide3.xml"));
        assert!(!ct.contains("/ppt/slides/slide4.xml"));
    }

    #[test]
    fn test_bullet_paragraph_breaks_lines() {
        let style = TextStyle {
            size_pt: 20,
            color: "334155",
            bold: false,
            font: None,
            align: Align::Left,
            middle: false,
        };
        let xml = paragraph_xml(&Paragraph::Bullet("a\nb".into()), &style);
        assert!(xml.contains("buChar"));
        assert_eq!(xml.matches("<a:r>").count(), 2);
        assert!(xml.contains("<a:br/>"));
        assert!(xml.contains(r#"sz="2000""#));
    }
}
