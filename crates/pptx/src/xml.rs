//! Streaming XML fragments for slide parts.
//!
//! Fragments are written into their own buffer with `quick_xml::Writer` and
//! spliced into the slide only when the whole fragment was emitted.

use std::io::Cursor;

use deck_core::RgbColor;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::constants::*;
use crate::geometry::Rect;

/// Error message from a failed fragment.
pub(crate) type FragmentResult<T> = std::result::Result<T, String>;

/// Small wrapper over `quick_xml::Writer` with attribute-list helpers.
pub(crate) struct XmlBuilder {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlBuilder {
    pub(crate) fn new() -> Self {
        Self {
            writer: Writer::new(Cursor::new(Vec::new())),
        }
    }

    fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
        let mut start = BytesStart::new(name);
        for attr in attrs {
            start.push_attribute(*attr);
        }
        start
    }

    pub(crate) fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> FragmentResult<()> {
        self.writer
            .write_event(Event::Start(Self::element(name, attrs)))
            .map_err(|e| format!("Failed to open <{}>: {}", name, e))
    }

    pub(crate) fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> FragmentResult<()> {
        self.writer
            .write_event(Event::Empty(Self::element(name, attrs)))
            .map_err(|e| format!("Failed to write <{}/>: {}", name, e))
    }

    pub(crate) fn end(&mut self, name: &str) -> FragmentResult<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(|e| format!("Failed to close <{}>: {}", name, e))
    }

    pub(crate) fn text(&mut self, text: &str) -> FragmentResult<()> {
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| format!("Failed to write text: {}", e))
    }

    /// `<a:solidFill><a:srgbClr val=".."/></a:solidFill>`
    pub(crate) fn solid_fill(&mut self, color: RgbColor) -> FragmentResult<()> {
        self.start("a:solidFill", &[])?;
        self.empty("a:srgbClr", &[("val", &color.to_hex())])?;
        self.end("a:solidFill")
    }

    /// `<a:xfrm>` with offset and extent.
    pub(crate) fn transform(&mut self, rect: &Rect) -> FragmentResult<()> {
        self.start("a:xfrm", &[])?;
        self.empty("a:off", &[("x", &rect.x.to_string()), ("y", &rect.y.to_string())])?;
        self.empty(
            "a:ext",
            &[("cx", &rect.cx.to_string()), ("cy", &rect.cy.to_string())],
        )?;
        self.end("a:xfrm")
    }

    pub(crate) fn finish(self) -> FragmentResult<String> {
        String::from_utf8(self.writer.into_inner().into_inner())
            .map_err(|e| format!("Invalid UTF-8 in generated XML: {}", e))
    }
}

/// Drop characters that are not allowed in XML 1.0 documents.
pub(crate) fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || c >= ' ')
        .filter(|&c| c != '\u{FFFE}' && c != '\u{FFFF}')
        .collect()
}

/// Slide background: `<p:bg>` with a solid fill.
pub(crate) fn background(color: RgbColor) -> FragmentResult<String> {
    let mut xml = XmlBuilder::new();
    xml.start("p:bg", &[])?;
    xml.start("p:bgPr", &[])?;
    xml.solid_fill(color)?;
    xml.empty("a:effectLst", &[])?;
    xml.end("p:bgPr")?;
    xml.end("p:bg")?;
    xml.finish()
}

/// Filled rectangle without text or outline.
pub(crate) fn filled_rect(id: u32, name: &str, rect: &Rect, color: RgbColor) -> FragmentResult<String> {
    let id = id.to_string();
    let mut xml = XmlBuilder::new();
    xml.start("p:sp", &[])?;
    xml.start("p:nvSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", &id), ("name", name)])?;
    xml.empty("p:cNvSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvSpPr")?;

    xml.start("p:spPr", &[])?;
    xml.transform(rect)?;
    xml.start("a:prstGeom", &[("prst", "rect")])?;
    xml.empty("a:avLst", &[])?;
    xml.end("a:prstGeom")?;
    xml.solid_fill(color)?;
    xml.start("a:ln", &[])?;
    xml.empty("a:noFill", &[])?;
    xml.end("a:ln")?;
    xml.end("p:spPr")?;
    xml.end("p:sp")?;
    xml.finish()
}

/// Character formatting shared by all runs of a text box.
#[derive(Debug, Clone)]
pub(crate) struct RunStyle {
    pub size_pt: u32,
    pub bold: bool,
    pub color: RgbColor,
}

/// Paragraph formatting shared by all paragraphs of a text box.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParagraphStyle {
    /// `algn` attribute, e.g. `ctr`.
    pub align: Option<&'static str>,
    pub space_after_pt: Option<u32>,
}

/// A text box with one run per paragraph.
pub(crate) fn text_box(
    id: u32,
    name: &str,
    rect: &Rect,
    paragraphs: &[String],
    run: &RunStyle,
    para: &ParagraphStyle,
) -> FragmentResult<String> {
    let id = id.to_string();
    let size = (run.size_pt * FONT_UNITS_PER_POINT).to_string();
    let color = run.color;

    let mut xml = XmlBuilder::new();
    xml.start("p:sp", &[])?;
    xml.start("p:nvSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", &id), ("name", name)])?;
    xml.empty("p:cNvSpPr", &[("txBox", "1")])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvSpPr")?;

    xml.start("p:spPr", &[])?;
    xml.transform(rect)?;
    xml.start("a:prstGeom", &[("prst", "rect")])?;
    xml.empty("a:avLst", &[])?;
    xml.end("a:prstGeom")?;
    xml.empty("a:noFill", &[])?;
    xml.end("p:spPr")?;

    xml.start("p:txBody", &[])?;
    xml.start("a:bodyPr", &[("wrap", "square"), ("rtlCol", "0")])?;
    xml.empty("a:normAutofit", &[])?;
    xml.end("a:bodyPr")?;
    xml.empty("a:lstStyle", &[])?;

    for text in paragraphs {
        xml.start("a:p", &[])?;

        let mut ppr: Vec<(&str, &str)> = vec![("lvl", "0")];
        if let Some(align) = para.align {
            ppr.push(("algn", align));
        }
        match para.space_after_pt {
            Some(points) => {
                let val = (points * FONT_UNITS_PER_POINT).to_string();
                xml.start("a:pPr", &ppr)?;
                xml.start("a:spcAft", &[])?;
                xml.empty("a:spcPts", &[("val", &val)])?;
                xml.end("a:spcAft")?;
                xml.end("a:pPr")?;
            }
            None => xml.empty("a:pPr", &ppr)?,
        }

        xml.start("a:r", &[])?;
        let mut rpr: Vec<(&str, &str)> = vec![("lang", TEXT_LANG), ("sz", &size)];
        if run.bold {
            rpr.push(("b", "1"));
        }
        rpr.push(("dirty", "0"));
        xml.start("a:rPr", &rpr)?;
        xml.solid_fill(color)?;
        xml.empty("a:latin", &[("typeface", FONT_FACE)])?;
        xml.empty("a:ea", &[("typeface", FONT_FACE)])?;
        xml.end("a:rPr")?;
        xml.start("a:t", &[])?;
        xml.text(&xml_safe(text))?;
        xml.end("a:t")?;
        xml.end("a:r")?;

        xml.end("a:p")?;
    }

    xml.end("p:txBody")?;
    xml.end("p:sp")?;
    xml.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_fragment() {
        let xml = background(RgbColor::new(26, 26, 26)).unwrap();
        assert_eq!(
            xml,
            "<p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"1A1A1A\"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"
        );
    }

    #[test]
    fn test_text_box_escapes_and_styles() {
        let rect = Rect { x: 1, y: 2, cx: 3, cy: 4 };
        let run = RunStyle {
            size_pt: 32,
            bold: true,
            color: RgbColor::new(102, 126, 234),
        };
        let para = ParagraphStyle {
            align: Some("ctr"),
            space_after_pt: None,
        };
        let xml = text_box(2, "Title 1", &rect, &["R&D <계획>".to_string()], &run, &para).unwrap();

        assert!(xml.contains("name=\"Title 1\""));
        assert!(xml.contains("sz=\"3200\""));
        assert!(xml.contains("b=\"1\""));
        assert!(xml.contains("algn=\"ctr\""));
        assert!(xml.contains("val=\"667EEA\""));
        assert!(xml.contains("typeface=\"맑은 고딕\""));
        assert!(xml.contains("R&amp;D &lt;계획&gt;"));
    }

    #[test]
    fn test_text_box_space_after() {
        let rect = Rect { x: 0, y: 0, cx: 1, cy: 1 };
        let run = RunStyle {
            size_pt: 16,
            bold: false,
            color: RgbColor::new(0, 0, 0),
        };
        let para = ParagraphStyle {
            align: None,
            space_after_pt: Some(PARAGRAPH_SPACE_AFTER_PT),
        };
        let xml = text_box(3, "Content 2", &rect, &["a".into(), "b".into()], &run, &para).unwrap();
        assert_eq!(xml.matches("<a:spcPts val=\"1200\"/>").count(), 2);
        assert!(!xml.contains("b=\"1\""));
    }

    #[test]
    fn test_xml_safe_drops_control_chars() {
        assert_eq!(xml_safe("a\u{0}b\u{1b}c\td"), "abc\td");
    }
}
