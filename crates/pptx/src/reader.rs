//! Reads slide text back out of a PPTX package.
//!
//! Decks written by [`crate::DeckRenderer`] name their text boxes `Title*`
//! and `Content*`; those names are used to recover each slide. Files from
//! other tools fall back to position order: the top-most text shape is the
//! title and the rest become content.

use deck_core::{Deck, Error, Result, Slide};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

use crate::constants::{CONTENT_SHAPE_PREFIX, TITLE_SHAPE_PREFIX};

/// Reader for PPTX packages.
#[derive(Debug, Default)]
pub struct PptxReader;

impl PptxReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a deck from in-memory PPTX bytes.
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<Deck> {
        self.read(Cursor::new(bytes))
    }

    /// Read a deck from a PPTX reader.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<Deck> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let slide_paths = self.slide_order(&mut archive)?;
        log::debug!("Reading {} slides", slide_paths.len());

        let slides = slide_paths
            .iter()
            .map(|path| self.read_slide(&mut archive, path))
            .collect::<Result<Vec<_>>>()?;

        Ok(Deck::new(slides))
    }

    /// Slide part paths in presentation order.
    fn slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels = read_part(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let rel_type = attribute(e, b"Type").unwrap_or_default();
                    let target = attribute(e, b"Target").unwrap_or_default();

                    if rel_type.ends_with("/slide") {
                        let order = trailing_number(&target);
                        let path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push((path, order));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    fn read_slide<R: Read + Seek>(&self, archive: &mut ZipArchive<R>, path: &str) -> Result<Slide> {
        let xml = read_part(archive, path)?;
        let shapes = extract_shapes(&xml)?;
        Ok(slide_from_shapes(shapes))
    }
}

/// A text-bearing shape found on a slide.
#[derive(Debug, Default)]
struct ShapeText {
    name: String,
    paragraphs: Vec<String>,
    x: i64,
    y: i64,
}

impl ShapeText {
    fn text(&self) -> String {
        self.paragraphs.join("\n")
    }
}

fn slide_from_shapes(mut shapes: Vec<ShapeText>) -> Slide {
    let named = |prefix: &str| {
        shapes
            .iter()
            .filter(|s| s.name.starts_with(prefix))
            .map(ShapeText::text)
            .collect::<Vec<_>>()
            .join("\n")
    };

    let has_names = shapes
        .iter()
        .any(|s| s.name.starts_with(TITLE_SHAPE_PREFIX) || s.name.starts_with(CONTENT_SHAPE_PREFIX));
    if has_names {
        return Slide::new(named(TITLE_SHAPE_PREFIX), named(CONTENT_SHAPE_PREFIX));
    }

    shapes.retain(|s| !s.paragraphs.is_empty());
    shapes.sort_by(|a, b| a.y.cmp(&b.y).then(a.x.cmp(&b.x)));
    let mut shapes = shapes.into_iter();
    let title = shapes.next().map(|s| s.text()).unwrap_or_default();
    let content: Vec<String> = shapes.map(|s| s.text()).collect();
    Slide::new(title, content.join("\n"))
}

/// Collect shapes with their name, offset and paragraph text.
fn extract_shapes(xml: &str) -> Result<Vec<ShapeText>> {
    let mut shapes = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut current: Option<ShapeText> = None;
    let mut paragraph: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => current = Some(ShapeText::default()),
                b"p" if current.is_some() => paragraph = Some(String::new()),
                b"t" => in_text = true,
                b"off" => set_offset(&mut current, e),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"cNvPr" => {
                    if let Some(shape) = current.as_mut() {
                        shape.name = attribute(e, b"name").unwrap_or_default();
                    }
                }
                b"off" => set_offset(&mut current, e),
                b"br" => {
                    if let Some(text) = paragraph.as_mut() {
                        text.push('\n');
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                if let Some(text) = paragraph.as_mut() {
                    let unescaped = e
                        .unescape()
                        .map_err(|e| Error::XmlError(format!("Bad text in slide: {}", e)))?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"t" => in_text = false,
                b"p" => {
                    if let (Some(shape), Some(text)) = (current.as_mut(), paragraph.take()) {
                        let text = text.trim();
                        if !text.is_empty() {
                            shape.paragraphs.push(text.to_string());
                        }
                    }
                }
                b"sp" => {
                    if let Some(shape) = current.take() {
                        shapes.push(shape);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::PptxParseError(format!(
                    "Error parsing slide XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(shapes)
}

fn set_offset(current: &mut Option<ShapeText>, e: &BytesStart<'_>) {
    if let Some(shape) = current.as_mut() {
        if let Some(x) = attribute(e, b"x").and_then(|v| v.parse().ok()) {
            shape.x = x;
        }
        if let Some(y) = attribute(e, b"y").and_then(|v| v.parse().ok()) {
            shape.y = y;
        }
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Trailing number of a part name like `slides/slide12.xml`.
fn trailing_number(s: &str) -> Option<usize> {
    let stem = s.trim_end_matches(".xml");
    let start = stem
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    stem[start..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SlideSize;
    use crate::writer::{DeckRenderer, RenderOptions};
    use deck_core::{Deck, FontSizes};

    #[test]
    fn test_trailing_number() {
        assert_eq!(trailing_number("slides/slide1.xml"), Some(1));
        assert_eq!(trailing_number("slides/slide123.xml"), Some(123));
        assert_eq!(trailing_number("nodigits.xml"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_roundtrip_preserves_deck() {
        let deck = Deck::new(vec![
            Slide::new("AI 기반 교육 전략", "현황 분석\n도입 방안 & 일정\n<기대> 효과"),
            Slide::new("빈 내용", ""),
            Slide::new("", "제목 없는 슬라이드"),
            Slide::new("", ""),
            Slide::new("마무리", "• 요약\n- 질의응답"),
        ]);
        for use_bullets in [true, false] {
            let options = RenderOptions::new()
                .with_bullets(use_bullets)
                .with_fonts(FontSizes::new(36, 24).unwrap());
            let output = DeckRenderer::new(options).render(&deck).unwrap();
            let restored = PptxReader::new().read_bytes(&output.bytes).unwrap();
            assert_eq!(restored, deck, "use_bullets = {}", use_bullets);
        }
    }

    #[test]
    fn test_roundtrip_keeps_slide_order() {
        let deck = Deck::with_exact_len(Vec::new(), 12);
        let options = RenderOptions::new().with_slide_size(SlideSize::WIDESCREEN);
        let output = DeckRenderer::new(options).render(&deck).unwrap();
        let restored = PptxReader::new().read_bytes(&output.bytes).unwrap();
        let titles: Vec<&str> = restored.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles[9], "슬라이드 10");
        assert_eq!(titles[11], "슬라이드 12");
    }

    #[test]
    fn test_unnamed_shapes_fall_back_to_position() {
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>
            <p:sp><p:nvSpPr><p:cNvPr id="3" name="TextBox 2"/></p:nvSpPr>
              <p:spPr><a:xfrm><a:off x="0" y="500"/></a:xfrm></p:spPr>
              <p:txBody><a:p><a:r><a:t>body</a:t></a:r></a:p></p:txBody></p:sp>
            <p:sp><p:nvSpPr><p:cNvPr id="2" name="TextBox 1"/></p:nvSpPr>
              <p:spPr><a:xfrm><a:off x="0" y="100"/></a:xfrm></p:spPr>
              <p:txBody><a:p><a:r><a:t>heading</a:t></a:r></a:p></p:txBody></p:sp>
          </p:spTree></p:cSld></p:sld>"#;
        let slide = slide_from_shapes(extract_shapes(xml).unwrap());
        assert_eq!(slide, Slide::new("heading", "body"));
    }

    #[test]
    fn test_not_a_zip() {
        let result = PptxReader::new().read_bytes(b"definitely not a zip");
        assert!(matches!(result, Err(Error::ZipError(_))));
    }
}
