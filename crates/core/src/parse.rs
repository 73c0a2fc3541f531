//! Parsing oracle replies into slides.
//!
//! The structured parser looks for the first well-formed JSON array of
//! `{title, content}` objects anywhere in the reply. When none is found the
//! heuristic line parser takes over.

use crate::error::{Error, Result};
use crate::types::{RawSlide, Slide};
use regex::Regex;
use std::sync::LazyLock;

/// A line that starts with a number followed by a dot, e.g. `3. 결론`.
static NUMBER_MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.").unwrap());

/// Marker word that identifies a title line in the heuristic parser.
pub const SLIDE_MARKER: &str = "슬라이드";

/// Which parser produced the slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Structured,
    Heuristic,
}

/// Extract the first well-formed JSON array of slide objects from `text`.
///
/// Every `[` is tried in order; the array may be followed by arbitrary
/// commentary, which is ignored.
pub fn parse_structured(text: &str) -> Result<Vec<Slide>> {
    for (start, _) in text.match_indices('[') {
        let mut stream =
            serde_json::Deserializer::from_str(&text[start..]).into_iter::<Vec<RawSlide>>();

        if let Some(Ok(raw)) = stream.next() {
            log::debug!("Found slide array at byte {} with {} items", start, raw.len());
            return Ok(raw.into_iter().map(Slide::from).collect());
        }
    }

    Err(Error::ResponseParseFailed(
        "no JSON array of slide objects in reply".to_string(),
    ))
}

/// Title rule 1: the line starts with digits and a dot.
pub fn starts_with_number_marker(line: &str) -> bool {
    NUMBER_MARKER_REGEX.is_match(line)
}

/// Title rule 2: the line contains the slide marker word.
pub fn contains_slide_marker(line: &str) -> bool {
    line.contains(SLIDE_MARKER)
}

/// Title rule 3: nothing has been opened yet and more slides are wanted.
pub fn opens_first_slide(collected: usize, wanted: usize, has_open_slide: bool) -> bool {
    !has_open_slide && collected < wanted
}

/// Remove the leading numbering (digits, dots, spaces) from a title line.
fn strip_numbering(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ' ')
}

/// Parse free text into slides line by line.
///
/// Produces at most what the text contains; padding to the requested count
/// is left to the caller.
pub fn parse_heuristic(text: &str, wanted: usize) -> Vec<Slide> {
    let mut slides: Vec<Slide> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in text.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let is_title = starts_with_number_marker(line)
            || contains_slide_marker(line)
            || opens_first_slide(slides.len(), wanted, current.is_some());

        if is_title {
            if let Some((title, content)) = current.take() {
                slides.push(Slide::new(title, content.join("\n")));
            }
            current = Some((strip_numbering(line).to_string(), Vec::new()));
        } else if let Some((_, content)) = current.as_mut() {
            content.push(line.to_string());
        }
    }

    if let Some((title, content)) = current {
        slides.push(Slide::new(title, content.join("\n")));
    }

    slides
}

/// Parse a reply, falling back to the heuristic parser.
pub fn parse_reply(text: &str, wanted: usize) -> (Vec<Slide>, ParseMode) {
    match parse_structured(text) {
        Ok(slides) => (slides, ParseMode::Structured),
        Err(e) => {
            log::warn!("{}; falling back to line heuristics", e);
            (parse_heuristic(text, wanted), ParseMode::Heuristic)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_plain_array() {
        let text = r#"[{"title": "A", "content": "x\ny"}, {"title": "B", "content": "z"}]"#;
        let slides = parse_structured(text).unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].content, "x\ny");
    }

    #[test]
    fn test_structured_with_commentary_and_fences() {
        let text = "다음은 요청하신 슬라이드입니다:\n```json\n[\n  {\"title\": \"소개\", \"content\": \"• 배경\\n• 목표\"}\n]\n```\n도움이 되길 바랍니다 [끝]";
        let slides = parse_structured(text).unwrap();
        assert_eq!(slides, vec![Slide::new("소개", "배경\n목표")]);
    }

    #[test]
    fn test_structured_skips_non_json_brackets() {
        let text = r#"[참고] 아래 결과: [{"title": "T", "content": "c"}]"#;
        let slides = parse_structured(text).unwrap();
        assert_eq!(slides[0].title, "T");
    }

    #[test]
    fn test_structured_rejects_non_object_arrays() {
        assert!(parse_structured("[1, 2, 3]").is_err());
        assert!(parse_structured("no brackets at all").is_err());
        assert!(parse_structured("[{\"title\": \"unterminated\"").is_err());
    }

    #[test]
    fn test_title_predicates_independent() {
        assert!(starts_with_number_marker("1. 소개"));
        assert!(starts_with_number_marker("12.결론"));
        assert!(!starts_with_number_marker("1) 소개"));
        assert!(!starts_with_number_marker("버전 2.0"));

        assert!(contains_slide_marker("슬라이드 3: 본론"));
        assert!(contains_slide_marker("세 번째 슬라이드"));
        assert!(!contains_slide_marker("Slide 3"));

        assert!(opens_first_slide(0, 5, false));
        assert!(!opens_first_slide(0, 5, true));
        assert!(!opens_first_slide(5, 5, false));
    }

    #[test]
    fn test_heuristic_three_titles() {
        let text = "1. 소개\n배경 설명\n목표\n2. 본론\n핵심 내용\n3. 결론\n요약";
        let slides = parse_heuristic(text, 10);
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[0], Slide::new("소개", "배경 설명\n목표"));
        assert_eq!(slides[1], Slide::new("본론", "핵심 내용"));
        assert_eq!(slides[2], Slide::new("결론", "요약"));
    }

    #[test]
    fn test_heuristic_first_line_opens_slide() {
        let text = "프레젠테이션 개요\n첫 줄\n둘째 줄";
        let slides = parse_heuristic(text, 5);
        assert_eq!(slides, vec![Slide::new("프레젠테이션 개요", "첫 줄\n둘째 줄")]);
    }

    #[test]
    fn test_heuristic_marker_line_title_kept_whole() {
        let slides = parse_heuristic("슬라이드 1: 시작\n- 내용", 5);
        assert_eq!(slides[0].title, "슬라이드 1: 시작");
        assert_eq!(slides[0].content, "내용");
    }

    #[test]
    fn test_heuristic_empty_text() {
        assert!(parse_heuristic("", 5).is_empty());
        assert!(parse_heuristic("\n \n", 5).is_empty());
    }

    #[test]
    fn test_parse_reply_modes() {
        let (slides, mode) = parse_reply(r#"[{"title":"A","content":"b"}]"#, 5);
        assert_eq!(mode, ParseMode::Structured);
        assert_eq!(slides.len(), 1);

        let (slides, mode) = parse_reply("1. A\nb", 5);
        assert_eq!(mode, ParseMode::Heuristic);
        assert_eq!(slides, vec![Slide::new("A", "b")]);
    }
}
