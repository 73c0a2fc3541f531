//! Plain text preview of a deck.
//!
//! Each slide is rendered as a numbered header, its title and its bullet
//! lines; slides are separated by a blank line.

use crate::bullets::with_bullet;
use crate::types::{Deck, Slide};

/// Shown when a slide has no title.
pub const EMPTY_TITLE: &str = "제목을 입력하세요";

/// Shown when a slide has no content.
pub const EMPTY_CONTENT: &str = "내용을 입력하세요";

/// Formatter for terminal previews.
#[derive(Debug, Clone)]
pub struct PreviewFormatter {
    use_bullets: bool,
    numbered: bool,
}

impl Default for PreviewFormatter {
    fn default() -> Self {
        Self {
            use_bullets: true,
            numbered: true,
        }
    }
}

impl PreviewFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bullets(mut self, use_bullets: bool) -> Self {
        self.use_bullets = use_bullets;
        self
    }

    /// Omit the `[n/total]` header line.
    pub fn without_numbers(mut self) -> Self {
        self.numbered = false;
        self
    }

    /// Lines of a single slide: title, then content lines.
    pub fn slide_lines(&self, slide: &Slide) -> Vec<String> {
        let title = if slide.title.is_empty() {
            EMPTY_TITLE.to_string()
        } else {
            slide.title.clone()
        };

        let mut lines = vec![title];
        let content = slide.lines();
        if content.is_empty() {
            lines.push(with_bullet(EMPTY_CONTENT, self.use_bullets));
        } else {
            lines.extend(content.iter().map(|l| with_bullet(l, self.use_bullets)));
        }
        lines
    }

    /// Format the whole deck.
    ///
    /// # Example output
    /// ```text
    /// [1/2] 소개
    /// • 배경
    /// • 목표
    ///
    /// [2/2] 결론
    /// • 요약
    /// ```
    pub fn format(&self, deck: &Deck) -> String {
        let total = deck.len();
        deck.iter()
            .enumerate()
            .map(|(i, slide)| {
                let mut lines = self.slide_lines(slide);
                if self.numbered {
                    lines[0] = format!("[{}/{}] {}", i + 1, total, lines[0]);
                }
                lines.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty_deck() {
        assert_eq!(PreviewFormatter::new().format(&Deck::default()), "");
    }

    #[test]
    fn test_format_with_bullets() {
        let deck = Deck::new(vec![
            Slide::new("소개", "배경\n목표"),
            Slide::new("결론", "요약"),
        ]);
        let expected = "[1/2] 소개\n• 배경\n• 목표\n\n[2/2] 결론\n• 요약";
        assert_eq!(PreviewFormatter::new().format(&deck), expected);
    }

    #[test]
    fn test_format_without_bullets_or_numbers() {
        let deck = Deck::new(vec![Slide::new("소개", "• 배경\n- 목표")]);
        let text = PreviewFormatter::new()
            .with_bullets(false)
            .without_numbers()
            .format(&deck);
        assert_eq!(text, "소개\n배경\n목표");
    }

    #[test]
    fn test_empty_slide_placeholders() {
        let lines = PreviewFormatter::new().slide_lines(&Slide::default());
        assert_eq!(lines, vec![EMPTY_TITLE.to_string(), format!("• {}", EMPTY_CONTENT)]);
    }
}
