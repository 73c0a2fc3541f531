//! Bullet glyph handling for slide content.
//!
//! Generated content frequently arrives with its own bullet markers even when
//! asked not to. Stored content never keeps them; the renderer and the text
//! preview add a single canonical glyph back when bullets are enabled.

use unicode_normalization::UnicodeNormalization;

/// Characters treated as bullet markers at the start of a line.
pub const BULLET_GLYPHS: &[char] = &['•', '-', '*', '◦', '○', '▪', '▫', '‣', '⁃'];

/// The glyph prepended to each line when bullets are enabled.
pub const CANONICAL_BULLET: char = '•';

/// Strip every leading bullet glyph (and the whitespace following it).
///
/// The result is trimmed and NFC-normalized so decomposed Hangul coming from
/// some clipboards compares equal to the composed form.
pub fn strip_bullet(line: &str) -> String {
    let mut rest = line.trim();
    while let Some(stripped) = rest.strip_prefix(BULLET_GLYPHS) {
        rest = stripped.trim_start();
    }
    rest.nfc().collect()
}

/// Check whether a line starts with one of the bullet glyphs.
pub fn starts_with_bullet(line: &str) -> bool {
    line.trim_start().starts_with(BULLET_GLYPHS)
}

/// Split content into cleaned, non-empty lines without bullet glyphs.
pub fn clean_lines(content: &str) -> Vec<String> {
    content
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(strip_bullet)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Sanitize a content block: cleaned lines joined with `\n`.
pub fn sanitize_content(content: &str) -> String {
    clean_lines(content).join("\n")
}

/// Prefix a cleaned line with the canonical bullet when enabled.
pub fn with_bullet(line: &str, use_bullets: bool) -> String {
    if use_bullets && !line.starts_with(CANONICAL_BULLET) {
        format!("{} {}", CANONICAL_BULLET, line)
    } else {
        line.to_string()
    }
}
