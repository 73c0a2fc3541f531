//! JSON backups of a deck and download file names.

use crate::error::{Error, Result};
use crate::types::Deck;
use chrono::NaiveDateTime;
use regex::Regex;
use std::io::{Read, Write};
use std::sync::LazyLock;

/// MIME type of the rendered presentation.
pub const PPTX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// MIME type of a JSON backup.
pub const BACKUP_MIME_TYPE: &str = "application/json";

/// Characters that are neither word characters, whitespace nor hyphens.
static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Maximum number of title characters kept in a download file name.
const FILENAME_TITLE_CHARS: usize = 20;

/// Serialize a deck as a pretty-printed JSON array, keeping non-ASCII text.
pub fn to_json(deck: &Deck) -> Result<String> {
    serde_json::to_string_pretty(deck).map_err(|e| Error::BackupError(e.to_string()))
}

/// Parse a deck from a JSON array of `{title, content}` objects.
pub fn from_json(json: &str) -> Result<Deck> {
    serde_json::from_str(json).map_err(|e| Error::BackupError(e.to_string()))
}

/// Write a JSON backup to a writer.
pub fn write_backup<W: Write>(deck: &Deck, mut writer: W) -> Result<()> {
    let json = to_json(deck)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Read a JSON backup from a reader.
pub fn read_backup<R: Read>(mut reader: R) -> Result<Deck> {
    let mut json = String::new();
    reader.read_to_string(&mut json)?;
    from_json(&json)
}

/// File name for downloading the rendered deck.
///
/// Uses the first slide title with punctuation removed (at most 20
/// characters, whitespace collapsed to single spaces) and the month/day, e.g. `AI 전략_1019.pptx`. Falls back to a
/// timestamped generic name when there is no usable title.
pub fn download_filename(deck: &Deck, now: NaiveDateTime) -> String {
    let safe_title = deck
        .first_title()
        .map(|title| {
            let cleaned = UNSAFE_FILENAME_CHARS.replace_all(title, "");
            let single_line = WHITESPACE_RUN.replace_all(cleaned.trim(), " ");
            let truncated: String = single_line.chars().take(FILENAME_TITLE_CHARS).collect();
            truncated.trim_end().to_string()
        })
        .unwrap_or_default();

    if safe_title.is_empty() {
        format!("ai_presentation_{}.pptx", now.format("%m%d_%H%M"))
    } else {
        format!("{}_{}.pptx", safe_title, now.format("%m%d"))
    }
}

/// File name for a JSON backup, e.g. `slides_backup_20261019_153000.json`.
pub fn backup_filename(now: NaiveDateTime) -> String {
    format!("slides_backup_{}.json", now.format("%Y%m%d_%H%M%S"))
}
