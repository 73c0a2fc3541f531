//! Error types for slide deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating, rendering or reading a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The text-generation oracle call failed (network, auth, quota).
    #[error("Oracle call failed: {0}")]
    OracleCallFailed(String),

    /// The oracle reply did not contain a well-formed slide array.
    #[error("Response parsing error: {0}")]
    ResponseParseFailed(String),

    /// The requested slide count is not one of the supported values.
    #[error("Unsupported slide count: {0} (expected one of 5, 8, 10, 12, 15, 20)")]
    InvalidSlideCount(usize),

    /// A font size is outside its allowed range.
    #[error("Invalid {kind} font size {size}pt (allowed {min}..={max})")]
    InvalidFontSize {
        kind: &'static str,
        size: u32,
        min: u32,
        max: u32,
    },

    /// An option value could not be recognized.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Title or content text could not be rendered.
    #[error("Slide rendering error: {0}")]
    RenderContentFailed(String),

    /// Failed to parse the PPTX file structure.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// A JSON backup could not be read or written.
    #[error("Backup error: {0}")]
    BackupError(String),
}
