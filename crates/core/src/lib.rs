//! Core domain types, topic classification, prompt building and reply
//! parsing for AI-generated slide decks.

pub mod backup;
pub mod bullets;
pub mod classify;
pub mod error;
pub mod oracle;
pub mod parse;
pub mod preview;
pub mod prompt;
pub mod quality;
pub mod requestor;
pub mod session;
pub mod theme;
pub mod types;

pub use backup::{download_filename, PPTX_MIME_TYPE};
pub use classify::{classify_topic, Category, TopicProfile};
pub use error::{Error, Result};
pub use oracle::{Oracle, OracleRequest};
pub use parse::ParseMode;
pub use preview::PreviewFormatter;
pub use requestor::{Generation, SlideRequestor};
pub use session::DeckSession;
pub use theme::{ColorScheme, DesignTemplate, RgbColor, ThemeConfig};
pub use types::{
    Audience, Deck, FontSizes, GenerationRequest, Slide, SlideCount, TalkLength,
};
