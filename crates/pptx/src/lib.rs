//! PPTX (Office Open XML) rendering and reading for generated slide decks.
//!
//! A PPTX file is a ZIP archive of XML parts. [`DeckRenderer`] writes one
//! slide per deck entry into an in-memory package; [`PptxReader`] recovers
//! the slide text from such a package.

pub mod constants;
pub mod geometry;
pub mod reader;
pub mod writer;
mod xml;

pub use geometry::SlideSize;
pub use reader::PptxReader;
pub use writer::{CosmeticElement, DeckRenderer, RenderOptions, RenderOutput, RenderWarning};
