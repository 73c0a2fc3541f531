//! Canvas sizes and shape placement.
//!
//! All placements are fractions of the canvas so the same layout works on
//! 4:3, 16:9 and custom sizes.

use crate::constants::*;
use deck_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Slide canvas size in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSize {
    pub width: i64,
    pub height: i64,
}

impl SlideSize {
    /// 4:3, 10" x 7.5"
    pub const STANDARD: SlideSize = SlideSize {
        width: DEFAULT_SLIDE_WIDTH_EMU,
        height: DEFAULT_SLIDE_HEIGHT_EMU,
    };

    /// 16:9, 13.333" x 7.5"
    pub const WIDESCREEN: SlideSize = SlideSize {
        width: WIDESCREEN_SLIDE_WIDTH_EMU,
        height: DEFAULT_SLIDE_HEIGHT_EMU,
    };

    /// A custom canvas; both sides must be positive.
    pub fn custom(width: i64, height: i64) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidOption(format!(
                "slide size must be positive, got {}x{} EMU",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    /// Parse `4:3`, `16:9` or `<width>x<height>` in EMU.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "4:3" | "standard" => Ok(Self::STANDARD),
            "16:9" | "widescreen" => Ok(Self::WIDESCREEN),
            other => {
                let (w, h) = other.split_once('x').ok_or_else(|| {
                    Error::InvalidOption(format!("unrecognized slide size '{}'", other))
                })?;
                let parse = |v: &str| {
                    v.trim().parse::<i64>().map_err(|_| {
                        Error::InvalidOption(format!("unrecognized slide size '{}'", other))
                    })
                };
                Self::custom(parse(w)?, parse(h)?)
            }
        }
    }

    /// Label used in `docProps/app.xml`.
    pub fn format_name(&self) -> &'static str {
        if *self == Self::STANDARD {
            "On-screen Show (4:3)"
        } else if *self == Self::WIDESCREEN {
            "Widescreen"
        } else {
            "Custom"
        }
    }

    /// Rectangle at fractional offsets of this canvas.
    pub fn fraction(&self, left: f64, top: f64, width: f64, height: f64) -> Rect {
        Rect {
            x: (self.width as f64 * left).round() as i64,
            y: (self.height as f64 * top).round() as i64,
            cx: (self.width as f64 * width).round() as i64,
            cy: (self.height as f64 * height).round() as i64,
        }
    }

    pub fn contains(&self, rect: &Rect) -> bool {
        rect.x >= 0
            && rect.y >= 0
            && rect.cx > 0
            && rect.cy > 0
            && rect.x + rect.cx <= self.width
            && rect.y + rect.cy <= self.height
    }
}

impl Default for SlideSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Position and extent of a shape, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

/// Title box: 5% left, 10% top, 90% x 20%.
pub fn title_rect(size: &SlideSize) -> Rect {
    size.fraction(0.05, 0.10, 0.90, 0.20)
}

/// Content box: 10% left, 35% top, 80% x 50%.
pub fn content_rect(size: &SlideSize) -> Rect {
    size.fraction(0.10, 0.35, 0.80, 0.50)
}

/// Decorative bar: 10% left, 90% top, 80% wide and a fixed 4pt high.
pub fn decorative_bar_rect(size: &SlideSize) -> Rect {
    let mut rect = size.fraction(0.10, 0.90, 0.80, 0.0);
    rect.cy = DECORATIVE_BAR_HEIGHT_PT * EMU_PER_POINT;
    rect
}
