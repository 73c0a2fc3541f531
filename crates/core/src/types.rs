//! Domain types for representing a generated slide deck.

use crate::bullets;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title used for a padding slide at 1-based position `n`.
pub fn placeholder_title(n: usize) -> String {
    format!("슬라이드 {}", n)
}

/// Content used for padding slides.
pub const PLACEHOLDER_CONTENT: &str = "내용을 추가해주세요";

/// A single slide: a title and newline-separated content lines.
///
/// Content never contains leading bullet glyphs; every constructor and
/// setter runs it through [`bullets::sanitize_content`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawSlide")]
pub struct Slide {
    pub title: String,
    pub content: String,
}

/// Unsanitized wire form of a slide, as produced by the oracle or a backup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSlide {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl From<RawSlide> for Slide {
    fn from(raw: RawSlide) -> Self {
        Slide::new(raw.title, raw.content)
    }
}

impl Slide {
    /// Create a slide, trimming the title and sanitizing the content.
    pub fn new(title: impl Into<String>, content: impl AsRef<str>) -> Self {
        Self {
            title: title.into().trim().to_string(),
            content: bullets::sanitize_content(content.as_ref()),
        }
    }

    /// Padding slide for 1-based position `n`.
    pub fn placeholder(n: usize) -> Self {
        Self::new(placeholder_title(n), PLACEHOLDER_CONTENT)
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into().trim().to_string();
    }

    /// Replace the content, stripping bullet glyphs.
    pub fn set_content(&mut self, content: impl AsRef<str>) {
        self.content = bullets::sanitize_content(content.as_ref());
    }

    /// Content lines, in order.
    pub fn lines(&self) -> Vec<&str> {
        self.content.lines().filter(|l| !l.is_empty()).collect()
    }

    /// Whether the slide has neither title nor content.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}

/// An ordered sequence of slides produced for one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create a deck from slides as they are.
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    /// Create a deck of exactly `len` slides, truncating extras and padding
    /// with placeholder slides.
    pub fn with_exact_len(mut slides: Vec<Slide>, len: usize) -> Self {
        slides.truncate(len);
        while slides.len() < len {
            slides.push(Slide::placeholder(slides.len() + 1));
        }
        Self { slides }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Mutable access to a slide for in-place edits.
    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    /// Title of the first slide, if any.
    pub fn first_title(&self) -> Option<&str> {
        self.slides.first().map(|s| s.title.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.slides.iter()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Slide;
    type IntoIter = std::slice::Iter<'a, Slide>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

/// Requested number of slides, restricted to the supported choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct SlideCount(usize);

impl SlideCount {
    /// Supported slide counts.
    pub const SUPPORTED: [usize; 6] = [5, 8, 10, 12, 15, 20];

    /// Validate a slide count.
    pub fn new(count: usize) -> Result<Self> {
        if Self::SUPPORTED.contains(&count) {
            Ok(Self(count))
        } else {
            Err(Error::InvalidSlideCount(count))
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for SlideCount {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<usize> for SlideCount {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SlideCount> for usize {
    fn from(count: SlideCount) -> usize {
        count.0
    }
}

impl fmt::Display for SlideCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Title and content font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizes {
    title: u32,
    content: u32,
}

impl FontSizes {
    pub const TITLE_RANGE: (u32, u32) = (18, 36);
    pub const CONTENT_RANGE: (u32, u32) = (12, 24);

    /// Extra points added to the title size when rendering.
    pub const TITLE_BOOST: u32 = 8;

    /// Validate both sizes against their ranges.
    pub fn new(title: u32, content: u32) -> Result<Self> {
        check_range("title", title, Self::TITLE_RANGE)?;
        check_range("content", content, Self::CONTENT_RANGE)?;
        Ok(Self { title, content })
    }

    /// Configured title size.
    pub fn title(&self) -> u32 {
        self.title
    }

    /// Configured content size.
    pub fn content(&self) -> u32 {
        self.content
    }

    /// Size actually used for slide titles.
    pub fn rendered_title(&self) -> u32 {
        self.title + Self::TITLE_BOOST
    }
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 24,
            content: 16,
        }
    }
}

fn check_range(kind: &'static str, size: u32, (min, max): (u32, u32)) -> Result<()> {
    if (min..=max).contains(&size) {
        Ok(())
    } else {
        Err(Error::InvalidFontSize {
            kind,
            size,
            min,
            max,
        })
    }
}

/// Who the presentation is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    Team,
    Client,
    Executive,
    Student,
    Public,
}

impl Audience {
    pub const ALL: [Audience; 5] = [
        Audience::Team,
        Audience::Client,
        Audience::Executive,
        Audience::Student,
        Audience::Public,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Client => "client",
            Self::Executive => "executive",
            Self::Student => "student",
            Self::Public => "public",
        }
    }

    /// Label embedded in the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Team => "팀원/동료",
            Self::Client => "고객/클라이언트",
            Self::Executive => "경영진",
            Self::Student => "학생/교육생",
            Self::Public => "일반 대중",
        }
    }
}

impl FromStr for Audience {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.key().eq_ignore_ascii_case(s.trim()) || a.label() == s.trim())
            .ok_or_else(|| Error::InvalidOption(format!("unknown audience '{}'", s)))
    }
}

/// Expected speaking time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TalkLength {
    Min5,
    Min10,
    #[default]
    Min15,
    Min20,
    Min30,
    Min60Plus,
}

impl TalkLength {
    pub const ALL: [TalkLength; 6] = [
        TalkLength::Min5,
        TalkLength::Min10,
        TalkLength::Min15,
        TalkLength::Min20,
        TalkLength::Min30,
        TalkLength::Min60Plus,
    ];

    pub fn minutes(&self) -> u32 {
        match self {
            Self::Min5 => 5,
            Self::Min10 => 10,
            Self::Min15 => 15,
            Self::Min20 => 20,
            Self::Min30 => 30,
            Self::Min60Plus => 60,
        }
    }

    /// Label embedded in the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Min5 => "5분",
            Self::Min10 => "10분",
            Self::Min15 => "15분",
            Self::Min20 => "20분",
            Self::Min30 => "30분",
            Self::Min60Plus => "60분+",
        }
    }
}

impl FromStr for TalkLength {
    type Err = Error;

    /// Accepts `15`, `15m`, `15분` and `60+`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.ends_with('+') {
            return Ok(Self::Min60Plus);
        }
        let digits = s.trim_end_matches(['m', '분']);
        let minutes: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidOption(format!("unknown talk length '{}'", s)))?;
        Self::ALL
            .into_iter()
            .find(|t| t.minutes() == minutes)
            .ok_or_else(|| Error::InvalidOption(format!("unsupported talk length '{}'", s)))
    }
}

/// Default style label sent with every request.
pub const DEFAULT_STYLE: &str = "비즈니스 (전문적)";

/// Everything the Requestor needs for one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    pub slide_count: SlideCount,
    pub style: String,
    pub audience: Audience,
    pub talk_length: TalkLength,
}

impl GenerationRequest {
    /// Create a request with default style, audience and talk length.
    pub fn new(topic: impl Into<String>, slide_count: SlideCount) -> Self {
        Self {
            topic: topic.into(),
            slide_count,
            style: DEFAULT_STYLE.to_string(),
            audience: Audience::default(),
            talk_length: TalkLength::default(),
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = audience;
        self
    }

    pub fn with_talk_length(mut self, talk_length: TalkLength) -> Self {
        self.talk_length = talk_length;
        self
    }
}
