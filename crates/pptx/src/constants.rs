//! OOXML namespaces, relationship types and unit conversions.

/// DrawingML main namespace
pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

/// Office document relationships namespace
pub const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// PresentationML main namespace
pub const NS_PRESENTATION: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

/// Package relationships namespace (for `.rels` parts)
pub const NS_PACKAGE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";

pub const REL_TYPE_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

pub const REL_TYPE_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

pub const REL_TYPE_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

pub const REL_TYPE_THEME: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

pub const REL_TYPE_PRES_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";

pub const REL_TYPE_VIEW_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";

pub const REL_TYPE_TABLE_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";

/// Default slide width in EMU (10", 4:3)
pub const DEFAULT_SLIDE_WIDTH_EMU: i64 = 9_144_000;

/// Default slide height in EMU (7.5")
pub const DEFAULT_SLIDE_HEIGHT_EMU: i64 = 6_858_000;

/// Widescreen 16:9 slide width in EMU (13.333")
pub const WIDESCREEN_SLIDE_WIDTH_EMU: i64 = 12_192_000;

pub const EMU_PER_POINT: i64 = 12_700;

/// Font size units per point (`sz` attributes are hundredths of a point)
pub const FONT_UNITS_PER_POINT: u32 = 100;

/// Korean-capable typeface used for every text run.
pub const FONT_FACE: &str = "맑은 고딕";

/// Language tag on text runs.
pub const TEXT_LANG: &str = "ko-KR";

/// Space after each content paragraph, in points.
pub const PARAGRAPH_SPACE_AFTER_PT: u32 = 12;

/// Height of the decorative bar, in points.
pub const DECORATIVE_BAR_HEIGHT_PT: i64 = 4;

/// Shape name prefixes the reader uses to recover slide text.
pub const TITLE_SHAPE_PREFIX: &str = "Title";
pub const CONTENT_SHAPE_PREFIX: &str = "Content";
