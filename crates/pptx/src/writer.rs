//! PPTX generation from a deck.
//!
//! Every slide uses a blank layout and carries up to four elements: a solid
//! background, a title box, a content box and a decorative bar. Title and
//! content failures abort the render; background and bar failures are
//! reported as [`RenderWarning`]s and the element is left out.

use std::fmt;
use std::io::{Cursor, Seek, Write};

use chrono::{DateTime, Utc};
use deck_core::bullets::{clean_lines, with_bullet};
use deck_core::{
    Deck, DeckSession, DesignTemplate, Error, FontSizes, Result, Slide, ThemeConfig,
};
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::constants::*;
use crate::geometry::{content_rect, decorative_bar_rect, title_rect, SlideSize};
use crate::xml::{self, ParagraphStyle, RunStyle};

const TITLE_SHAPE_ID: u32 = 2;
const CONTENT_SHAPE_ID: u32 = 3;
const BAR_SHAPE_ID: u32 = 4;

/// Options controlling how a deck is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub fonts: FontSizes,
    pub template: DesignTemplate,
    /// Prefix content lines with `• `.
    pub use_bullets: bool,
    pub slide_size: SlideSize,
    /// Document title; defaults to the first slide title.
    pub title: Option<String>,
    pub author: Option<String>,
    /// Creation time written to the document properties; defaults to now.
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fonts: FontSizes::default(),
            template: DesignTemplate::default(),
            use_bullets: true,
            slide_size: SlideSize::default(),
            title: None,
            author: None,
            timestamp: None,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fonts(mut self, fonts: FontSizes) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_template(mut self, template: DesignTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_bullets(mut self, use_bullets: bool) -> Self {
        self.use_bullets = use_bullets;
        self
    }

    pub fn with_slide_size(mut self, slide_size: SlideSize) -> Self {
        self.slide_size = slide_size;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl From<&DeckSession> for RenderOptions {
    fn from(session: &DeckSession) -> Self {
        Self::default()
            .with_fonts(session.fonts)
            .with_template(session.template)
            .with_bullets(session.use_bullets)
    }
}

/// A slide element that may be dropped without failing the render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CosmeticElement {
    Background,
    DecorativeBar,
}

impl fmt::Display for CosmeticElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CosmeticElement::Background => f.write_str("background"),
            CosmeticElement::DecorativeBar => f.write_str("decorative bar"),
        }
    }
}

/// A cosmetic element that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderWarning {
    /// 1-based slide number.
    pub slide: usize,
    pub element: CosmeticElement,
    pub reason: String,
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slide {}: {} skipped ({})",
            self.slide, self.element, self.reason
        )
    }
}

/// The rendered package and any skipped cosmetic elements.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub bytes: Vec<u8>,
    pub warnings: Vec<RenderWarning>,
}

/// Renders decks into PPTX packages held in memory.
#[derive(Debug, Clone, Default)]
pub struct DeckRenderer {
    options: RenderOptions,
}

impl DeckRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the deck to PPTX bytes.
    pub fn render(&self, deck: &Deck) -> Result<RenderOutput> {
        let theme = self.options.template.theme();
        let mut warnings = Vec::new();

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        self.write_package_parts(&mut zip, options, deck)?;

        for (i, slide) in deck.iter().enumerate() {
            let number = i + 1;
            log::debug!("Rendering slide {}/{}", number, deck.len());
            let content = self.slide_xml(number, slide, &theme, &mut warnings)?;
            write_part(&mut zip, options, &format!("ppt/slides/slide{}.xml", number), &content)?;
            write_part(
                &mut zip,
                options,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                &slide_rels(),
            )?;
        }

        let cursor = zip.finish().map_err(zip_error)?;
        for warning in &warnings {
            log::warn!("{}", warning);
        }
        log::debug!(
            "Rendered {} slides ({} cosmetic warnings)",
            deck.len(),
            warnings.len()
        );

        Ok(RenderOutput {
            bytes: cursor.into_inner(),
            warnings,
        })
    }

    fn write_package_parts<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: FileOptions,
        deck: &Deck,
    ) -> Result<()> {
        write_part(zip, options, "[Content_Types].xml", &content_types(deck.len()))?;
        write_part(zip, options, "_rels/.rels", ROOT_RELS)?;
        write_part(zip, options, "docProps/app.xml", &self.app_xml(deck.len()))?;
        write_part(zip, options, "docProps/core.xml", &self.core_xml(deck))?;
        write_part(zip, options, "ppt/presentation.xml", &self.presentation_xml(deck.len()))?;
        write_part(
            zip,
            options,
            "ppt/_rels/presentation.xml.rels",
            &presentation_rels(deck.len()),
        )?;
        write_part(zip, options, "ppt/presProps.xml", &pres_props())?;
        write_part(zip, options, "ppt/viewProps.xml", &view_props())?;
        write_part(zip, options, "ppt/tableStyles.xml", &table_styles())?;
        write_part(zip, options, "ppt/theme/theme1.xml", &self.theme_xml())?;
        write_part(zip, options, "ppt/slideMasters/slideMaster1.xml", &slide_master())?;
        write_part(
            zip,
            options,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &slide_master_rels(),
        )?;
        write_part(zip, options, "ppt/slideLayouts/slideLayout1.xml", &blank_layout())?;
        write_part(
            zip,
            options,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &slide_layout_rels(),
        )?;
        Ok(())
    }

    /// Build one slide part, collecting warnings for skipped cosmetics.
    fn slide_xml(
        &self,
        number: usize,
        slide: &Slide,
        theme: &ThemeConfig,
        warnings: &mut Vec<RenderWarning>,
    ) -> Result<String> {
        let size = &self.options.slide_size;

        let background = match xml::background(theme.background_color) {
            Ok(fragment) => fragment,
            Err(reason) => {
                warnings.push(RenderWarning {
                    slide: number,
                    element: CosmeticElement::Background,
                    reason,
                });
                String::new()
            }
        };

        let mut shapes = String::new();

        let title_paragraphs: Vec<String> = slide
            .title
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        // A text body needs at least one paragraph; blank text gets no box.
        if !title_paragraphs.is_empty() {
            let run = RunStyle {
                size_pt: self.options.fonts.rendered_title(),
                bold: true,
                color: theme.title_color,
            };
            let para = ParagraphStyle {
                align: Some("ctr"),
                space_after_pt: None,
            };
            let name = format!("{} {}", TITLE_SHAPE_PREFIX, TITLE_SHAPE_ID - 1);
            let fragment = xml::text_box(
                TITLE_SHAPE_ID,
                &name,
                &title_rect(size),
                &title_paragraphs,
                &run,
                &para,
            )
            .map_err(|e| Error::RenderContentFailed(format!("slide {} title: {}", number, e)))?;
            shapes.push_str(&fragment);
        }

        let content_paragraphs: Vec<String> = clean_lines(&slide.content)
            .iter()
            .map(|line| with_bullet(line, self.options.use_bullets))
            .collect();
        if !content_paragraphs.is_empty() {
            let run = RunStyle {
                size_pt: self.options.fonts.content(),
                bold: false,
                color: theme.content_color,
            };
            let para = ParagraphStyle {
                align: None,
                space_after_pt: Some(PARAGRAPH_SPACE_AFTER_PT),
            };
            let name = format!("{} {}", CONTENT_SHAPE_PREFIX, CONTENT_SHAPE_ID - 1);
            let fragment = xml::text_box(
                CONTENT_SHAPE_ID,
                &name,
                &content_rect(size),
                &content_paragraphs,
                &run,
                &para,
            )
            .map_err(|e| Error::RenderContentFailed(format!("slide {} content: {}", number, e)))?;
            shapes.push_str(&fragment);
        }

        let bar = decorative_bar_rect(size);
        let bar_fragment = if size.contains(&bar) {
            xml::filled_rect(BAR_SHAPE_ID, "Decorative Bar 3", &bar, theme.title_color)
        } else {
            Err(format!(
                "bar at y={} with height {} EMU does not fit a {}x{} canvas",
                bar.y, bar.cy, size.width, size.height
            ))
        };
        match bar_fragment {
            Ok(fragment) => shapes.push_str(&fragment),
            Err(reason) => warnings.push(RenderWarning {
                slide: number,
                element: CosmeticElement::DecorativeBar,
                reason,
            }),
        }

        Ok(format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>{}<p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
{}
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, background, shapes
        ))
    }

    fn app_xml(&self, slide_count: usize) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <TotalTime>0</TotalTime>
  <Application>deckgen</Application>
  <PresentationFormat>{}</PresentationFormat>
  <Slides>{}</Slides>
  <Notes>0</Notes>
  <HiddenSlides>0</HiddenSlides>
  <ScaleCrop>false</ScaleCrop>
  <LinksUpToDate>false</LinksUpToDate>
  <SharedDoc>false</SharedDoc>
  <HyperlinksChanged>false</HyperlinksChanged>
  <AppVersion>1.0</AppVersion>
</Properties>"#,
            self.options.slide_size.format_name(),
            slide_count
        )
    }

    fn core_xml(&self, deck: &Deck) -> String {
        let title = self
            .options
            .title
            .as_deref()
            .or_else(|| deck.first_title().filter(|t| !t.is_empty()))
            .unwrap_or("Presentation");
        let author = self.options.author.as_deref().unwrap_or("deckgen");
        let now = self
            .options
            .timestamp
            .unwrap_or_else(Utc::now)
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{}</dc:title>
  <dc:creator>{}</dc:creator>
  <cp:lastModifiedBy>{}</cp:lastModifiedBy>
  <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>
</cp:coreProperties>"#,
            escape_xml(title),
            escape_xml(author),
            escape_xml(author),
            now,
            now
        )
    }

    fn presentation_xml(&self, slide_count: usize) -> String {
        let size = self.options.slide_size;
        let slide_ids: String = (1..=slide_count)
            .map(|i| {
                // rId1 = master, rId2 = presProps, rId3 = theme, rId4.. = slides
                format!("    <p:sldId id=\"{}\" r:id=\"rId{}\"/>\n", 255 + i, i + 3)
            })
            .collect();

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">
  <p:sldMasterIdLst>
    <p:sldMasterId id="2147483648" r:id="rId1"/>
  </p:sldMasterIdLst>
  <p:sldIdLst>
{}  </p:sldIdLst>
  <p:sldSz cx="{}" cy="{}"/>
  <p:notesSz cx="{}" cy="{}"/>
</p:presentation>"#,
            NS_DRAWING,
            NS_RELATIONSHIPS,
            NS_PRESENTATION,
            slide_ids,
            size.width,
            size.height,
            size.height,
            size.width
        )
    }

    fn theme_xml(&self) -> String {
        let theme = self.options.template.theme();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="{ns}" name="{name}">
  <a:themeElements>
    <a:clrScheme name="{name}">
      <a:dk1><a:srgbClr val="{content}"/></a:dk1>
      <a:lt1><a:srgbClr val="{background}"/></a:lt1>
      <a:dk2><a:srgbClr val="44546A"/></a:dk2>
      <a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
      <a:accent1><a:srgbClr val="{title}"/></a:accent1>
      <a:accent2><a:srgbClr val="ED7D31"/></a:accent2>
      <a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>
      <a:accent4><a:srgbClr val="FFC000"/></a:accent4>
      <a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>
      <a:accent6><a:srgbClr val="70AD47"/></a:accent6>
      <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
      <a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="{name}">
      <a:majorFont>
        <a:latin typeface="{font}"/>
        <a:ea typeface="{font}"/>
        <a:cs typeface=""/>
      </a:majorFont>
      <a:minorFont>
        <a:latin typeface="{font}"/>
        <a:ea typeface="{font}"/>
        <a:cs typeface=""/>
      </a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="{name}">
      <a:fillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:fillStyleLst>
      <a:lnStyleLst>
        <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
      </a:lnStyleLst>
      <a:effectStyleLst>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
      </a:effectStyleLst>
      <a:bgFillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#,
            ns = NS_DRAWING,
            name = self.options.template.name(),
            content = theme.content_color.to_hex(),
            background = theme.background_color.to_hex(),
            title = theme.title_color.to_hex(),
            font = FONT_FACE,
        )
    }
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

fn content_types(slide_count: usize) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
  <Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/>
  <Override PartName="/ppt/viewProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml"/>
  <Override PartName="/ppt/tableStyles.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml"/>
  <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
  <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
  <Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#,
    );
    for i in 1..=slide_count {
        content.push_str(&format!(
            "  <Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>\n",
            i
        ));
    }
    content.push_str("</Types>");
    content
}

fn presentation_rels(slide_count: usize) -> String {
    let mut rels = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId2" Type="{}" Target="presProps.xml"/>
  <Relationship Id="rId3" Type="{}" Target="theme/theme1.xml"/>
"#,
        NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_MASTER, REL_TYPE_PRES_PROPS, REL_TYPE_THEME
    );
    // Slides take rId4..; view and table style parts follow them.
    let next = slide_count + 4;
    rels.push_str(&format!(
        "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"viewProps.xml\"/>\n",
        next, REL_TYPE_VIEW_PROPS
    ));
    rels.push_str(&format!(
        "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"tableStyles.xml\"/>\n",
        next + 1,
        REL_TYPE_TABLE_STYLES
    ));
    for i in 1..=slide_count {
        rels.push_str(&format!(
            "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"slides/slide{}.xml\"/>\n",
            i + 3,
            REL_TYPE_SLIDE,
            i
        ));
    }
    rels.push_str("</Relationships>");
    rels
}

fn pres_props() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentationPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"/>"#,
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    )
}

fn view_props() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:viewPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:normalViewPr>
    <p:restoredLeft sz="15620"/>
    <p:restoredTop sz="94660"/>
  </p:normalViewPr>
</p:viewPr>"#,
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    )
}

fn table_styles() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:tblStyleLst xmlns:a="{}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#,
        NS_DRAWING
    )
}

fn slide_master() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:bg>
      <p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef>
    </p:bg>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst>
    <p:sldLayoutId id="2147483649" r:id="rId1"/>
  </p:sldLayoutIdLst>
</p:sldMaster>"#,
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    )
}

fn slide_master_rels() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout1.xml"/>
  <Relationship Id="rId2" Type="{}" Target="../theme/theme1.xml"/>
</Relationships>"#,
        NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_LAYOUT, REL_TYPE_THEME
    )
}

fn blank_layout() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="blank" preserve="1">
  <p:cSld name="Blank">
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#,
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    )
}

fn slide_layout_rels() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#,
        NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_MASTER
    )
}

fn slide_rels() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout1.xml"/>
</Relationships>"#,
        NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_LAYOUT
    )
}

fn write_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    options: FileOptions,
    path: &str,
    content: &str,
) -> Result<()> {
    zip.start_file(path, options).map_err(zip_error)?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

fn zip_error(e: zip::result::ZipError) -> Error {
    Error::ZipError(e.to_string())
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Read;
    use zip::ZipArchive;

    fn sample_deck() -> Deck {
        Deck::new(vec![
            Slide::new("AI 기반 교육 전략", "현황 분석\n도입 방안\n기대 효과"),
            Slide::new("결론", "요약"),
        ])
    }

    fn read_part(bytes: &[u8], path: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(path).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_render_empty_deck() {
        let output = DeckRenderer::default().render(&Deck::default()).unwrap();
        let archive = ZipArchive::new(Cursor::new(output.bytes)).unwrap();
        assert!(archive.file_names().any(|n| n == "ppt/presentation.xml"));
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_render_writes_every_slide() {
        let output = DeckRenderer::default().render(&sample_deck()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(output.bytes.clone())).unwrap();
        assert!(archive.by_name("ppt/slides/slide1.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide2.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide3.xml").is_err());

        let presentation = read_part(&output.bytes, "ppt/presentation.xml");
        assert!(presentation.contains("<p:sldId id=\"257\" r:id=\"rId5\"/>"));
        assert!(presentation.contains("<p:sldSz cx=\"9144000\" cy=\"6858000\"/>"));
    }

    #[test]
    fn test_slide_uses_theme_fonts_and_bullets() {
        let options = RenderOptions::new()
            .with_template(DesignTemplate::Dark)
            .with_fonts(FontSizes::new(30, 20).unwrap());
        let output = DeckRenderer::new(options).render(&sample_deck()).unwrap();
        let slide = read_part(&output.bytes, "ppt/slides/slide1.xml");

        // dark: title 79,172,254 / content white / background 26,26,26
        assert!(slide.contains("<a:srgbClr val=\"1A1A1A\"/>"));
        assert!(slide.contains("<a:srgbClr val=\"4FACFE\"/>"));
        assert!(slide.contains("<a:srgbClr val=\"FFFFFF\"/>"));
        assert!(slide.contains("sz=\"3800\""));
        assert!(slide.contains("sz=\"2000\""));
        assert!(slide.contains("<a:t>• 현황 분석</a:t>"));
        assert!(slide.contains("name=\"Decorative Bar 3\""));
    }

    #[test]
    fn test_bullets_off() {
        let options = RenderOptions::new().with_bullets(false);
        let output = DeckRenderer::new(options).render(&sample_deck()).unwrap();
        let slide = read_part(&output.bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains("<a:t>현황 분석</a:t>"));
        assert!(!slide.contains("•"));
    }

    #[test]
    fn test_empty_title_and_content_are_omitted() {
        let deck = Deck::new(vec![Slide::new("", "")]);
        let output = DeckRenderer::default().render(&deck).unwrap();
        let slide = read_part(&output.bytes, "ppt/slides/slide1.xml");
        assert!(!slide.contains("name=\"Title 1\""));
        assert!(!slide.contains("name=\"Content 2\""));
        assert!(slide.contains("<p:bg>"));
    }

    #[test]
    fn test_blank_text_gets_no_text_box() {
        let deck = Deck::new(vec![Slide {
            title: " \n ".into(),
            content: "•\n  - ".into(),
        }]);
        let output = DeckRenderer::default().render(&deck).unwrap();
        let slide = read_part(&output.bytes, "ppt/slides/slide1.xml");
        assert!(!slide.contains("<p:txBody>"));
        assert!(!slide.contains("name=\"Title 1\""));
        assert!(!slide.contains("name=\"Content 2\""));
        assert!(slide.contains("name=\"Decorative Bar 3\""));
    }

    #[test]
    fn test_presentation_rels_cover_every_part() {
        let output = DeckRenderer::default().render(&sample_deck()).unwrap();
        let rels = read_part(&output.bytes, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains("Id=\"rId5\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide\" Target=\"slides/slide2.xml\""));
        assert!(rels.contains(&format!(
            "Id=\"rId6\" Type=\"{}\" Target=\"viewProps.xml\"",
            REL_TYPE_VIEW_PROPS
        )));
        assert!(rels.contains(&format!(
            "Id=\"rId7\" Type=\"{}\" Target=\"tableStyles.xml\"",
            REL_TYPE_TABLE_STYLES
        )));
        for part in ["presProps.xml", "viewProps.xml", "tableStyles.xml", "theme/theme1.xml"] {
            assert!(rels.contains(&format!("Target=\"{}\"", part)), "{}", part);
        }
    }

    #[test]
    fn test_bar_outside_tiny_canvas_is_a_warning() {
        let options =
            RenderOptions::new().with_slide_size(SlideSize::custom(400_000, 300_000).unwrap());
        let output = DeckRenderer::new(options).render(&sample_deck()).unwrap();

        assert_eq!(output.warnings.len(), 2);
        assert!(output
            .warnings
            .iter()
            .all(|w| w.element == CosmeticElement::DecorativeBar));
        assert_eq!(output.warnings[1].slide, 2);

        let slide = read_part(&output.bytes, "ppt/slides/slide1.xml");
        assert!(!slide.contains("Decorative Bar"));
        assert!(slide.contains("name=\"Title 1\""));
    }

    #[test]
    fn test_core_properties() {
        let options = RenderOptions::new()
            .with_author("R&D")
            .with_timestamp(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap());
        let output = DeckRenderer::new(options).render(&sample_deck()).unwrap();
        let core = read_part(&output.bytes, "docProps/core.xml");
        assert!(core.contains("<dc:title>AI 기반 교육 전략</dc:title>"));
        assert!(core.contains("<dc:creator>R&amp;D</dc:creator>"));
        assert!(core.contains("2026-10-19T09:00:00Z"));
    }

    #[test]
    fn test_options_from_session() {
        let session = DeckSession::new()
            .with_template(DesignTemplate::Corporate)
            .with_bullets(false);
        let options = RenderOptions::from(&session);
        assert_eq!(options.template, DesignTemplate::Corporate);
        assert!(!options.use_bullets);
        assert_eq!(options.slide_size, SlideSize::STANDARD);
    }
}
