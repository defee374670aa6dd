//! Placeholder strings and geometry used by the compiler.
//!
//! Every default the compiler falls back on lives in [`LayoutDefaults`], so
//! there is one place to change what an untitled deck or section looks like.

use super::model::{Frame, HAlign, Length, TextStyle, VAlign};

// =============================================================================
// Default Values
// =============================================================================

/// Title used when the generation result has none.
pub const DEFAULT_DECK_TITLE: &str = "AI Generated Presentation";

/// Heading used for a section without one.
pub const DEFAULT_SECTION_HEADING: &str = "Slide";

/// Heading of the fallback slide and of pipeline-built sections.
pub const DEFAULT_RESPONSE_HEADING: &str = "AI Response";

/// Suffix appended to headings of continuation slides.
pub const CONTINUATION_SUFFIX: &str = " (cont.)";

/// Slide width in inches (16:9).
pub const SLIDE_WIDTH_INCHES: f64 = 10.0;

/// Slide height in inches (16:9).
pub const SLIDE_HEIGHT_INCHES: f64 = 5.625;

// =============================================================================
// Layout Defaults
// =============================================================================

/// Geometry and style for one kind of block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockLayout {
    pub frame: Frame,
    pub style: TextStyle,
}

/// Geometry of bullet lines on a content slide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletLayout {
    /// Frame of the first bullet; later bullets shift down by `line_pitch`
    pub frame: Frame,
    pub style: TextStyle,

    /// Vertical offset of the first bullet, in inches
    pub base_offset: f64,

    /// Distance between consecutive bullets, in inches
    pub line_pitch: f64,
}

impl BulletLayout {
    /// Vertical offset of the bullet at `index` among emitted lines.
    pub fn offset(&self, index: usize) -> f64 {
        self.base_offset + index as f64 * self.line_pitch
    }

    /// Frame of the bullet at `index` among emitted lines.
    pub fn frame_at(&self, index: usize) -> Frame {
        self.frame.at_y(Length::Inches(self.offset(index)))
    }
}

/// Everything the compiler needs to know besides its input.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDefaults {
    pub deck_title: String,
    pub section_heading: String,
    pub fallback_heading: String,
    pub continuation_suffix: String,

    /// Title slide heading
    pub title: BlockLayout,

    /// Heading of each content slide
    pub heading: BlockLayout,

    pub bullet: BulletLayout,

    /// Body block of the fallback slide
    pub body: BlockLayout,

    /// Split sections longer than this into continuation slides.
    ///
    /// `None` keeps every section on a single slide regardless of length.
    pub max_lines_per_slide: Option<usize>,
}

impl Default for LayoutDefaults {
    fn default() -> Self {
        Self {
            deck_title: DEFAULT_DECK_TITLE.to_string(),
            section_heading: DEFAULT_SECTION_HEADING.to_string(),
            fallback_heading: DEFAULT_RESPONSE_HEADING.to_string(),
            continuation_suffix: CONTINUATION_SUFFIX.to_string(),
            title: BlockLayout {
                frame: Frame::new(
                    Length::Inches(1.0),
                    Length::Inches(1.0),
                    Length::Percent(90.0),
                    Length::Inches(2.0),
                ),
                style: TextStyle {
                    font_size: 36.0,
                    bold: true,
                    align: HAlign::Center,
                    valign: VAlign::Middle,
                },
            },
            heading: BlockLayout {
                frame: Frame::new(
                    Length::Inches(0.5),
                    Length::Inches(0.5),
                    Length::Percent(90.0),
                    Length::Inches(0.6),
                ),
                style: TextStyle {
                    font_size: 24.0,
                    bold: true,
                    align: HAlign::Left,
                    valign: VAlign::Top,
                },
            },
            bullet: BulletLayout {
                frame: Frame::new(
                    Length::Inches(0.8),
                    Length::Inches(1.2),
                    Length::Percent(90.0),
                    Length::Inches(0.5),
                ),
                style: TextStyle {
                    font_size: 16.0,
                    bold: false,
                    align: HAlign::Left,
                    valign: VAlign::Top,
                },
                base_offset: 1.2,
                line_pitch: 0.6,
            },
            body: BlockLayout {
                frame: Frame::new(
                    Length::Inches(0.8),
                    Length::Inches(1.2),
                    Length::Percent(90.0),
                    Length::Inches(4.0),
                ),
                style: TextStyle {
                    font_size: 12.0,
                    bold: false,
                    align: HAlign::Left,
                    valign: VAlign::Top,
                },
            },
            max_lines_per_slide: None,
        }
    }
}

impl LayoutDefaults {
    /// Enable splitting of long sections into continuation slides.
    pub fn with_max_lines_per_slide(mut self, max_lines: Option<usize>) -> Self {
        self.max_lines_per_slide = max_lines.filter(|n| *n > 0);
        self
    }
}
