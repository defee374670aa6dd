//! Slide layout model.
//!
//! Plain data describing a compiled deck. Geometry is expressed in inches or
//! as a percentage of the slide extent; conversion to package units happens
//! in the serializer.

use serde::Serialize;

// =============================================================================
// Geometry
// =============================================================================

/// A position or size along one slide axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Length {
    /// Absolute length in inches
    Inches(f64),

    /// Percentage (0-100) of the slide extent along the same axis
    Percent(f64),
}

impl Length {
    /// Resolve to an absolute length in inches given the axis extent.
    pub fn resolve_inches(self, extent_inches: f64) -> f64 {
        match self {
            Length::Inches(v) => v,
            Length::Percent(p) => extent_inches * p / 100.0,
        }
    }
}

/// Bounding box of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub x: Length,
    pub y: Length,
    pub width: Length,
    pub height: Length,
}

impl Frame {
    pub fn new(x: Length, y: Length, width: Length, height: Length) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same frame with a different vertical offset.
    pub fn at_y(mut self, y: Length) -> Self {
        self.y = y;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

// =============================================================================
// Text Blocks
// =============================================================================

/// What a text block is for on its slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextRole {
    /// Slide or deck title
    Heading,

    /// One bulleted content line
    Bullet,

    /// Free-flowing, non-bulleted text (fallback slides only)
    Body,
}

/// Visual attributes shared by every block of one role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    /// Font size in points
    pub font_size: f64,
    pub bold: bool,
    pub align: HAlign,
    pub valign: VAlign,
}

/// A positioned unit of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub role: TextRole,
    text: String,
    pub frame: Frame,
    pub style: TextStyle,
}

impl TextBlock {
    /// Create a block, trimming the text.
    ///
    /// Returns `None` when nothing but whitespace remains; such blocks are
    /// never emitted.
    pub fn new(role: TextRole, text: &str, frame: Frame, style: TextStyle) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            role,
            text: text.to_string(),
            frame,
            style,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

// =============================================================================
// Slides and Decks
// =============================================================================

/// Role of a whole slide within its deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideRole {
    /// The opening slide; exactly one per compiled deck, always first
    Title,

    /// One section of generated content
    Content,

    /// Stand-in content slide emitted when the input has no sections
    Fallback,
}

impl SlideRole {
    /// Whether this slide counts as a content slide.
    pub fn is_content(&self) -> bool {
        match self {
            SlideRole::Title => false,
            SlideRole::Content | SlideRole::Fallback => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    pub role: SlideRole,
    pub blocks: Vec<TextBlock>,
}

impl Slide {
    pub fn new(role: SlideRole) -> Self {
        Self {
            role,
            blocks: Vec::new(),
        }
    }

    /// Append a block if it survived trimming.
    pub fn push(&mut self, block: Option<TextBlock>) {
        if let Some(block) = block {
            self.blocks.push(block);
        }
    }

    /// The first heading block's text, if any.
    pub fn heading(&self) -> Option<&str> {
        self.blocks
            .iter()
            .find(|b| b.role == TextRole::Heading)
            .map(TextBlock::text)
    }

    /// Bullet blocks in emission order.
    pub fn bullets(&self) -> impl Iterator<Item = &TextBlock> {
        self.blocks.iter().filter(|b| b.role == TextRole::Bullet)
    }
}

/// An ordered sequence of slides; insertion order is presentation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deck {
    /// Document title recorded in package metadata
    pub title: String,
    slides: Vec<Slide>,
}

impl Deck {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slides: Vec::new(),
        }
    }

    pub fn push_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}
