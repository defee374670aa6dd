//! Text-to-deck compiler.
//!
//! Turns a [`GenerationResult`] into a [`Deck`]:
//!
//! ```text
//! GenerationResult                      Deck
//! ┌──────────────────────┐             ┌──────────────────────────────┐
//! │ title                │ ──────────▶ │ slide 0  Title    (heading)  │
//! │ sections[0]          │ ──────────▶ │ slide 1  Content  (heading,  │
//! │   heading, lines...  │             │                    bullets)  │
//! │ sections[1] ...      │ ──────────▶ │ slide 2  Content  ...        │
//! └──────────────────────┘             └──────────────────────────────┘
//! ```
//!
//! With no sections at all, a single fallback slide carrying the raw text
//! (or the input rendered as JSON) follows the title slide.

use super::layout::LayoutDefaults;
use super::model::{Deck, Slide, SlideRole, TextBlock, TextRole};
use super::result::{GenerationResult, Section};

/// Compiles generation results into decks using a fixed set of layout defaults.
#[derive(Debug, Clone, Default)]
pub struct DeckCompiler {
    layout: LayoutDefaults,
}

impl DeckCompiler {
    pub fn new(layout: LayoutDefaults) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &LayoutDefaults {
        &self.layout
    }

    /// Compile a result into a deck.
    ///
    /// Pure: equal inputs always produce equal decks. The returned deck
    /// always starts with the title slide, so it is never empty.
    pub fn compile(&self, result: &GenerationResult) -> Deck {
        let title = non_blank(result.title.as_deref()).unwrap_or(self.layout.deck_title.as_str());

        let mut deck = Deck::new(title.trim());
        deck.push_slide(self.title_slide(title));

        if result.sections.is_empty() {
            deck.push_slide(self.fallback_slide(result));
            return deck;
        }

        for section in &result.sections {
            for slide in self.section_slides(section) {
                deck.push_slide(slide);
            }
        }

        deck
    }

    fn title_slide(&self, title: &str) -> Slide {
        let mut slide = Slide::new(SlideRole::Title);
        slide.push(TextBlock::new(
            TextRole::Heading,
            title,
            self.layout.title.frame,
            self.layout.title.style,
        ));
        slide
    }

    /// One slide per section, or several when pagination is enabled.
    fn section_slides(&self, section: &Section) -> Vec<Slide> {
        let heading =
            non_blank(section.heading.as_deref()).unwrap_or(self.layout.section_heading.as_str());

        let lines: Vec<&str> = section
            .lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        let chunks: Vec<&[&str]> = match self.layout.max_lines_per_slide {
            Some(max) if lines.len() > max => lines.chunks(max).collect(),
            _ => vec![lines.as_slice()],
        };

        chunks
            .into_iter()
            .enumerate()
            .map(|(page, chunk)| {
                if page == 0 {
                    self.content_slide(heading, chunk)
                } else {
                    let continued = format!("{}{}", heading.trim(), self.layout.continuation_suffix);
                    self.content_slide(&continued, chunk)
                }
            })
            .collect()
    }

    fn content_slide(&self, heading: &str, lines: &[&str]) -> Slide {
        let mut slide = Slide::new(SlideRole::Content);
        slide.push(TextBlock::new(
            TextRole::Heading,
            heading,
            self.layout.heading.frame,
            self.layout.heading.style,
        ));

        // Indices count emitted lines only, so dropped blanks leave no gaps.
        for (index, line) in lines.iter().enumerate() {
            slide.push(TextBlock::new(
                TextRole::Bullet,
                line,
                self.layout.bullet.frame_at(index),
                self.layout.bullet.style,
            ));
        }

        slide
    }

    fn fallback_slide(&self, result: &GenerationResult) -> Slide {
        let body = match non_blank(result.raw_text.as_deref()) {
            Some(text) => text.to_string(),
            // String keys and plain values only, so serialization cannot fail.
            None => serde_json::to_string_pretty(result).unwrap_or_default(),
        };

        let mut slide = Slide::new(SlideRole::Fallback);
        slide.push(TextBlock::new(
            TextRole::Heading,
            &self.layout.fallback_heading,
            self.layout.heading.frame,
            self.layout.heading.style,
        ));
        slide.push(TextBlock::new(
            TextRole::Body,
            &body,
            self.layout.body.frame,
            self.layout.body.style,
        ));
        slide
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

// =============================================================================
// Tests
// =============================================================================
