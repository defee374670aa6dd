//! Slide deck model and compiler.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           GenerationResult              │
//! │   (title + sections of text lines)      │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │             DeckCompiler                │
//! │  (placement, spacing, fallback policy)  │
//! │          uses LayoutDefaults            │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │     Deck → Slide → TextBlock            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use promptdeck::deck::{DeckCompiler, GenerationResult, SlideRole};
//!
//! let result = GenerationResult::from_response_text("First point\n\nSecond point", "AI Response");
//! let deck = DeckCompiler::default().compile(&result);
//!
//! assert_eq!(deck.slide_count(), 2);
//! assert_eq!(deck.slides()[0].role, SlideRole::Title);
//! assert_eq!(deck.slides()[1].bullets().count(), 2);
//! ```

mod compiler;
mod layout;
mod model;
mod result;

pub use compiler::DeckCompiler;
pub use layout::{
    BlockLayout, BulletLayout, LayoutDefaults, CONTINUATION_SUFFIX, DEFAULT_DECK_TITLE,
    DEFAULT_RESPONSE_HEADING, DEFAULT_SECTION_HEADING, SLIDE_HEIGHT_INCHES, SLIDE_WIDTH_INCHES,
};
pub use model::{
    Deck, Frame, HAlign, Length, Slide, SlideRole, TextBlock, TextRole, TextStyle, VAlign,
};
pub use result::{GenerationResult, Section};
