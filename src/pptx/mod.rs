//! PowerPoint (`.pptx`) serialization.
//!
//! Decks are rendered into an Office Open XML package in memory and then
//! written to a content directory:
//!
//! ```text
//! Deck ──▶ render_deck ──▶ Bytes (zip) ──▶ serialize ──▶ <dir>/<name>.pptx
//! ```
//!
//! Geometry is converted from inches and percentages into EMU against a
//! 16:9 slide of 10in × 5.625in.

mod package;
mod writer;
mod xml;

pub use package::{render_deck, render_deck_at};
pub use writer::{serialize, validate_file_name, DeckWriter, DEFAULT_FILE_NAME};
pub use xml::{slide_xml, to_emu, EMU_PER_INCH, SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU};
