//! Writing rendered decks to disk.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use super::package::render_deck;
use crate::deck::Deck;
use crate::error::DeckError;

/// File name used when the caller does not supply one.
pub const DEFAULT_FILE_NAME: &str = "presentation.pptx";

/// Render `deck` and write it to `target_dir/file_name`.
///
/// The directory is created if missing and an existing file with the same
/// name is overwritten. Returns the absolute path of the written file.
///
/// An empty deck is rejected before anything touches the filesystem.
pub async fn serialize(
    deck: Deck,
    target_dir: &Path,
    file_name: Option<&str>,
) -> Result<PathBuf, DeckError> {
    if deck.is_empty() {
        return Err(DeckError::EmptyDeck);
    }

    let file_name = file_name.unwrap_or(DEFAULT_FILE_NAME);
    validate_file_name(file_name)?;

    let bytes = render_deck(&deck)?;
    debug!(
        slides = deck.slide_count(),
        size = bytes.len(),
        "Rendered presentation package"
    );

    tokio::fs::create_dir_all(target_dir)
        .await
        .map_err(|e| io_error(target_dir, e))?;

    let path = target_dir.join(file_name);
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| io_error(&path, e))?;

    let path = tokio::fs::canonicalize(&path)
        .await
        .map_err(|e| io_error(&path, e))?;

    info!(
        path = %path.display(),
        slides = deck.slide_count(),
        "Presentation written"
    );

    Ok(path)
}

/// Reject anything that is not a single plain file name.
pub fn validate_file_name(name: &str) -> Result<(), DeckError> {
    let invalid = |reason: &str| DeckError::InvalidFileName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("file name is empty"));
    }
    if name.contains('\0') {
        return Err(invalid("file name contains a NUL byte"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("file name must not contain path separators"));
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid("file name must not be a relative or parent reference")),
    }
}

fn io_error(path: &Path, err: std::io::Error) -> DeckError {
    DeckError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Writes decks into a fixed output directory.
#[derive(Debug, Clone)]
pub struct DeckWriter {
    output_dir: PathBuf,
    default_file_name: String,
}

impl DeckWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            default_file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    pub fn with_default_file_name(mut self, name: impl Into<String>) -> Self {
        self.default_file_name = name.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn default_file_name(&self) -> &str {
        &self.default_file_name
    }

    /// Write a deck under the output directory, using the default name when
    /// `file_name` is `None`.
    pub async fn write(&self, deck: Deck, file_name: Option<&str>) -> Result<PathBuf, DeckError> {
        let name = file_name.unwrap_or(&self.default_file_name);
        serialize(deck, &self.output_dir, Some(name)).await
    }
}
