use crate::history::next_id;
use crate::pptx::DEFAULT_FILE_NAME;

/// How the pipeline names the presentation written for each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNaming {
    /// Every request writes the same file; the last write wins.
    Fixed(String),

    /// Every request writes `<stem>-<request-id>.pptx`.
    Unique { stem: String },
}

impl FileNaming {
    /// Unique naming derived from a configured file name, e.g.
    /// `presentation.pptx` → `presentation-<id>.pptx`.
    pub fn unique_from(file_name: &str) -> Self {
        let stem = file_name
            .strip_suffix(".pptx")
            .unwrap_or(file_name)
            .trim();
        let stem = if stem.is_empty() { "presentation" } else { stem };
        FileNaming::Unique {
            stem: stem.to_string(),
        }
    }

    /// File name for the next request.
    pub fn next_file_name(&self) -> String {
        match self {
            FileNaming::Fixed(name) => name.clone(),
            FileNaming::Unique { stem } => format!("{}-{}.pptx", stem, next_id()),
        }
    }
}

impl Default for FileNaming {
    fn default() -> Self {
        FileNaming::Fixed(DEFAULT_FILE_NAME.to_string())
    }
}
