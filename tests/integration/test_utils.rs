//! Test utilities for integration tests.
//!
//! Mock language-model generators and helpers for reading generated
//! presentations back.

use async_trait::async_trait;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use promptdeck::{
    DeckWriter, GenerationService, LlmError, MemoryHistoryStore, TextGenerator,
};

// =============================================================================
// Mock Generators
// =============================================================================

/// A generator that returns a canned reply and counts calls.
///
/// Clones share the counter, so a clone kept by the test observes calls made
/// through the service.
#[derive(Clone)]
pub struct MockGenerator {
    reply: String,
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// A generator that always fails with the given error.
pub struct FailingGenerator {
    error: LlmError,
}

impl FailingGenerator {
    pub fn new(error: LlmError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(self.error.clone())
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// A service writing into `dir` with in-memory history.
pub fn test_service<G: TextGenerator>(
    generator: G,
    dir: &Path,
) -> GenerationService<G, MemoryHistoryStore> {
    GenerationService::new(generator, MemoryHistoryStore::new(), DeckWriter::new(dir))
}

/// Names of all parts in a `.pptx` file.
pub fn pptx_part_names(path: &Path) -> Vec<String> {
    let bytes = std::fs::read(path).unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

/// Content of one part of a `.pptx` file.
pub fn read_pptx_part(path: &Path, name: &str) -> String {
    let bytes = std::fs::read(path).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

/// Number of `ppt/slides/slideN.xml` parts.
pub fn slide_part_count(path: &Path) -> usize {
    pptx_part_names(path)
        .iter()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .count()
}
