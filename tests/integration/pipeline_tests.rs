//! End-to-end tests of the generation pipeline.
//!
//! Tests verify:
//! - Prompt → text → deck → file → record round trip
//! - Validation before any upstream call
//! - Fixed and unique file naming
//! - Persistence through the JSON Lines history store

use promptdeck::{
    DeckWriter, FileNaming, GenerateError, GenerationService, HistoryStore, JsonlHistoryStore,
    LlmError, MemoryHistoryStore,
};

use super::test_utils::{read_pptx_part, slide_part_count, test_service, FailingGenerator, MockGenerator};

const RECURSION_REPLY: &str = "Recursion is...\n\nIt has a base case.";

#[tokio::test]
async fn test_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = dir.path().join("uploads");
    let generator = MockGenerator::new(RECURSION_REPLY);
    let service = GenerationService::new(
        generator.clone(),
        JsonlHistoryStore::new(dir.path().join("data").join("history.jsonl")),
        DeckWriter::new(&uploads),
    );

    let outcome = service.generate("explain recursion").await.unwrap();

    // Generator saw the raw prompt once
    assert_eq!(generator.call_count(), 1);
    assert_eq!(generator.prompts(), vec!["explain recursion".to_string()]);

    // File written at the expected path
    let expected = std::fs::canonicalize(&uploads)
        .unwrap()
        .join("presentation.pptx");
    assert_eq!(outcome.ppt_path, expected);
    assert!(expected.exists());

    // Title slide plus one content slide
    assert_eq!(slide_part_count(&outcome.ppt_path), 2);
    let title = read_pptx_part(&outcome.ppt_path, "ppt/slides/slide1.xml");
    assert!(title.contains("<a:t>AI Generated Presentation</a:t>"));

    let content = read_pptx_part(&outcome.ppt_path, "ppt/slides/slide2.xml");
    assert!(content.contains("<a:t>AI Response</a:t>"));
    assert!(content.contains("<a:t>Recursion is...</a:t>"));
    assert!(content.contains("<a:t>It has a base case.</a:t>"));
    assert_eq!(content.matches("<a:buChar").count(), 2);

    // Compiled structure
    let section = &outcome.slide_data.sections[0];
    assert_eq!(section.heading.as_deref(), Some("AI Response"));
    assert_eq!(section.lines, vec!["Recursion is...", "It has a base case."]);

    // Record appended with matching prompt and path
    let records = service.history(None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, outcome.record_id);
    assert_eq!(records[0].prompt, "explain recursion");
    assert_eq!(records[0].ppt_path, outcome.ppt_path);
    assert_eq!(records[0].response, RECURSION_REPLY);
    assert_eq!(records[0].slide_data, outcome.slide_data);
}

#[tokio::test]
async fn test_blank_prompt_never_calls_generator() {
    let dir = tempfile::tempdir().unwrap();
    let generator = MockGenerator::new("unused");
    let service = test_service(generator.clone(), dir.path());

    for prompt in ["", "   ", "\n\t"] {
        let err = service.generate(prompt).await.unwrap_err();
        assert!(matches!(err, GenerateError::InvalidInput { .. }));
    }

    assert_eq!(generator.call_count(), 0);
    assert!(service.history(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_error_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(
        FailingGenerator::new(LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        }),
        dir.path(),
    );

    let err = service.generate("hello").await.unwrap_err();
    match err {
        GenerateError::Upstream(LlmError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "overloaded");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(service.history_store().is_empty().await);
}

#[tokio::test]
async fn test_fixed_naming_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(MockGenerator::new("text"), dir.path())
        .with_naming(FileNaming::Fixed("deck.pptx".to_string()));

    let first = service.generate("a").await.unwrap();
    let second = service.generate("b").await.unwrap();

    assert_eq!(first.ppt_path, second.ppt_path);
    assert!(first.ppt_path.ends_with("deck.pptx"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    assert_eq!(service.history(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_unique_naming_keeps_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let service = test_service(MockGenerator::new("text"), dir.path())
        .with_naming(FileNaming::unique_from("presentation.pptx"));

    let mut paths = Vec::new();
    for prompt in ["a", "b", "c"] {
        paths.push(service.generate(prompt).await.unwrap().ppt_path);
    }

    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 3);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
}

#[tokio::test]
async fn test_history_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let history = dir.path().join("history.jsonl");

    let service = GenerationService::new(
        MockGenerator::new("text"),
        JsonlHistoryStore::new(&history),
        DeckWriter::new(dir.path()),
    );
    service.generate("persist me").await.unwrap();
    drop(service);

    let store = JsonlHistoryStore::new(&history);
    let records = store.list_recent(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].prompt, "persist me");
}

#[tokio::test]
async fn test_history_limit_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let service: GenerationService<MockGenerator, MemoryHistoryStore> =
        test_service(MockGenerator::new("text"), dir.path())
            .with_naming(FileNaming::unique_from("p.pptx"));

    for i in 0..3 {
        service.generate(&format!("prompt {}", i)).await.unwrap();
    }

    // Zero is raised to one
    assert_eq!(service.history(Some(0)).await.unwrap().len(), 1);
    assert_eq!(service.history(Some(500)).await.unwrap().len(), 3);
}
