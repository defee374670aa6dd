//! Tests for the structure of written `.pptx` packages.
//!
//! Tests verify:
//! - One slide part per compiled slide
//! - Fallback slide for results without sections
//! - Escaping of XML special characters
//! - Empty decks rejected before touching the filesystem

use promptdeck::deck::{Deck, DeckCompiler, GenerationResult, LayoutDefaults, Section};
use promptdeck::pptx::{serialize, DEFAULT_FILE_NAME};
use promptdeck::{parse_input, DeckError, DEFAULT_RESPONSE_HEADING};

use super::test_utils::{pptx_part_names, read_pptx_part, slide_part_count};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_one_part_per_slide() {
    let dir = tempfile::tempdir().unwrap();
    let result = GenerationResult {
        title: Some("Quarterly Review".to_string()),
        sections: vec![
            Section::new("Revenue", lines(&["Up 10%", "New markets"])),
            Section::new("Costs", lines(&["Flat"])),
            Section::new("Outlook", vec![]),
        ],
        ..Default::default()
    };

    let deck = DeckCompiler::default().compile(&result);
    assert_eq!(deck.slide_count(), 4);

    let path = serialize(deck, dir.path(), None).await.unwrap();
    assert!(path.ends_with(DEFAULT_FILE_NAME));
    assert_eq!(slide_part_count(&path), 4);

    let names = pptx_part_names(&path);
    assert!(names.contains(&"[Content_Types].xml".to_string()));
    assert!(names.contains(&"ppt/presentation.xml".to_string()));

    let content_types = read_pptx_part(&path, "[Content_Types].xml");
    assert_eq!(content_types.matches("presentationml.slide+xml").count(), 4);

    let core = read_pptx_part(&path, "docProps/core.xml");
    assert!(core.contains("<dc:title>Quarterly Review</dc:title>"));

    // A section without lines renders its heading only
    let outlook = read_pptx_part(&path, "ppt/slides/slide4.xml");
    assert!(outlook.contains("<a:t>Outlook</a:t>"));
    assert!(!outlook.contains("<a:buChar"));
}

#[tokio::test]
async fn test_fallback_slide_package() {
    let dir = tempfile::tempdir().unwrap();
    let result = GenerationResult::default().with_title("X");

    let deck = DeckCompiler::default().compile(&result);
    let path = serialize(deck, dir.path(), Some("fallback.pptx"))
        .await
        .unwrap();

    assert_eq!(slide_part_count(&path), 2);
    let slide = read_pptx_part(&path, "ppt/slides/slide2.xml");
    assert!(slide.contains(r#"name="Response Slide""#));
    assert!(slide.contains("<a:t>AI Response</a:t>"));
    assert!(slide.contains(r#"sz="1200""#));
}

#[tokio::test]
async fn test_special_characters_escaped() {
    let dir = tempfile::tempdir().unwrap();
    let result = GenerationResult::from_response_text(
        "Use <T> & \"quotes\"\nIt's fine",
        DEFAULT_RESPONSE_HEADING,
    )
    .with_title("R&D");

    let deck = DeckCompiler::default().compile(&result);
    let path = serialize(deck, dir.path(), None).await.unwrap();

    let slide = read_pptx_part(&path, "ppt/slides/slide2.xml");
    assert!(slide.contains("<a:t>Use &lt;T&gt; &amp; &quot;quotes&quot;</a:t>"));
    assert!(slide.contains("<a:t>It&apos;s fine</a:t>"));

    let title = read_pptx_part(&path, "ppt/slides/slide1.xml");
    assert!(title.contains("<a:t>R&amp;D</a:t>"));
}

#[tokio::test]
async fn test_pagination_adds_continuation_slides() {
    let dir = tempfile::tempdir().unwrap();
    let many: Vec<String> = (1..=7).map(|i| format!("Point {}", i)).collect();
    let result = GenerationResult {
        sections: vec![Section::new("Long", many)],
        ..Default::default()
    };

    let compiler = DeckCompiler::new(LayoutDefaults::default().with_max_lines_per_slide(Some(3)));
    let path = serialize(compiler.compile(&result), dir.path(), None)
        .await
        .unwrap();

    assert_eq!(slide_part_count(&path), 4);
    let last = read_pptx_part(&path, "ppt/slides/slide4.xml");
    assert!(last.contains("<a:t>Long (cont.)</a:t>"));
    assert!(last.contains("<a:t>Point 7</a:t>"));
}

#[tokio::test]
async fn test_rendered_from_json_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = r#"{
        "title": "From JSON",
        "slides": [
            { "title": "One", "content": ["a", "", "b"] }
        ]
    }"#;

    let result = parse_input(input, DEFAULT_RESPONSE_HEADING).unwrap();
    let path = serialize(DeckCompiler::default().compile(&result), dir.path(), None)
        .await
        .unwrap();

    let slide = read_pptx_part(&path, "ppt/slides/slide2.xml");
    assert_eq!(slide.matches("<a:buChar").count(), 2);
}

#[tokio::test]
async fn test_empty_deck_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out");

    let err = serialize(Deck::new("nothing"), &target, None)
        .await
        .unwrap_err();

    assert!(matches!(err, DeckError::EmptyDeck));
    assert_eq!(err.kind(), promptdeck::ErrorKind::InvalidInput);
    assert!(!target.exists());
}

#[tokio::test]
async fn test_control_characters_stripped_from_package() {
    let dir = tempfile::tempdir().unwrap();
    let result = GenerationResult::from_response_text(
        "Step one\u{1b}[1m bold\nform\u{0c}feed",
        DEFAULT_RESPONSE_HEADING,
    )
    .with_title("Bell\u{7} title");

    let deck = DeckCompiler::default().compile(&result);
    let path = serialize(deck, dir.path(), None).await.unwrap();

    for name in pptx_part_names(&path).iter().filter(|n| n.ends_with(".xml")) {
        let part = read_pptx_part(&path, name);
        assert!(
            !part
                .chars()
                .any(|c| c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')),
            "control character in {}",
            name
        );
    }

    let core = read_pptx_part(&path, "docProps/core.xml");
    assert!(core.contains("<dc:title>Bell title</dc:title>"));
}
