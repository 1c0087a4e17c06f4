//! End-to-end chunking behaviour through the public API.

use vectorizer_chunk::{
    chunk, detect_indicators, is_likely_markdown, parse_markdown_structure, CharEstimator,
    DocumentChunker, ElementKind, TokenEstimator,
};
use vectorizer_core::{ChunkConfig, ChunkOverrides, ChunkStrategy};

const ALL_STRATEGIES: [ChunkStrategy; 6] = [
    ChunkStrategy::Token,
    ChunkStrategy::Semantic,
    ChunkStrategy::Markdown,
    ChunkStrategy::Sentence,
    ChunkStrategy::Recursive,
    ChunkStrategy::Hybrid,
];

/// `"w0000 w0001 ..."`: every word unique, so chunks can be located.
fn numbered_words(n: usize) -> String {
    (0..n)
        .map(|i| format!("w{:04}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

fn sample_markdown() -> String {
    let mut doc = String::from("# Guide\n\nThis guide covers installation and use.\n\n");
    doc.push_str("## Install\n\n");
    for i in 0..40 {
        doc.push_str(&format!("Step {} downloads and unpacks part {}. ", i, i));
    }
    doc.push_str("\n\n```sh\n./configure\nmake\n```\n\n");
    doc.push_str("## Usage\n\n- run it\n- read the output\n\n---\n\n# Appendix\n\nShort note.");
    doc
}

#[test]
fn test_hybrid_title_and_short_paragraph() {
    let config = ChunkConfig::new(ChunkStrategy::Hybrid, 400, 50);
    let out = chunk("# Title\n\nShort para.", &config).unwrap();
    assert_eq!(out, vec!["[Context: # Title]\n\nShort para.".to_string()]);
}

#[test]
fn test_empty_input_yields_no_chunks() {
    for strategy in ALL_STRATEGIES {
        let config = ChunkConfig::new(strategy, 400, 50);
        assert!(chunk("", &config).unwrap().is_empty());
    }
}

#[test]
fn test_small_input_is_one_unchanged_chunk() {
    let text = "A short note that fits comfortably.";
    let config = ChunkConfig::new(ChunkStrategy::Token, 400, 50);
    assert_eq!(chunk(text, &config).unwrap(), vec![text.to_string()]);
}

#[test]
fn test_token_chunks_stay_near_budget() {
    let est = CharEstimator::default();
    let text = numbered_words(1000);
    let config = ChunkConfig::new(ChunkStrategy::Token, 100, 20);
    let out = chunk(&text, &config).unwrap();

    assert!(out.len() > 1);
    for piece in &out {
        assert!(!piece.is_empty());
        assert!(est.count_tokens(piece) <= 100 + 13);
    }
}

#[test]
fn test_token_chunks_cover_source_in_order() {
    let text = numbered_words(500);
    let config = ChunkConfig::new(ChunkStrategy::Token, 60, 10);
    let out = chunk(&text, &config).unwrap();

    assert!(text.starts_with(out[0].as_str()));
    assert!(text.ends_with(out[out.len() - 1].as_str()));

    let mut prev_start = 0;
    let mut prev_end = 0;
    for (i, piece) in out.iter().enumerate() {
        let start = text.find(piece.as_str()).unwrap();
        if i > 0 {
            assert!(start > prev_start, "chunk {} does not advance", i);
            assert!(start <= prev_end + 1, "gap before chunk {}", i);
        }
        prev_start = start;
        prev_end = start + piece.len();
    }
}

#[test]
fn test_overlap_repeats_previous_tail() {
    let text = numbered_words(400);
    let config = ChunkConfig::new(ChunkStrategy::Token, 50, 10);
    let out = chunk(&text, &config).unwrap();

    for pair in out.windows(2) {
        let first_word = pair[1].split(' ').next().unwrap();
        assert!(pair[0].contains(first_word));
        assert!(!pair[1].starts_with(pair[0].split(' ').next().unwrap()));
    }

    let without = chunk(&text, &ChunkConfig::new(ChunkStrategy::Token, 50, 0)).unwrap();
    assert!(without.len() < out.len());
    for pair in without.windows(2) {
        let first_word = pair[1].split(' ').next().unwrap();
        assert!(!pair[0].contains(first_word));
    }
}

#[test]
fn test_overlap_not_below_chunk_size_is_ignored() {
    let text = numbered_words(300);
    let plain = chunk(&text, &ChunkConfig::new(ChunkStrategy::Token, 50, 0)).unwrap();
    let oversized = chunk(&text, &ChunkConfig::new(ChunkStrategy::Token, 50, 500)).unwrap();
    assert_eq!(plain, oversized);
}

#[test]
fn test_every_strategy_terminates_on_awkward_input() {
    let inputs = [
        "x".repeat(5000),
        "\u{e9}".repeat(3000),
        "\n".repeat(2000),
        " ".repeat(2000),
        "a.".repeat(2000),
        "# h\n".repeat(500),
        "| a | b |\n".repeat(400),
        "```\n".repeat(3) + &"y".repeat(4000),
        sample_markdown(),
    ];

    for strategy in ALL_STRATEGIES {
        for size in [50, 400, 2000] {
            let config = ChunkConfig::new(strategy, size, 50);
            for input in &inputs {
                let out = chunk(input, &config).unwrap();
                assert!(!out.is_empty());
            }
        }
    }
}

#[test]
fn test_markdown_detection() {
    assert!(is_likely_markdown("# Heading\n\nBody text"));
    assert!(!is_likely_markdown("plain sentence with no markup"));
    assert!(!is_likely_markdown("- item"));

    let found = detect_indicators(&sample_markdown());
    assert!(found.heading && found.code_fence && found.list);
    assert!(!found.table);
}

#[test]
fn test_heading_breadcrumbs() {
    let elements = parse_markdown_structure(
        "# A\n\n## B\n\nX\n\n# C\n\nY",
        &CharEstimator::default(),
    );
    let x = elements.iter().find(|e| e.content == "X").unwrap();
    assert_eq!(x.heading_context.as_deref(), Some("# A > ## B"));
    let y = elements.iter().find(|e| e.content == "Y").unwrap();
    assert_eq!(y.heading_context.as_deref(), Some("# C"));
}

#[test]
fn test_hybrid_document_keeps_context_on_every_chunk() {
    let config = ChunkConfig::new(ChunkStrategy::Hybrid, 100, 0);
    let out = chunk(&sample_markdown(), &config).unwrap();

    assert!(out.len() >= 4);
    assert!(out.iter().all(|c| c.starts_with("[Context: # ")));
    assert!(out
        .iter()
        .any(|c| c.starts_with("[Context: # Guide > ## Install]\n\nStep 0 ")));
    assert_eq!(
        out.last().map(String::as_str),
        Some("[Context: # Appendix]\n\nShort note.")
    );
    assert!(out.iter().all(|c| !c.contains("\n---")));
}

#[test]
fn test_structural_keeps_elements_apart() {
    let doc = sample_markdown();
    let hybrid = chunk(&doc, &ChunkConfig::new(ChunkStrategy::Hybrid, 400, 0)).unwrap();
    let structural = chunk(&doc, &ChunkConfig::new(ChunkStrategy::Markdown, 400, 0)).unwrap();
    assert!(structural.len() > hybrid.len());
    let usage = "[Context: # Guide > ## Usage]\n\n- run it\n- read the output";
    assert!(structural.iter().any(|c| c == usage));
}

#[test]
fn test_plain_text_hybrid_matches_token() {
    let text = numbered_words(300);
    let token = chunk(&text, &ChunkConfig::new(ChunkStrategy::Token, 50, 10)).unwrap();
    let hybrid = chunk(&text, &ChunkConfig::new(ChunkStrategy::Hybrid, 50, 10)).unwrap();
    assert_eq!(token, hybrid);
}

#[test]
fn test_elements_serialize() {
    let elements = parse_markdown_structure("# T\n\n- a\n- b", &CharEstimator::default());
    assert_eq!(elements[1].kind, ElementKind::ListItem);

    let json = serde_json::to_value(&elements).unwrap();
    assert_eq!(json[0]["kind"], "heading");
    assert_eq!(json[0]["heading_level"], 1);
    assert_eq!(json[1]["kind"], "list_item");
    assert_eq!(json[1]["heading_context"], "# T");
}

#[test]
fn test_document_chunker_with_overrides() {
    let chunker = DocumentChunker::default();
    let overrides = ChunkOverrides {
        strategy: Some("hybrid".into()),
        chunk_size: Some(400),
        overlap: Some(0),
    };
    let out = chunker
        .chunk_document("# T\n\nna\u{ef}ve reader", &overrides)
        .unwrap();
    assert_eq!(out, vec!["[Context: # T]\n\nna ve reader".to_string()]);
}
