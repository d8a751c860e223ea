use topic_lens::core::{GroundingChunk, Reference, dedupe_references, references_from_grounding};

#[test]
fn first_occurrence_wins_and_order_is_preserved() {
    let deduped = dedupe_references(vec![
        Reference::new("a", "1"),
        Reference::new("a", "2"),
        Reference::new("b", "3"),
    ]);
    assert_eq!(
        deduped,
        vec![Reference::new("a", "1"), Reference::new("b", "3")]
    );
}

#[test]
fn empty_uris_are_dropped() {
    let deduped = dedupe_references(vec![
        Reference::new("", "no link"),
        Reference::new("https://b.example", "B"),
        Reference::new("", "also no link"),
        Reference::new("https://a.example", "A"),
        Reference::new("https://b.example", "B again"),
    ]);
    assert_eq!(
        deduped,
        vec![
            Reference::new("https://b.example", "B"),
            Reference::new("https://a.example", "A"),
        ]
    );
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(dedupe_references(Vec::new()).is_empty());
}

#[test]
fn grounding_chunks_default_missing_titles() {
    let chunks = vec![
        GroundingChunk::web("https://a.example", "A"),
        GroundingChunk {
            uri: Some("https://b.example".to_owned()),
            title: None,
        },
        GroundingChunk {
            uri: Some("https://c.example".to_owned()),
            title: Some(String::new()),
        },
        GroundingChunk {
            uri: None,
            title: Some("orphan".to_owned()),
        },
        GroundingChunk::web("https://a.example", "A duplicate"),
    ];

    assert_eq!(
        references_from_grounding(&chunks),
        vec![
            Reference::new("https://a.example", "A"),
            Reference::new("https://b.example", "Untitled"),
            Reference::new("https://c.example", "Untitled"),
        ]
    );
}
