use paperchat_bedrock::prompt::{
    build_context_block, source_set, system_prompt_with_context, SYSTEM_PROMPT,
};
use paperchat_core::models::retrieval::RetrievedChunk;

fn chunk(document: &str, text: &str) -> RetrievedChunk {
    RetrievedChunk {
        document: document.to_string(),
        text: text.to_string(),
        score: 0.5,
    }
}

#[test]
fn empty_retrieval_returns_empty_block() {
    assert_eq!(build_context_block(&[]), "");
    assert_eq!(system_prompt_with_context(&[]), SYSTEM_PROMPT);
}

#[test]
fn single_chunk_produces_valid_block() {
    let chunks = vec![chunk("report.pdf", "Revenue grew 12% in Q3.")];

    let block = build_context_block(&chunks);
    assert!(block.starts_with("<document_context>"));
    assert!(block.ends_with("</document_context>"));
    assert!(block.contains("<chunk source=\"report.pdf\">"));
    assert!(block.contains("Revenue grew 12% in Q3."));
}

#[test]
fn multiple_chunks_all_included() {
    let chunks = vec![
        chunk("intake.pdf", "Intake notes here.\n"),
        chunk("referral.pdf", "Referral letter content."),
    ];

    let block = build_context_block(&chunks);
    assert!(block.contains("<chunk source=\"intake.pdf\">"));
    assert!(block.contains("<chunk source=\"referral.pdf\">"));
    assert!(block.contains("Intake notes here."));
    assert!(block.contains("Referral letter content."));
}

#[test]
fn context_is_appended_to_instruction() {
    let chunks = vec![chunk("a.pdf", "text")];
    let prompt = system_prompt_with_context(&chunks);
    assert!(prompt.starts_with(SYSTEM_PROMPT));
    assert!(prompt.contains("<document_context>"));
}

#[test]
fn sources_are_deduplicated_in_order() {
    let chunks = vec![
        chunk("b.pdf", "one"),
        chunk("a.pdf", "two"),
        chunk("b.pdf", "three"),
    ];
    assert_eq!(source_set(&chunks), ["b.pdf", "a.pdf"]);
}

#[test]
fn no_chunks_no_sources() {
    assert!(source_set(&[]).is_empty());
}
