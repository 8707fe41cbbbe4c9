//! Prompt assembly for retrieval-augmented answers.
//!
//! Retrieved chunks are framed as an XML-style context block appended to a
//! fixed instruction prompt; the question itself travels as the user
//! message.

use paperchat_core::models::retrieval::RetrievedChunk;

/// The instruction the model answers under. Retrieval context is appended
/// below it.
pub const SYSTEM_PROMPT: &str = "Use the provided document context to answer the user's \
question. If the context does not contain the answer, say so clearly instead of guessing.";

/// Build a structured context block from retrieved chunks.
///
/// Returns an XML-style block for the system prompt, or an empty string
/// when nothing was retrieved (no context to inject).
pub fn build_context_block(chunks: &[RetrievedChunk]) -> String {
    if chunks.is_empty() {
        return String::new();
    }

    let mut block = String::from("<document_context>\n");

    for chunk in chunks {
        block.push_str(&format!("<chunk source=\"{}\">\n", chunk.document));
        block.push_str(&chunk.text);
        if !chunk.text.ends_with('\n') {
            block.push('\n');
        }
        block.push_str("</chunk>\n");
    }

    block.push_str("</document_context>");
    block
}

/// The system prompt with the context block appended, when there is one.
pub fn system_prompt_with_context(chunks: &[RetrievedChunk]) -> String {
    let block = build_context_block(chunks);
    if block.is_empty() {
        SYSTEM_PROMPT.to_string()
    } else {
        format!("{SYSTEM_PROMPT}\n\n{block}")
    }
}

/// The deduplicated source filenames of the retrieved chunks, in
/// retrieval order.
pub fn source_set(chunks: &[RetrievedChunk]) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for chunk in chunks {
        if !sources.contains(&chunk.document) {
            sources.push(chunk.document.clone());
        }
    }
    sources
}
