//! Paragraph-boundary text chunker.
//!
//! Splits extracted document text into fragments no longer than
//! `max_chars`, breaking on paragraph boundaries (`\n\n`) so each fragment
//! stays semantically coherent. Paragraphs longer than the limit are hard
//! split at the nearest word boundary.

/// Default fragment size, in characters.
pub const DEFAULT_MAX_CHARS: usize = 1000;

/// Split text into chunks no longer than `max_chars`.
///
/// Whitespace-only input produces no chunks.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut buf = String::new();

    for para in text.split("\n\n") {
        let trimmed = para.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Flush the buffer if appending this paragraph would overflow it.
        let appended_len = if buf.is_empty() {
            trimmed.len()
        } else {
            buf.len() + 2 + trimmed.len()
        };
        if appended_len > max_chars && !buf.is_empty() {
            chunks.push(std::mem::take(&mut buf));
        }

        if trimmed.len() > max_chars {
            split_long_paragraph(trimmed, max_chars, &mut chunks);
        } else {
            if !buf.is_empty() {
                buf.push_str("\n\n");
            }
            buf.push_str(trimmed);
        }
    }

    if !buf.is_empty() {
        chunks.push(buf);
    }

    chunks
}

/// Hard-split an oversized paragraph, preferring newline then space
/// boundaries within the window.
fn split_long_paragraph(para: &str, max_chars: usize, chunks: &mut Vec<String>) {
    let mut remaining = para;
    while !remaining.is_empty() {
        if remaining.len() <= max_chars {
            chunks.push(remaining.trim().to_string());
            break;
        }

        let window = floor_char_boundary(remaining, max_chars);
        let mut split_at = remaining[..window]
            .rfind('\n')
            .or_else(|| remaining[..window].rfind(' '))
            .map(|pos| pos + 1)
            .unwrap_or(window);

        // A zero-width window (max_chars below one multibyte char) must
        // still consume input.
        if split_at == 0 {
            split_at = remaining
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(remaining.len());
        }

        let piece = remaining[..split_at].trim();
        if !piece.is_empty() {
            chunks.push(piece.to_string());
        }
        remaining = &remaining[split_at..];
    }
}

/// The largest index `<= at` that lies on a UTF-8 character boundary.
fn floor_char_boundary(s: &str, at: usize) -> usize {
    let mut at = at.min(s.len());
    while !s.is_char_boundary(at) {
        at -= 1;
    }
    at
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_text_single_chunk() {
        let chunks = chunk_text("Hello, world!", 1000);
        assert_eq!(chunks, ["Hello, world!"]);
    }

    #[test]
    fn whitespace_only_has_no_chunks() {
        assert!(chunk_text("", 1000).is_empty());
        assert!(chunk_text("  \n\n  \n", 1000).is_empty());
    }

    #[test]
    fn paragraphs_under_limit_stay_together() {
        let text = "First paragraph.\n\nSecond paragraph.\n\nThird paragraph.";
        let chunks = chunk_text(text, 1000);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("First paragraph."));
        assert!(chunks[0].contains("Third paragraph."));
    }

    #[test]
    fn paragraphs_over_limit_split() {
        let text = "This is paragraph one.\n\nThis is paragraph two.\n\nThis is paragraph three.";
        let chunks = chunk_text(text, 25);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= 25, "chunk too long: {chunk:?}");
        }
    }

    #[test]
    fn oversized_paragraph_splits_on_word_boundary() {
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let chunks = chunk_text(text, 12);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.starts_with(' ') && !chunk.ends_with(' '));
            assert!(chunk.len() <= 12);
        }
        // No words lost.
        let rejoined = chunks.join(" ");
        for word in text.split(' ') {
            assert!(rejoined.contains(word), "missing word {word:?}");
        }
    }

    #[test]
    fn multibyte_text_splits_on_char_boundary() {
        let text = "ééééé ééééé ééééé ééééé";
        let chunks = chunk_text(text, 11);
        assert!(!chunks.is_empty());
    }

    #[test]
    fn deterministic() {
        let text = "Alpha\n\nBeta\n\nGamma\n\nDelta";
        assert_eq!(chunk_text(text, 12), chunk_text(text, 12));
    }
}
