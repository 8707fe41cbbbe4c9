//! PDF text extraction.

use crate::error::IndexError;

/// Extract plain text from PDF bytes.
///
/// Scanned or image-only PDFs extract to whitespace; those are rejected
/// as [`IndexError::EmptyDocument`] so the caller can report a useful
/// message instead of indexing nothing.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, IndexError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| IndexError::Extract(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(IndexError::EmptyDocument);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pdf_returns_error() {
        let err = extract_pdf_text(b"not a pdf").unwrap_err();
        assert!(matches!(err, IndexError::Extract(_)));
    }
}
