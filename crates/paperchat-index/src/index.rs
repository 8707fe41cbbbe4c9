//! In-memory vector index.
//!
//! A `RwLock`-guarded table of chunk vectors; search is brute-force cosine
//! similarity over all stored vectors. Adequate for the document counts a
//! single chat session handles, and rebuilt from S3 on demand.

use std::sync::RwLock;

use paperchat_core::models::retrieval::RetrievedChunk;

struct IndexedChunk {
    document: String,
    text: String,
    vector: Vec<f32>,
}

#[derive(Default)]
pub struct VectorIndex {
    chunks: RwLock<Vec<IndexedChunk>>,
}

impl VectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document's chunks and their vectors, replacing any
    /// previously indexed chunks of the same document.
    ///
    /// `chunks` and `vectors` correspond by position; a length mismatch is
    /// a caller bug and the shorter of the two wins.
    pub fn insert_document(&self, document: &str, chunks: Vec<String>, vectors: Vec<Vec<f32>>) {
        let mut table = self.chunks.write().unwrap();
        table.retain(|c| c.document != document);
        for (text, vector) in chunks.into_iter().zip(vectors) {
            table.push(IndexedChunk {
                document: document.to_string(),
                text,
                vector,
            });
        }
    }

    /// Drop a document's chunks. Returns how many were removed.
    pub fn remove_document(&self, document: &str) -> usize {
        let mut table = self.chunks.write().unwrap();
        let before = table.len();
        table.retain(|c| c.document != document);
        before - table.len()
    }

    pub fn contains_document(&self, document: &str) -> bool {
        self.chunks
            .read()
            .unwrap()
            .iter()
            .any(|c| c.document == document)
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.read().unwrap().is_empty()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.read().unwrap().len()
    }

    /// The `k` chunks most similar to `query`, best first.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<RetrievedChunk> {
        let table = self.chunks.read().unwrap();
        let mut results: Vec<RetrievedChunk> = table
            .iter()
            .map(|c| RetrievedChunk {
                document: c.document.clone(),
                text: c.text.clone(),
                score: cosine_similarity(query, &c.vector),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(k);
        results
    }
}

/// Cosine similarity in `[-1.0, 1.0]`; `0.0` for empty or mismatched
/// vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with_two_docs() -> VectorIndex {
        let index = VectorIndex::new();
        index.insert_document(
            "a.pdf",
            vec!["alpha".to_string(), "beta".to_string()],
            vec![vec![1.0, 0.0], vec![0.9, 0.1]],
        );
        index.insert_document(
            "b.pdf",
            vec!["gamma".to_string()],
            vec![vec![0.0, 1.0]],
        );
        index
    }

    #[test]
    fn search_ranks_by_similarity() {
        let index = index_with_two_docs();
        let results = index.search(&[1.0, 0.0], 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "alpha");
        assert_eq!(results[0].document, "a.pdf");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn search_truncates_to_k() {
        let index = index_with_two_docs();
        assert_eq!(index.search(&[1.0, 0.0], 1).len(), 1);
        // k larger than the table returns everything.
        assert_eq!(index.search(&[1.0, 0.0], 10).len(), 3);
    }

    #[test]
    fn reinsert_replaces_previous_chunks() {
        let index = index_with_two_docs();
        index.insert_document("a.pdf", vec!["fresh".to_string()], vec![vec![0.5, 0.5]]);
        assert_eq!(index.chunk_count(), 2);
        let texts: Vec<_> = index
            .search(&[1.0, 0.0], 10)
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert!(texts.contains(&"fresh".to_string()));
        assert!(!texts.contains(&"alpha".to_string()));
    }

    #[test]
    fn remove_document_evicts_chunks() {
        let index = index_with_two_docs();
        assert_eq!(index.remove_document("a.pdf"), 2);
        assert!(!index.contains_document("a.pdf"));
        assert!(index.contains_document("b.pdf"));
        assert_eq!(index.remove_document("a.pdf"), 0);
    }

    #[test]
    fn empty_index_searches_empty() {
        let index = VectorIndex::new();
        assert!(index.is_empty());
        assert!(index.search(&[1.0, 0.0], 4).is_empty());
    }

    #[test]
    fn cosine_identical_and_orthogonal() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }
}
