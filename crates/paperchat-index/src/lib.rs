//! paperchat-index
//!
//! The retrieval pipeline: PDF text extraction, paragraph-boundary
//! chunking, local sentence-transformer embeddings, and an in-memory
//! vector index with brute-force cosine search. Index contents live for
//! the process lifetime only; durable state is the PDFs in S3.

pub mod chunk;
pub mod embed;
pub mod error;
pub mod extract;
pub mod index;

pub use embed::Embedder;
pub use index::VectorIndex;
