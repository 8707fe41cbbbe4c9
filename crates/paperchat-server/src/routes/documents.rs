use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use paperchat_core::models::document::StoredDocument;
use paperchat_core::s3_keys;
use paperchat_index::{chunk, extract};
use paperchat_storage::objects;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct IndexedUpload {
    pub filename: String,
    pub chunks: usize,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub documents: Vec<IndexedUpload>,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: String,
    pub evicted_chunks: usize,
}

#[derive(Serialize)]
pub struct SyncResponse {
    pub indexed: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

/// Upload one or more PDFs: store each in S3 under `pdfs/{filename}`,
/// then extract, chunk, embed, and add it to the in-memory index.
///
/// The S3 put comes first; a document is only indexed once its bytes are
/// durably stored.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut documents = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(raw_name) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        let filename = sanitize_filename(&raw_name)?;
        let bytes = field.bytes().await?;

        objects::put_object(
            &state.s3,
            &state.settings.bucket,
            &s3_keys::pdf(&filename),
            bytes.to_vec(),
            Some("application/pdf"),
        )
        .await?;

        let chunks = index_document(&state, &filename, &bytes).await?;
        info!(%filename, chunks, "uploaded and indexed document");

        documents.push(IndexedUpload { filename, chunks });
    }

    if documents.is_empty() {
        return Err(ApiError::BadRequest("no files in upload".to_string()));
    }

    Ok(Json(UploadResponse { documents }))
}

/// List the PDFs stored in the bucket.
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredDocument>>, ApiError> {
    let documents = objects::list_pdfs(&state.s3, &state.settings.bucket).await?;
    Ok(Json(documents))
}

/// Delete a stored PDF and evict its chunks from the index.
pub async fn delete_document(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let filename = sanitize_filename(&filename)?;

    objects::delete_object(&state.s3, &state.settings.bucket, &s3_keys::pdf(&filename)).await?;
    let evicted_chunks = state.index.remove_document(&filename);
    info!(%filename, evicted_chunks, "deleted document");

    Ok(Json(DeleteResponse {
        deleted: filename,
        evicted_chunks,
    }))
}

/// Pull stored PDFs that are missing from the in-memory index back in.
///
/// The index is process-lifetime only; this recovers it from the bucket
/// after a restart. Documents that fail extraction are reported and
/// skipped rather than failing the whole sync.
pub async fn sync_documents(
    State(state): State<AppState>,
) -> Result<Json<SyncResponse>, ApiError> {
    let stored = objects::list_pdfs(&state.s3, &state.settings.bucket).await?;

    let mut indexed = Vec::new();
    let mut skipped = Vec::new();
    let mut failed = Vec::new();

    for doc in stored {
        if state.index.contains_document(&doc.filename) {
            skipped.push(doc.filename);
            continue;
        }

        let result = async {
            let bytes = objects::get_object(&state.s3, &state.settings.bucket, &doc.key).await?;
            index_document(&state, &doc.filename, &bytes).await
        }
        .await;

        match result {
            Ok(chunks) => {
                info!(filename = %doc.filename, chunks, "indexed stored document");
                indexed.push(doc.filename);
            }
            Err(err) => {
                warn!(filename = %doc.filename, ?err, "failed to index stored document");
                failed.push(doc.filename);
            }
        }
    }

    Ok(Json(SyncResponse {
        indexed,
        skipped,
        failed,
    }))
}

/// Extract, chunk, embed, and index one document. Returns the chunk count.
async fn index_document(
    state: &AppState,
    filename: &str,
    bytes: &[u8],
) -> Result<usize, ApiError> {
    let text = extract::extract_pdf_text(bytes)?;
    let chunks = chunk::chunk_text(&text, state.settings.chunk_chars);
    let vectors = state.embedder.embed(chunks.clone()).await?;

    let count = chunks.len();
    state.index.insert_document(filename, chunks, vectors);
    Ok(count)
}

/// Reduce an uploaded name to a bare `*.pdf` filename.
///
/// Browsers may send path-qualified names; anything before the final path
/// separator is dropped. Names that are empty or not PDFs are rejected.
fn sanitize_filename(raw: &str) -> Result<String, ApiError> {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    if name.is_empty() || name == ".pdf" {
        return Err(ApiError::BadRequest(format!("invalid filename: {raw:?}")));
    }
    if !name.to_lowercase().ends_with(".pdf") {
        return Err(ApiError::BadRequest(format!(
            "only PDF uploads are supported, got: {name:?}"
        )));
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_pdf_names_pass() {
        assert_eq!(sanitize_filename("report.pdf").unwrap(), "report.pdf");
        assert_eq!(sanitize_filename("Q3 Notes.PDF").unwrap(), "Q3 Notes.PDF");
    }

    #[test]
    fn path_components_are_stripped() {
        assert_eq!(sanitize_filename("a/b/report.pdf").unwrap(), "report.pdf");
        assert_eq!(
            sanitize_filename("C:\\docs\\report.pdf").unwrap(),
            "report.pdf"
        );
    }

    #[test]
    fn non_pdfs_are_rejected() {
        assert!(sanitize_filename("report.docx").is_err());
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename(".pdf").is_err());
        assert!(sanitize_filename("docs/").is_err());
    }
}
