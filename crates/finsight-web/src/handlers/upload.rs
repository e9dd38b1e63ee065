use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::MultipartRejection;
use axum::extract::{Multipart, State};

use finsight_core::{MAX_CONTEXT_CHARS, extract_document, is_pdf_filename, looks_like_pdf};

use crate::error::ApiError;
use crate::models::UploadResponse;
use crate::state::AppState;
use crate::upload;

pub const ONLY_PDF_MESSAGE: &str = "Only PDF files are allowed";

pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::Validation(e.body_text()))?;
    let file = upload::parse_multipart(multipart).await?;

    if !is_pdf_filename(&file.filename) {
        tracing::info!(filename = %file.filename, "rejected upload: not a .pdf filename");
        return Err(ApiError::Validation(ONLY_PDF_MESSAGE.to_string()));
    }
    if state.sniff_magic && !looks_like_pdf(&file.data) {
        tracing::info!(filename = %file.filename, "rejected upload: missing PDF signature");
        return Err(ApiError::Validation(ONLY_PDF_MESSAGE.to_string()));
    }

    let filename = file.filename;
    let size = file.data.len();
    let backend = Arc::clone(&state.pdf_backend);

    // MuPDF parsing is CPU-bound; keep it off the async workers.
    let extracted =
        tokio::task::spawn_blocking(move || extract_document(backend.as_ref(), &file.data))
            .await
            .map_err(|e| ApiError::Extraction(format!("Extraction task failed: {}", e)))?
            .map_err(|e| {
                tracing::warn!(%filename, error = %e, "PDF extraction failed");
                ApiError::Extraction(e.to_string())
            })?;

    tracing::info!(
        %filename,
        bytes = size,
        content_length = extracted.content_length,
        "extracted upload"
    );

    Ok(Json(UploadResponse {
        success: true,
        text: extracted.truncated(MAX_CONTEXT_CHARS).to_string(),
        content_length: extracted.content_length,
    }))
}
