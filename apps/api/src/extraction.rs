//! Text-extraction endpoint: accepts an uploaded PDF and returns its text
//! layer along with the scanned-document flag.

use axum::extract::Multipart;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub is_scanned: bool,
}

impl ExtractResponse {
    /// A document whose text layer is blank is reported as scanned; the
    /// caller cannot proceed with it either way.
    fn from_text(text: String) -> Self {
        let is_scanned = text.trim().is_empty();
        Self { text, is_scanned }
    }
}

/// POST /api/extract
///
/// Multipart upload with the document under the `file` key. Only PDF
/// uploads are accepted; anything else is rejected before extraction runs.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?;
            upload = Some((filename, data));
        }
    }

    let (filename, data) = upload.ok_or_else(|| {
        AppError::Validation("No file provided. Use form-data key 'file'.".to_string())
    })?;

    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(
            "Only PDF files are allowed.".to_string(),
        ));
    }

    // pdf text extraction is CPU-bound; keep it off the async workers.
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?
        .map_err(|e| AppError::Extraction(e.to_string()))?;

    info!("extracted {} characters from {filename}", text.len());
    Ok(Json(ExtractResponse::from_text(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_layer_is_flagged_scanned() {
        let response = ExtractResponse::from_text("  \n\t ".to_string());
        assert!(response.is_scanned);
    }

    #[test]
    fn test_nonempty_text_is_not_scanned() {
        let response = ExtractResponse::from_text("Skills: Rust, Tokio".to_string());
        assert!(!response.is_scanned);
        assert_eq!(response.text, "Skills: Rust, Tokio");
    }
}
