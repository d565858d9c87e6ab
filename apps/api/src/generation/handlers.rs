//! Axum route handlers for the generation endpoints.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::content::rewrite_resume;
use crate::generation::latex::fill_template;
use crate::generation::render::{render_pdf, LATEST_PDF_NAME};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GeneratePdfRequest {
    #[serde(rename = "resumeText", default)]
    pub resume_text: String,
    #[serde(rename = "jobText", default)]
    pub job_text: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratePdfResponse {
    pub pdf_url: String,
}

/// POST /api/generate-pdf
///
/// Full generation pipeline: LLM rewrite -> template fill -> pdflatex ->
/// stable artifact URL.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    Json(request): Json<GeneratePdfRequest>,
) -> Result<Json<GeneratePdfResponse>, AppError> {
    let resume_text = request.resume_text.trim();
    if resume_text.is_empty() {
        return Err(AppError::Validation("resumeText is empty".to_string()));
    }
    let job_text = request.job_text.trim();
    if job_text.is_empty() {
        return Err(AppError::Validation("jobText is empty".to_string()));
    }

    let content = rewrite_resume(&state.llm, resume_text, job_text).await?;

    let template = tokio::fs::read_to_string(&state.config.template_path)
        .await
        .map_err(|e| {
            AppError::Generation(format!(
                "Template not found: {}: {e}",
                state.config.template_path.display()
            ))
        })?;
    let latex = fill_template(&template, &content);

    render_pdf(&latex, &state.config.output_dir).await?;

    let pdf_url = format!("{}/api/latest-pdf", state.config.public_base_url);
    info!("generation complete: {pdf_url}");
    Ok(Json(GeneratePdfResponse { pdf_url }))
}

/// GET /api/latest-pdf
///
/// Serves the most recently generated artifact. The URL is stable so
/// clients can hold it without tracking per-render names.
pub async fn handle_latest_pdf(State(state): State<AppState>) -> Result<Response, AppError> {
    let path = state.config.output_dir.join(LATEST_PDF_NAME);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::NotFound("No PDF generated yet".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "inline; filename=\"resume.pdf\"",
            ),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm_client::LlmClient;

    fn test_state() -> AppState {
        AppState {
            llm: LlmClient::new("test-key".to_string()),
            config: Config {
                llm_api_key: "test-key".to_string(),
                template_path: "templates/resume_template.tex".into(),
                output_dir: "outputs".into(),
                public_base_url: "http://127.0.0.1:8080".to_string(),
                port: 8080,
                rust_log: "info".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_empty_resume_text_is_rejected() {
        let request = GeneratePdfRequest {
            resume_text: "   ".to_string(),
            job_text: "Rust engineer".to_string(),
        };
        let result = handle_generate_pdf(State(test_state()), Json(request)).await;
        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "resumeText is empty"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_job_text_is_rejected() {
        let request = GeneratePdfRequest {
            resume_text: "Skills: Rust".to_string(),
            job_text: String::new(),
        };
        let result = handle_generate_pdf(State(test_state()), Json(request)).await;
        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "jobText is empty"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_request_fields_use_camel_case_on_the_wire() {
        let request: GeneratePdfRequest = serde_json::from_str(
            r#"{"resumeText": "resume", "jobText": "job"}"#,
        )
        .unwrap();
        assert_eq!(request.resume_text, "resume");
        assert_eq!(request.job_text, "job");
    }
}
