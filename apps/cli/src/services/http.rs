//! HTTP clients for the extraction and generation services.
//!
//! Both speak the backend's wire contract: success bodies are validated
//! against their required fields before being trusted, and error bodies are
//! the flat `{"error": "..."}` shape. A success response missing a required
//! field is a contract violation, never a silently-defaulted value.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart;
use serde::{Deserialize, Serialize};

use super::{
    ExtractedDocument, ExtractionService, GeneratedArtifact, GenerationService, ServiceError,
};

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Reads the error payload of a non-success response, falling back to the
/// raw body when it is not the expected shape.
async fn api_error(response: reqwest::Response) -> ServiceError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    ServiceError::Api { status, message }
}

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to build HTTP client")
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction client
// ────────────────────────────────────────────────────────────────────────────

/// Client for the text-extraction endpoint (`POST {base}/api/extract`,
/// multipart `file` field).
#[derive(Clone)]
pub struct HttpExtractionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpExtractionClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ExtractionService for HttpExtractionClient {
    async fn extract(&self, document: Bytes) -> Result<ExtractedDocument, ServiceError> {
        let part = multipart::Part::bytes(document.to_vec())
            .file_name("resume.pdf")
            .mime_str("application/pdf")?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/api/extract", self.base_url))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ServiceError::Contract(format!("extraction response did not match contract: {e}"))
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequestBody<'a> {
    #[serde(rename = "resumeText")]
    resume_text: &'a str,
    #[serde(rename = "jobText")]
    job_text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponseBody {
    #[serde(default)]
    pdf_url: Option<String>,
}

/// Client for the resume-generation endpoint (`POST {base}/api/generate-pdf`).
#[derive(Clone)]
pub struct HttpGenerationClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGenerationClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl GenerationService for HttpGenerationClient {
    async fn generate(
        &self,
        resume_text: &str,
        job_text: &str,
    ) -> Result<GeneratedArtifact, ServiceError> {
        let response = self
            .client
            .post(format!("{}/api/generate-pdf", self.base_url))
            .json(&GenerateRequestBody {
                resume_text,
                job_text,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.text().await?;
        let parsed: GenerateResponseBody = serde_json::from_str(&body).map_err(|e| {
            ServiceError::Contract(format!("generation response did not match contract: {e}"))
        })?;

        match parsed.pdf_url {
            Some(url) if !url.trim().is_empty() => Ok(GeneratedArtifact { pdf_url: url }),
            _ => Err(ServiceError::Contract(
                "generation reported success but pdf_url is missing".to_string(),
            )),
        }
    }
}
