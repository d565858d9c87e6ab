//! External service boundaries consumed by the workflow orchestrator.
//!
//! Two collaborators sit behind trait seams so the pipeline can be driven
//! against test doubles: the text-extraction service and the resume
//! generation service. The HTTP implementations live in [`http`].

pub mod http;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;

/// Response contract of the extraction service.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractedDocument {
    pub text: String,
    #[serde(default)]
    pub is_scanned: bool,
}

/// Opaque reference to a produced document. The generation service owns the
/// bytes; the pipeline only ever holds this handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub pdf_url: String,
}

/// Failures at a service boundary. No automatic retry happens here: the
/// caller recovers by re-triggering the action.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("contract violation: {0}")]
    Contract(String),
}

#[async_trait]
pub trait ExtractionService: Send + Sync {
    /// Submits a binary document payload and returns the extracted text
    /// along with the scanned-document flag.
    async fn extract(&self, document: Bytes) -> Result<ExtractedDocument, ServiceError>;
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Requests a tailored resume document for the given text pair and
    /// returns the artifact reference.
    async fn generate(
        &self,
        resume_text: &str,
        job_text: &str,
    ) -> Result<GeneratedArtifact, ServiceError>;
}
