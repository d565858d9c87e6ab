//! Workflow orchestrator: drives extract -> match -> gate -> generate ->
//! deliver for one session, owning all transient state.
//!
//! Each external call is a single suspension point with one resolution path.
//! The state lock is never held across an await: an operation snapshots what
//! it needs, awaits the service, then re-locks and applies the outcome only
//! if its attempt is still current. Selecting a new document supersedes any
//! attempt in flight; late results belonging to a superseded attempt are
//! discarded rather than applied.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::errors::WorkflowError;
use crate::gate::{self, GateDecision};
use crate::matcher::{match_keywords, MatchResult};
use crate::services::{ExtractionService, GenerationService};

/// Pipeline stage. `Extracted` covers both the usable and unusable outcome;
/// the scanned flag and last error tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Extracting,
    Extracted,
    Matching,
    Matched,
    GateBlocked,
    Generating,
    Done,
    Failed,
}

/// Which job-text source is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobInputMode {
    Title,
    Description,
}

/// Snapshot of the pipeline: current stage plus the most recently produced
/// artifacts. One instance per session, reset whenever a new upload begins.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    pub stage: Stage,
    pub document_selected: bool,
    pub resume_text: String,
    pub is_scanned: bool,
    pub job_mode: JobInputMode,
    pub job_title: String,
    pub job_description: String,
    pub match_result: Option<MatchResult>,
    pub artifact_url: Option<String>,
    pub last_error: Option<WorkflowError>,
    pub extracting: bool,
    pub matching: bool,
    pub generating: bool,
    /// Bumped on every document selection; stale results check against it.
    pub attempt: u64,
}

impl WorkflowState {
    fn new() -> Self {
        Self {
            stage: Stage::Idle,
            document_selected: false,
            resume_text: String::new(),
            is_scanned: false,
            job_mode: JobInputMode::Title,
            job_title: String::new(),
            job_description: String::new(),
            match_result: None,
            artifact_url: None,
            last_error: None,
            extracting: false,
            matching: false,
            generating: false,
            attempt: 0,
        }
    }

    /// Invalidates everything derived from a previous document. Job inputs
    /// survive; they belong to the session, not the upload.
    fn reset_for_new_document(&mut self) {
        self.stage = Stage::Idle;
        self.document_selected = false;
        self.resume_text.clear();
        self.is_scanned = false;
        self.match_result = None;
        self.artifact_url = None;
        self.last_error = None;
        self.extracting = false;
        self.matching = false;
        self.generating = false;
    }

    /// The active job text, trimmed.
    pub fn job_text(&self) -> String {
        let text = match self.job_mode {
            JobInputMode::Title => &self.job_title,
            JobInputMode::Description => &self.job_description,
        };
        text.trim().to_string()
    }

    fn any_in_flight(&self) -> bool {
        self.extracting || self.matching || self.generating
    }

    /// Whether the generation action is currently available.
    pub fn can_generate(&self) -> bool {
        self.document_selected
            && !self.resume_text.trim().is_empty()
            && !self.is_scanned
            && !self.job_text().is_empty()
            && !self.any_in_flight()
    }

    fn generation_preconditions(&self) -> Result<(), WorkflowError> {
        if !self.document_selected || self.resume_text.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "No resume text available. Upload a resume first.".to_string(),
            ));
        }
        if self.is_scanned {
            return Err(WorkflowError::UnusableDocument(
                "No selectable text found. This may be a scanned PDF. Upload a proper text-based PDF.".to_string(),
            ));
        }
        if self.job_text().is_empty() {
            return Err(WorkflowError::Validation(
                "Job text is empty. Provide a job title or description.".to_string(),
            ));
        }
        Ok(())
    }
}

/// The stateful coordinator. Talks to the two external services and is the
/// only writer of [`WorkflowState`].
pub struct Orchestrator {
    state: Mutex<WorkflowState>,
    extraction: Arc<dyn ExtractionService>,
    generation: Arc<dyn GenerationService>,
}

impl Orchestrator {
    pub fn new(
        extraction: Arc<dyn ExtractionService>,
        generation: Arc<dyn GenerationService>,
    ) -> Self {
        Self {
            state: Mutex::new(WorkflowState::new()),
            extraction,
            generation,
        }
    }

    /// Read-only snapshot of the current state.
    pub async fn state(&self) -> WorkflowState {
        self.state.lock().await.clone()
    }

    /// Updates the active job-text source.
    pub async fn set_job_input(&self, mode: JobInputMode, text: &str) -> WorkflowState {
        let mut state = self.state.lock().await;
        state.job_mode = mode;
        match mode {
            JobInputMode::Title => state.job_title = text.to_string(),
            JobInputMode::Description => state.job_description = text.to_string(),
        }
        state.clone()
    }

    /// Starts a fresh attempt for `document`: resets all prior artifacts,
    /// then runs extraction. An empty payload fails fast with a validation
    /// error and never enters the extracting stage.
    pub async fn select_document(&self, document: Bytes) -> WorkflowState {
        let attempt = {
            let mut state = self.state.lock().await;
            state.reset_for_new_document();
            state.attempt += 1;

            if document.is_empty() {
                state.last_error = Some(WorkflowError::Validation(
                    "Please select a PDF file.".to_string(),
                ));
                return state.clone();
            }

            state.document_selected = true;
            state.stage = Stage::Extracting;
            state.extracting = true;
            info!(
                "extracting text from document ({} bytes, attempt {})",
                document.len(),
                state.attempt
            );
            state.attempt
        };

        let outcome = self.extraction.extract(document).await;

        let mut state = self.state.lock().await;
        if state.attempt != attempt {
            debug!("discarding stale extraction result (attempt {attempt} superseded)");
            return state.clone();
        }
        state.extracting = false;

        match outcome {
            Ok(document) => {
                let unusable = document.is_scanned || document.text.trim().is_empty();
                state.resume_text = document.text;
                state.is_scanned = unusable;
                state.stage = Stage::Extracted;
                if unusable {
                    warn!("document has no usable text (scanned or empty)");
                    state.last_error = Some(WorkflowError::UnusableDocument(
                        "No selectable text found. This may be a scanned PDF. Upload a proper text-based PDF.".to_string(),
                    ));
                } else {
                    info!("extracted {} characters", state.resume_text.len());
                }
            }
            Err(err) => {
                warn!("extraction failed: {err}");
                state.stage = Stage::Failed;
                state.last_error = Some(err.into());
            }
        }
        state.clone()
    }

    /// Runs match -> gate -> (conditionally) generate against the current
    /// resume/job pair. The match is always recomputed fresh; a cached score
    /// must never gate a generation whose inputs have moved on.
    pub async fn request_generation(&self, force: bool) -> WorkflowState {
        let (attempt, resume_text, job_text) = {
            let mut state = self.state.lock().await;

            if state.any_in_flight() {
                state.last_error = Some(WorkflowError::Validation(
                    "Another operation is already in flight.".to_string(),
                ));
                return state.clone();
            }
            if let Err(err) = state.generation_preconditions() {
                state.last_error = Some(err);
                return state.clone();
            }

            state.last_error = None;
            state.artifact_url = None;

            state.stage = Stage::Matching;
            state.matching = true;
            let resume_text = state.resume_text.clone();
            let job_text = state.job_text();

            let result = match_keywords(&resume_text, &job_text);
            info!(
                "match scored {}% ({} present, {} missing)",
                result.percent,
                result.present.len(),
                result.missing.len()
            );
            let percent = result.percent;
            state.match_result = Some(result);
            state.matching = false;
            state.stage = Stage::Matched;

            match gate::decide(percent, force) {
                GateDecision::Block { percent } => {
                    info!("generation blocked at {percent}% match");
                    state.stage = Stage::GateBlocked;
                    return state.clone();
                }
                GateDecision::Allow => {
                    if force && percent < gate::MATCH_THRESHOLD {
                        info!("low-match override accepted, proceeding to generation");
                    }
                    state.stage = Stage::Generating;
                    state.generating = true;
                }
            }

            (state.attempt, resume_text, job_text)
        };

        let outcome = self.generation.generate(&resume_text, &job_text).await;

        let mut state = self.state.lock().await;
        if state.attempt != attempt {
            debug!("discarding stale generation result (attempt {attempt} superseded)");
            return state.clone();
        }
        state.generating = false;

        match outcome {
            Ok(artifact) => {
                info!("resume generated: {}", artifact.pdf_url);
                state.artifact_url = Some(artifact.pdf_url);
                state.stage = Stage::Done;
            }
            Err(err) => {
                warn!("generation failed: {err}");
                state.stage = Stage::Failed;
                state.last_error = Some(err.into());
            }
        }
        state.clone()
    }
}
