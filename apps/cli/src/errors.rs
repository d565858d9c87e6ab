//! Pipeline error taxonomy. Every failure is caught at a stage boundary and
//! stored in the workflow state; nothing here escapes as a panic.

use thiserror::Error;

use crate::services::ServiceError;

/// Errors surfaced through [`crate::workflow::WorkflowState`].
///
/// A gate block is a policy decision, not an error, and has its own stage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// A precondition failed: no document selected, empty job text, or
    /// another operation already in flight. Not retried automatically.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Extraction succeeded transport-wise but yielded no usable text.
    /// Blocks progression until a new document is selected.
    #[error("Unusable document: {0}")]
    UnusableDocument(String),

    /// A service was unreachable or returned a non-success status.
    /// Recoverable only by retrying the triggering action.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A service reported success but omitted a required field. Fatal for
    /// the attempt, and distinct from Transport so callers can tell
    /// "service down" from "service misbehaving".
    #[error("Contract violation: {0}")]
    ContractViolation(String),
}

impl From<ServiceError> for WorkflowError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Http(e) => WorkflowError::Transport(e.to_string()),
            ServiceError::Api { status, message } => {
                WorkflowError::Transport(format!("service returned {status}: {message}"))
            }
            ServiceError::Contract(msg) => WorkflowError::ContractViolation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_maps_to_transport() {
        let err = WorkflowError::from(ServiceError::Api {
            status: 500,
            message: "PDF generation failed".to_string(),
        });
        assert!(matches!(err, WorkflowError::Transport(_)));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_contract_error_stays_distinct_from_transport() {
        let err = WorkflowError::from(ServiceError::Contract("pdf_url missing".to_string()));
        assert_eq!(
            err,
            WorkflowError::ContractViolation("pdf_url missing".to_string())
        );
    }
}
