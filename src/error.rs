//! Error types for the API client and the wizard.

use thiserror::Error;

use crate::wizard::step::{WizardAction, WizardStep};

/// Failures talking to the test-management API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("server rejected the request: {0}")]
    Rejected(String),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures surfaced by the wizard steps.
///
/// Every variant is recovered at the step that produced it: the step does
/// not advance and the store is left as it was before the action.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Required fields are missing. Nothing was sent.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The store does not hold what this step needs (e.g. no test id yet).
    #[error("invalid test state: {0}")]
    InconsistentState(&'static str),

    #[error("cannot {action} from step {from}")]
    InvalidTransition {
        from: WizardStep,
        action: WizardAction,
    },

    #[error("step {0} is out of range (expected 1-4)")]
    StepOutOfRange(u8),

    #[error("this test is open in view mode")]
    ReadOnly,

    #[error("no route matches {0}")]
    NotFound(String),

    #[error("session file {}: {source}", .path.display())]
    Session {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

impl From<validator::ValidationErrors> for WizardError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is required"),
                })
            })
            .collect();
        messages.sort();
        WizardError::Validation(messages.join(", "))
    }
}
